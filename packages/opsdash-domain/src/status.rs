use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// The fixed vocabulary every raw status or activity type is normalized into.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalStatus {
	OnTrack,
	InProgress,
	NeedsAttention,
	AtRisk,
	Completed,
}
impl CanonicalStatus {
	pub const ALL: [Self; 5] =
		[Self::OnTrack, Self::InProgress, Self::NeedsAttention, Self::AtRisk, Self::Completed];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::OnTrack => "on_track",
			Self::InProgress => "in_progress",
			Self::NeedsAttention => "needs_attention",
			Self::AtRisk => "at_risk",
			Self::Completed => "completed",
		}
	}
}
impl Display for CanonicalStatus {
	fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
		f.write_str(self.as_str())
	}
}

pub fn map_activity_status(raw_type: Option<&str>) -> CanonicalStatus {
	let Some(raw) = raw_type else {
		return CanonicalStatus::OnTrack;
	};

	match raw.trim().to_ascii_lowercase().as_str() {
		"completion" | "completed" => CanonicalStatus::Completed,
		"start" | "started" => CanonicalStatus::InProgress,
		"issue" | "problem" => CanonicalStatus::AtRisk,
		"attention" | "review" => CanonicalStatus::NeedsAttention,
		_ => CanonicalStatus::OnTrack,
	}
}

pub fn map_project_status(raw_status: Option<&str>) -> CanonicalStatus {
	let Some(raw) = raw_status else {
		return CanonicalStatus::OnTrack;
	};

	match raw.trim().to_ascii_lowercase().as_str() {
		"active" | "in_progress" => CanonicalStatus::InProgress,
		"on_track" => CanonicalStatus::OnTrack,
		"attention" | "needs_attention" => CanonicalStatus::NeedsAttention,
		"at_risk" | "delayed" => CanonicalStatus::AtRisk,
		_ => CanonicalStatus::OnTrack,
	}
}

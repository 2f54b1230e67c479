use serde::{Deserialize, Serialize};

use crate::status::CanonicalStatus;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ActivityRecord {
	pub project: String,
	pub activity: String,
	pub status: CanonicalStatus,
	/// Relative label such as "5 min ago".
	pub time: String,
	pub performed_by: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ProjectRecord {
	pub name: String,
	pub status: CanonicalStatus,
	/// Fraction of the scheduled window elapsed, in `[0, 1]`.
	pub progress: f64,
	pub due_date: String,
	pub address: String,
	pub assigned: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct MetricRecord {
	pub name: String,
	pub value: f64,
	#[serde(rename = "type")]
	pub metric_type: String,
	pub unit: String,
	pub trend: Trend,
	pub change: f64,
	pub category: String,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
	Up,
	Down,
	#[default]
	Neutral,
}
impl Trend {
	pub fn parse(raw: Option<&str>) -> Self {
		match raw.map(|value| value.trim().to_ascii_lowercase()).as_deref() {
			Some("up") => Self::Up,
			Some("down") => Self::Down,
			_ => Self::Neutral,
		}
	}
}

use serde_json::Value;
use time::OffsetDateTime;

use opsdash_domain::{
	ActivityRecord, MetricRecord, ProjectRecord, Trend, UNKNOWN_TIME, estimate_progress,
	map_activity_status, map_project_status, parse_timestamp, time_ago,
};
use opsdash_storage::models::{self, RawActivity, RawDeal, RawMetric, RawRow};

use crate::{Error, Result};

const UNASSIGNED: &str = "Unassigned";

pub fn decode<T>(table: &str, row: Value) -> Result<T>
where
	T: RawRow,
{
	models::decode_row(row).map_err(|err| Error::mapping(table, err))
}

pub fn activity(raw: RawActivity, now: OffsetDateTime) -> ActivityRecord {
	let time = raw
		.activity_time
		.as_deref()
		.and_then(parse_timestamp)
		.map(|at| time_ago(at, now))
		.unwrap_or_else(|| UNKNOWN_TIME.to_string());
	let activity = match (non_blank(&raw.activity_type), non_blank(&raw.reference)) {
		(Some(kind), Some(reference)) => format!("{kind}: {reference}"),
		(Some(only), None) | (None, Some(only)) => only.to_string(),
		(None, None) => "Activity".to_string(),
	};

	ActivityRecord {
		project: non_blank(&raw.deal_id).unwrap_or(UNASSIGNED).to_string(),
		activity,
		status: map_activity_status(raw.activity_type.as_deref()),
		time,
		performed_by: non_blank(&raw.performed_by).unwrap_or("System").to_string(),
	}
}

pub fn project(raw: RawDeal, now: OffsetDateTime) -> ProjectRecord {
	let due_date = match non_blank(&raw.end_date) {
		Some(end) => parse_timestamp(end)
			.map(|parsed| parsed.date().to_string())
			.unwrap_or_else(|| end.to_string()),
		None => "TBD".to_string(),
	};

	ProjectRecord {
		name: non_blank(&raw.deal_name).unwrap_or("Untitled project").to_string(),
		status: map_project_status(raw.project_status.as_deref()),
		progress: estimate_progress(raw.start_date.as_deref(), raw.end_date.as_deref(), now),
		due_date,
		address: non_blank(&raw.address).unwrap_or_default().to_string(),
		assigned: non_blank(&raw.assigned_to).unwrap_or(UNASSIGNED).to_string(),
	}
}

pub fn metric(raw: RawMetric) -> MetricRecord {
	MetricRecord {
		name: raw.metric_name,
		value: raw.metric_value.unwrap_or_default(),
		metric_type: raw.metric_type.unwrap_or_default(),
		unit: raw.unit.unwrap_or_default(),
		trend: Trend::parse(raw.trend.as_deref()),
		change: raw.change_percentage.unwrap_or_default(),
		category: raw.category.unwrap_or_default(),
	}
}

fn non_blank(value: &Option<String>) -> Option<&str> {
	value.as_deref().map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

#[cfg(test)]
mod tests {
	use opsdash_domain::CanonicalStatus;
	use time::macros::datetime;

	use super::*;

	#[test]
	fn activity_composes_label_and_relative_time() {
		let now = datetime!(2024-05-10 12:00:00 UTC);
		let raw = RawActivity {
			activity_time: Some("2024-05-10T11:55:00+00:00".to_string()),
			deal_id: Some("1042".to_string()),
			activity_type: Some("Completion".to_string()),
			reference: Some("Final inspection".to_string()),
			performed_by: Some("  ".to_string()),
		};
		let record = activity(raw, now);

		assert_eq!(record.project, "1042");
		assert_eq!(record.activity, "Completion: Final inspection");
		assert_eq!(record.status, CanonicalStatus::Completed);
		assert_eq!(record.time, "5 min ago");
		assert_eq!(record.performed_by, "System");
	}

	#[test]
	fn activity_with_bad_timestamp_is_unknown_time() {
		let now = datetime!(2024-05-10 12:00:00 UTC);
		let raw = RawActivity { activity_time: Some("last week".to_string()), ..Default::default() };
		let record = activity(raw, now);

		assert_eq!(record.time, UNKNOWN_TIME);
		assert_eq!(record.project, UNASSIGNED);
		assert_eq!(record.activity, "Activity");
		assert_eq!(record.status, CanonicalStatus::OnTrack);
	}

	#[test]
	fn project_formats_due_date_and_defaults() {
		let now = datetime!(2024-01-06 00:00:00 UTC);
		let raw = RawDeal {
			deal_name: Some("Maple St Reroof".to_string()),
			project_status: Some("Delayed".to_string()),
			start_date: Some("2024-01-01".to_string()),
			end_date: Some("2024-01-11T00:00:00+00:00".to_string()),
			address: None,
			assigned_to: None,
		};
		let record = project(raw, now);

		assert_eq!(record.status, CanonicalStatus::AtRisk);
		assert_eq!(record.progress, 0.5);
		assert_eq!(record.due_date, "2024-01-11");
		assert_eq!(record.address, "");
		assert_eq!(record.assigned, UNASSIGNED);
	}

	#[test]
	fn project_without_end_date_is_tbd() {
		let now = datetime!(2024-01-06 00:00:00 UTC);
		let record = project(RawDeal::default(), now);

		assert_eq!(record.due_date, "TBD");
		assert_eq!(record.name, "Untitled project");
		assert_eq!(record.progress, 0.0);
	}
}

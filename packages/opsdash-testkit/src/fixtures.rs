//! Raw rows shaped like the ones the data store returns.

use serde_json::{Value, json};

pub fn activity_row(
	activity_time: &str,
	deal_id: i64,
	activity_type: &str,
	reference: &str,
	performed_by: &str,
) -> Value {
	json!({
		"activity_time": activity_time,
		"deal_id": deal_id,
		"activity_type": activity_type,
		"reference": reference,
		"performed_by": performed_by,
	})
}

pub fn deal_row(name: &str, project_status: &str, start_date: &str, end_date: &str) -> Value {
	json!({
		"deal_name": name,
		"project_status": project_status,
		"start_date": start_date,
		"end_date": end_date,
		"address": "100 Main St",
		"assigned_to": "Crew A",
	})
}

pub fn metric_row(name: &str, value: f64, change: f64, trend: &str) -> Value {
	json!({
		"metric_name": name,
		"metric_value": value,
		"metric_type": "count",
		"unit": "units",
		"trend": trend,
		"change_percentage": change,
		"category": "pacing",
	})
}

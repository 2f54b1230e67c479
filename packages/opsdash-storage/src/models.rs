//! Raw row shapes as the data store returns them.
//!
//! Text columns accept JSON strings, numbers, and booleans, since ids and dates arrive in
//! different encodings depending on the source. Numeric columns accept numbers or numeric
//! strings (Postgres `numeric` is commonly serialized as a string).
//!
//! Alternate column names are folded onto the canonical one before decoding. When a row carries
//! both, the canonical column wins unless it is null.

use serde::{
	Deserialize, Deserializer,
	de::{DeserializeOwned, Error as _},
};
use serde_json::{Map, Value};

pub const RECENT_ACTIVITY_TABLE: &str = "recent_activity";
pub const DEALS_TABLE: &str = "deals";
pub const DASHBOARD_METRICS_VIEW: &str = "dashboard_metrics_view";

/// A raw row type plus the alternate column names it accepts.
pub trait RawRow
where
	Self: DeserializeOwned,
{
	/// `(alias, canonical)` pairs, earlier aliases taking precedence over later ones.
	const ALIASES: &'static [(&'static str, &'static str)] = &[];
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawActivity {
	#[serde(default, deserialize_with = "text")]
	pub activity_time: Option<String>,
	#[serde(default, deserialize_with = "text")]
	pub deal_id: Option<String>,
	#[serde(default, deserialize_with = "text")]
	pub activity_type: Option<String>,
	#[serde(default, deserialize_with = "text")]
	pub reference: Option<String>,
	#[serde(default, deserialize_with = "text")]
	pub performed_by: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawDeal {
	#[serde(default, deserialize_with = "text")]
	pub deal_name: Option<String>,
	#[serde(default, deserialize_with = "text")]
	pub project_status: Option<String>,
	#[serde(default, deserialize_with = "text")]
	pub start_date: Option<String>,
	#[serde(default, deserialize_with = "text")]
	pub end_date: Option<String>,
	#[serde(default, deserialize_with = "text")]
	pub address: Option<String>,
	#[serde(default, deserialize_with = "text")]
	pub assigned_to: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawMetric {
	pub metric_name: String,
	#[serde(default, deserialize_with = "number")]
	pub metric_value: Option<f64>,
	#[serde(default, deserialize_with = "text")]
	pub metric_type: Option<String>,
	#[serde(default, deserialize_with = "text")]
	pub unit: Option<String>,
	#[serde(default, deserialize_with = "text")]
	pub trend: Option<String>,
	#[serde(default, deserialize_with = "number")]
	pub change_percentage: Option<f64>,
	#[serde(default, deserialize_with = "text")]
	pub category: Option<String>,
}

impl RawRow for RawActivity {}
impl RawRow for RawDeal {
	const ALIASES: &'static [(&'static str, &'static str)] = &[
		("project_name", "deal_name"),
		("name", "deal_name"),
		("project_address", "address"),
		("owner", "assigned_to"),
	];
}
impl RawRow for RawMetric {
	const ALIASES: &'static [(&'static str, &'static str)] = &[
		("value", "metric_value"),
		("type", "metric_type"),
		("change", "change_percentage"),
		("change_value", "change_percentage"),
	];
}

/// Decodes one row, resolving `T::ALIASES` first.
pub fn decode_row<T>(row: Value) -> serde_json::Result<T>
where
	T: RawRow,
{
	let row = match row {
		Value::Object(columns) => Value::Object(resolve_aliases(columns, T::ALIASES)),
		other => other,
	};

	serde_json::from_value(row)
}

fn resolve_aliases(
	mut columns: Map<String, Value>,
	aliases: &[(&str, &str)],
) -> Map<String, Value> {
	for (alias, canonical) in aliases {
		let Some(value) = columns.remove(*alias) else {
			continue;
		};

		if columns.get(*canonical).is_none_or(Value::is_null) {
			columns.insert(canonical.to_string(), value);
		}
	}

	columns
}

fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	match Option::<Value>::deserialize(deserializer)? {
		None | Some(Value::Null) => Ok(None),
		Some(Value::String(raw)) => Ok(Some(raw)),
		Some(Value::Number(raw)) => Ok(Some(raw.to_string())),
		Some(Value::Bool(raw)) => Ok(Some(raw.to_string())),
		Some(other) => Err(D::Error::custom(format!("expected text, found {other}"))),
	}
}

fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
	D: Deserializer<'de>,
{
	let parsed = match Option::<Value>::deserialize(deserializer)? {
		None | Some(Value::Null) => return Ok(None),
		Some(Value::Number(raw)) => raw.as_f64(),
		Some(Value::String(raw)) => raw.trim().parse::<f64>().ok(),
		Some(_) => None,
	};

	match parsed {
		Some(value) if value.is_finite() => Ok(Some(value)),
		_ => Err(D::Error::custom("expected a finite number")),
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn activity_accepts_numeric_ids() {
		let raw: RawActivity = serde_json::from_value(json!({
			"activity_time": "2024-05-10T11:55:00+00:00",
			"deal_id": 1042,
			"activity_type": "completion",
			"reference": null,
		}))
		.expect("decode failed");

		assert_eq!(raw.deal_id.as_deref(), Some("1042"));
		assert_eq!(raw.reference, None);
		assert_eq!(raw.performed_by, None);
	}

	#[test]
	fn deal_accepts_aliases() {
		let raw: RawDeal = decode_row(json!({
			"project_name": "Maple St Reroof",
			"owner": "Dana",
		}))
		.expect("decode failed");

		assert_eq!(raw.deal_name.as_deref(), Some("Maple St Reroof"));
		assert_eq!(raw.assigned_to.as_deref(), Some("Dana"));
	}

	#[test]
	fn deal_prefers_canonical_column_over_alias() {
		let raw: RawDeal = decode_row(json!({
			"deal_name": "Oak Ave",
			"name": "oak-ave",
			"project_name": "Oak Avenue",
			"address": "12 Oak Ave",
			"project_address": "12 Oak Avenue",
			"owner": "Dana",
		}))
		.expect("decode failed");

		assert_eq!(raw.deal_name.as_deref(), Some("Oak Ave"));
		assert_eq!(raw.address.as_deref(), Some("12 Oak Ave"));
		assert_eq!(raw.assigned_to.as_deref(), Some("Dana"));
	}

	#[test]
	fn null_canonical_column_falls_back_to_alias() {
		let raw: RawDeal = decode_row(json!({
			"deal_name": null,
			"project_name": null,
			"name": "Birch Ln",
		}))
		.expect("decode failed");

		assert_eq!(raw.deal_name.as_deref(), Some("Birch Ln"));
	}

	#[test]
	fn metric_value_may_be_absent() {
		let raw: RawMetric = decode_row(json!({
			"metric_name": "units_completed",
			"change_percentage": 5,
		}))
		.expect("decode failed");

		assert_eq!(raw.metric_value, None);
		assert_eq!(raw.change_percentage, Some(5.0));
	}

	#[test]
	fn metric_accepts_short_column_names() {
		let raw: RawMetric = decode_row(json!({
			"metric_name": "scheduled_today",
			"metric_value": 7,
			"value": 9,
			"type": "count",
			"change": 1,
		}))
		.expect("decode failed");

		assert_eq!(raw.metric_value, Some(7.0));
		assert_eq!(raw.metric_type.as_deref(), Some("count"));
		assert_eq!(raw.change_percentage, Some(1.0));
	}

	#[test]
	fn metric_accepts_numeric_strings() {
		let raw: RawMetric = decode_row(json!({
			"metric_name": "completion_rate",
			"metric_value": "87.5",
			"change_percentage": -3,
		}))
		.expect("decode failed");

		assert_eq!(raw.metric_value, Some(87.5));
		assert_eq!(raw.change_percentage, Some(-3.0));
	}

	#[test]
	fn metric_rejects_non_numeric_values() {
		let result: Result<RawMetric, _> = decode_row(json!({
			"metric_name": "completion_rate",
			"metric_value": "n/a",
		}));

		assert!(result.is_err());
	}

	#[test]
	fn metric_requires_name() {
		let result: Result<RawMetric, _> = decode_row(json!({ "metric_value": 3 }));

		assert!(result.is_err());
	}
}

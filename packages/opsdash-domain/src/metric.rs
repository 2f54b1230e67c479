use serde::{Deserialize, Serialize};

use crate::records::MetricRecord;

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct MetricValue {
	pub value: f64,
	pub change: f64,
}

/// Returns the first metric whose name contains `pattern`, or zeros when nothing matches.
///
/// Both sides are folded to lowercase `snake_case` first, so `units_completed` matches
/// "Units Completed This Week". List order decides ties.
pub fn get_metric(metrics: &[MetricRecord], pattern: &str) -> MetricValue {
	let needle = normalize_key(pattern);

	if needle.is_empty() {
		return MetricValue::default();
	}

	metrics
		.iter()
		.find(|metric| normalize_key(&metric.name).contains(&needle))
		.map(|metric| MetricValue { value: metric.value, change: metric.change })
		.unwrap_or_default()
}

fn normalize_key(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());
	let mut pending_separator = false;

	for ch in raw.chars() {
		if ch.is_alphanumeric() {
			if pending_separator && !out.is_empty() {
				out.push('_');
			}

			pending_separator = false;

			out.extend(ch.to_lowercase());
		} else {
			pending_separator = true;
		}
	}

	out
}

#[cfg(test)]
mod tests {
	use super::normalize_key;

	#[test]
	fn folds_separators_and_case() {
		assert_eq!(normalize_key("Units Completed  This-Week"), "units_completed_this_week");
		assert_eq!(normalize_key("__scheduled_today__"), "scheduled_today");
		assert_eq!(normalize_key("  "), "");
	}
}

use time::OffsetDateTime;

use crate::time_ago::parse_timestamp;

/// Estimates how far through its scheduled window a project is, as a fraction in `[0, 1]`.
///
/// Unparseable or missing dates yield `0.0`. A window shorter than one whole day that `now`
/// falls inside counts as finished, so the result is never NaN.
pub fn estimate_progress(start: Option<&str>, end: Option<&str>, now: OffsetDateTime) -> f64 {
	let (Some(start), Some(end)) =
		(start.and_then(parse_timestamp), end.and_then(parse_timestamp))
	else {
		return 0.0;
	};

	estimate_progress_between(start, end, now)
}

pub fn estimate_progress_between(
	start: OffsetDateTime,
	end: OffsetDateTime,
	now: OffsetDateTime,
) -> f64 {
	if now < start {
		return 0.0;
	}
	if now > end {
		return 1.0;
	}

	let total_days = (end - start).whole_days();

	if total_days <= 0 {
		return 1.0;
	}

	let elapsed_days = (now - start).whole_days();

	(elapsed_days as f64 / total_days as f64).clamp(0.0, 1.0)
}

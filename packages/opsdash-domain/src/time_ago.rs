use time::{
	Date, OffsetDateTime, PrimitiveDateTime, format_description::well_known::Rfc3339,
	macros::format_description,
};

/// Label used in place of a relative time when the source timestamp cannot be parsed.
pub const UNKNOWN_TIME: &str = "Unknown time";

/// Formats the distance from `past` to `now` as a coarse "time ago" label.
///
/// Buckets truncate: 119 minutes is "1 hr ago" and 47 hours is "1 days ago". Instants in the
/// future render as "Just now".
pub fn time_ago(past: OffsetDateTime, now: OffsetDateTime) -> String {
	let elapsed = now - past;
	let minutes = elapsed.whole_minutes();

	if minutes < 1 {
		"Just now".to_string()
	} else if minutes < 60 {
		format!("{minutes} min ago")
	} else if minutes < 24 * 60 {
		format!("{} hr ago", elapsed.whole_hours())
	} else {
		format!("{} days ago", elapsed.whole_days())
	}
}

/// Parses the timestamp shapes the data store emits.
///
/// Accepts RFC 3339, naive `YYYY-MM-DD[T| ]HH:MM[:SS[.fff]]` (read as UTC), and a bare
/// `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
	let trimmed = raw.trim();

	if trimmed.is_empty() {
		return None;
	}

	let normalized = trimmed.replacen(' ', "T", 1);

	if let Ok(parsed) = OffsetDateTime::parse(&normalized, &Rfc3339) {
		return Some(parsed);
	}

	let without_fraction = match normalized.split_once('.') {
		Some((head, _)) => head,
		None => normalized.as_str(),
	};

	if let Ok(parsed) = PrimitiveDateTime::parse(
		without_fraction,
		format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
	) {
		return Some(parsed.assume_utc());
	}
	if let Ok(parsed) = PrimitiveDateTime::parse(
		without_fraction,
		format_description!("[year]-[month]-[day]T[hour]:[minute]"),
	) {
		return Some(parsed.assume_utc());
	}

	Date::parse(trimmed, format_description!("[year]-[month]-[day]"))
		.ok()
		.map(|date| date.midnight().assume_utc())
}

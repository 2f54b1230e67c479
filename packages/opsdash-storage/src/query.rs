use crate::{Error, Result};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FilterOp {
	Eq,
	Neq,
}
impl FilterOp {
	pub fn postgrest(self) -> &'static str {
		match self {
			Self::Eq => "eq",
			Self::Neq => "neq",
		}
	}

	pub fn sql(self) -> &'static str {
		match self {
			Self::Eq => "=",
			Self::Neq => "<>",
		}
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Filter {
	pub column: String,
	pub op: FilterOp,
	pub value: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Order {
	pub column: String,
	pub descending: bool,
}

/// A single-table select. Rows whose filter column is NULL never match, for either operator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Query {
	pub table: String,
	/// `*` or a comma-separated column list.
	pub columns: String,
	pub filters: Vec<Filter>,
	pub order: Option<Order>,
	pub limit: Option<u32>,
}
impl Query {
	pub fn table(table: impl Into<String>) -> Self {
		Self {
			table: table.into(),
			columns: "*".to_string(),
			filters: Vec::new(),
			order: None,
			limit: None,
		}
	}

	pub fn select(mut self, columns: impl Into<String>) -> Self {
		self.columns = columns.into();

		self
	}

	pub fn eq(self, column: impl Into<String>, value: impl Into<String>) -> Self {
		self.filter(column, FilterOp::Eq, value)
	}

	pub fn neq(self, column: impl Into<String>, value: impl Into<String>) -> Self {
		self.filter(column, FilterOp::Neq, value)
	}

	pub fn filter(
		mut self,
		column: impl Into<String>,
		op: FilterOp,
		value: impl Into<String>,
	) -> Self {
		self.filters.push(Filter { column: column.into(), op, value: value.into() });

		self
	}

	pub fn order_by(mut self, column: impl Into<String>, descending: bool) -> Self {
		self.order = Some(Order { column: column.into(), descending });

		self
	}

	pub fn limit(mut self, limit: u32) -> Self {
		self.limit = Some(limit);

		self
	}

	/// Column names listed in `columns`, or `None` for `*`.
	pub fn column_list(&self) -> Option<Vec<&str>> {
		let trimmed = self.columns.trim();

		if trimmed == "*" {
			return None;
		}

		Some(trimmed.split(',').map(str::trim).collect())
	}

	/// Rejects identifiers that are not plain `[A-Za-z0-9_]` names.
	pub fn validate(&self) -> Result<()> {
		ensure_identifier("table", &self.table)?;

		if let Some(columns) = self.column_list() {
			for column in columns {
				ensure_identifier("column", column)?;
			}
		}
		for filter in &self.filters {
			ensure_identifier("filter column", &filter.column)?;
		}

		if let Some(order) = self.order.as_ref() {
			ensure_identifier("order column", &order.column)?;
		}

		Ok(())
	}
}

fn ensure_identifier(label: &str, value: &str) -> Result<()> {
	let valid = !value.is_empty()
		&& !value.starts_with(|ch: char| ch.is_ascii_digit())
		&& value.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_');

	if valid {
		Ok(())
	} else {
		Err(Error::InvalidArgument(format!("Invalid {label} identifier {value:?}.")))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn builder_collects_clauses() {
		let query = Query::table("deals")
			.neq("project_status", "completed")
			.order_by("start_date", true)
			.limit(10);

		assert_eq!(query.columns, "*");
		assert_eq!(
			query.filters,
			vec![Filter {
				column: "project_status".to_string(),
				op: FilterOp::Neq,
				value: "completed".to_string(),
			}]
		);
		assert_eq!(query.order, Some(Order { column: "start_date".to_string(), descending: true }));
		assert_eq!(query.limit, Some(10));
		assert!(query.validate().is_ok());
	}

	#[test]
	fn validate_rejects_injection_attempts() {
		assert!(Query::table("deals; DROP TABLE deals").validate().is_err());
		assert!(Query::table("deals").select("name, \"x\"").validate().is_err());
		assert!(Query::table("deals").order_by("1start", false).validate().is_err());
		assert!(Query::table("deals").eq("", "x").validate().is_err());
	}

	#[test]
	fn column_list_splits_and_trims() {
		let query = Query::table("deals").select("deal_name, start_date");

		assert_eq!(query.column_list(), Some(vec!["deal_name", "start_date"]));
		assert_eq!(Query::table("deals").column_list(), None);
	}
}

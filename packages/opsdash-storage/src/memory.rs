use std::{cmp::Ordering, collections::HashMap, sync::RwLock};

use serde_json::{Map, Value};

use crate::{BoxFuture, DataSource, Error, FilterOp, Query, Result};

/// An in-process table store that evaluates queries the way Postgres would for the supported
/// clauses: NULL never matches a filter, and NULLs sort last ascending and first descending.
#[derive(Debug, Default)]
pub struct MemorySource {
	tables: RwLock<HashMap<String, Vec<Value>>>,
}
impl MemorySource {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_table(self, table: impl Into<String>, rows: Vec<Value>) -> Self {
		self.replace_table(table, rows);

		self
	}

	pub fn replace_table(&self, table: impl Into<String>, rows: Vec<Value>) {
		let mut tables = self.tables.write().unwrap_or_else(|err| err.into_inner());

		tables.insert(table.into(), rows);
	}

	pub fn remove_table(&self, table: &str) -> Option<Vec<Value>> {
		let mut tables = self.tables.write().unwrap_or_else(|err| err.into_inner());

		tables.remove(table)
	}

	pub fn select(&self, query: &Query) -> Result<Vec<Value>> {
		query.validate()?;

		let tables = self.tables.read().unwrap_or_else(|err| err.into_inner());
		let rows = tables
			.get(&query.table)
			.ok_or_else(|| Error::InvalidArgument(format!("Unknown table {:?}.", query.table)))?;
		let mut selected: Vec<Value> = rows
			.iter()
			.filter(|row| {
				query.filters.iter().all(|filter| {
					let Some(text) = row.get(&filter.column).and_then(value_text) else {
						return false;
					};

					match filter.op {
						FilterOp::Eq => text == filter.value,
						FilterOp::Neq => text != filter.value,
					}
				})
			})
			.cloned()
			.collect();

		if let Some(order) = query.order.as_ref() {
			selected.sort_by(|a, b| {
				let ordering = compare_nullable(a.get(&order.column), b.get(&order.column));

				if order.descending { ordering.reverse() } else { ordering }
			});
		}
		if let Some(limit) = query.limit {
			selected.truncate(limit as usize);
		}

		if let Some(columns) = query.column_list() {
			selected = selected.into_iter().map(|row| project(&row, &columns)).collect();
		}

		Ok(selected)
	}
}
impl DataSource for MemorySource {
	fn query<'a>(&'a self, query: &'a Query) -> BoxFuture<'a, Result<Vec<Value>>> {
		let result = self.select(query);

		Box::pin(async move { result })
	}
}

fn value_text(value: &Value) -> Option<String> {
	match value {
		Value::Null => None,
		Value::String(text) => Some(text.clone()),
		other => Some(other.to_string()),
	}
}

fn compare_nullable(a: Option<&Value>, b: Option<&Value>) -> Ordering {
	let a = a.filter(|value| !value.is_null());
	let b = b.filter(|value| !value.is_null());

	match (a, b) {
		(None, None) => Ordering::Equal,
		(None, Some(_)) => Ordering::Greater,
		(Some(_), None) => Ordering::Less,
		(Some(Value::Number(a)), Some(Value::Number(b))) => {
			let a = a.as_f64().unwrap_or(f64::NAN);
			let b = b.as_f64().unwrap_or(f64::NAN);

			a.partial_cmp(&b).unwrap_or(Ordering::Equal)
		},
		(Some(a), Some(b)) => value_text(a).cmp(&value_text(b)),
	}
}

fn project(row: &Value, columns: &[&str]) -> Value {
	let mut out = Map::new();

	for column in columns {
		out.insert((*column).to_string(), row.get(*column).cloned().unwrap_or(Value::Null));
	}

	Value::Object(out)
}

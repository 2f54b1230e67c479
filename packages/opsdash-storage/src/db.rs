use serde_json::Value;
use sqlx::{PgPool, Postgres, QueryBuilder, postgres::PgPoolOptions};

use crate::{BoxFuture, DataSource, Query, Result};

pub struct Db {
	pub pool: PgPool,
}
impl Db {
	pub async fn connect(cfg: &opsdash_config::Postgres) -> Result<Self> {
		let pool =
			PgPoolOptions::new().max_connections(cfg.pool_max_conns).connect(&cfg.dsn).await?;

		Ok(Self { pool })
	}
}

/// Reads tables and views straight from Postgres, returning each row as a JSON object.
pub struct PgSource {
	db: Db,
}
impl PgSource {
	pub fn new(db: Db) -> Self {
		Self { db }
	}

	async fn fetch(&self, query: &Query) -> Result<Vec<Value>> {
		query.validate()?;

		let mut builder = build_select(query);
		let rows: Vec<Value> = builder.build_query_scalar().fetch_all(&self.db.pool).await?;

		tracing::debug!(table = %query.table, rows = rows.len(), "Postgres query completed.");

		Ok(rows)
	}
}
impl DataSource for PgSource {
	fn query<'a>(&'a self, query: &'a Query) -> BoxFuture<'a, Result<Vec<Value>>> {
		Box::pin(self.fetch(query))
	}
}

/// Renders a validated query. Identifiers are interpolated, so callers must run
/// [`Query::validate`] first; filter values and the limit are bound.
pub fn build_select(query: &Query) -> QueryBuilder<'static, Postgres> {
	let mut builder = QueryBuilder::new("SELECT ");

	match query.column_list() {
		None => {
			builder.push("to_jsonb(t)");
		},
		Some(columns) => {
			builder.push("jsonb_build_object(");

			for (idx, column) in columns.iter().enumerate() {
				if idx > 0 {
					builder.push(", ");
				}

				builder.push(format!("'{column}', t.\"{column}\""));
			}

			builder.push(")");
		},
	}

	builder.push(format!(" FROM \"{}\" AS t", query.table));

	for (idx, filter) in query.filters.iter().enumerate() {
		builder.push(if idx == 0 { " WHERE " } else { " AND " });
		builder.push(format!("t.\"{}\"::text {} ", filter.column, filter.op.sql()));
		builder.push_bind(filter.value.clone());
	}

	if let Some(order) = query.order.as_ref() {
		let direction = if order.descending { "DESC" } else { "ASC" };

		builder.push(format!(" ORDER BY t.\"{}\" {direction}", order.column));
	}
	if let Some(limit) = query.limit {
		builder.push(" LIMIT ");
		builder.push_bind(i64::from(limit));
	}

	builder
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn renders_full_row_select() {
		let query = Query::table("deals")
			.neq("project_status", "completed")
			.order_by("start_date", true)
			.limit(10);
		let builder = build_select(&query);

		assert_eq!(
			builder.sql(),
			"SELECT to_jsonb(t) FROM \"deals\" AS t WHERE t.\"project_status\"::text <> $1 ORDER BY t.\"start_date\" DESC LIMIT $2"
		);
	}

	#[test]
	fn renders_column_projection() {
		let query = Query::table("recent_activity").select("deal_id, activity_type");
		let builder = build_select(&query);

		assert_eq!(
			builder.sql(),
			"SELECT jsonb_build_object('deal_id', t.\"deal_id\", 'activity_type', t.\"activity_type\") FROM \"recent_activity\" AS t"
		);
	}
}

use std::time::Duration;

use reqwest::{
	Client,
	header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue},
};
use serde_json::{Map, Value};

use crate::{BoxFuture, DataSource, Error, Query, Result};

const REST_PATH: &str = "/rest/v1";

/// Reads tables through a PostgREST endpoint such as Supabase's `/rest/v1`.
pub struct PostgrestSource {
	client: Client,
	base_url: String,
	headers: HeaderMap,
}
impl PostgrestSource {
	pub fn new(cfg: &opsdash_config::Postgrest) -> Result<Self> {
		let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
		let headers = auth_headers(&cfg.api_key, &cfg.default_headers)?;

		Ok(Self { client, base_url: cfg.url.trim_end_matches('/').to_string(), headers })
	}

	async fn fetch(&self, query: &Query) -> Result<Vec<Value>> {
		query.validate()?;

		let url = format!("{}{REST_PATH}/{}", self.base_url, query.table);
		let res = self
			.client
			.get(url)
			.headers(self.headers.clone())
			.query(&query_params(query))
			.send()
			.await?;
		let json: Value = res.error_for_status()?.json().await?;

		match json {
			Value::Array(rows) => {
				tracing::debug!(table = %query.table, rows = rows.len(), "PostgREST query completed.");

				Ok(rows)
			},
			other => Err(Error::InvalidResponse {
				message: format!(
					"Expected a JSON array from table {}, got {}.",
					query.table,
					json_kind(&other)
				),
			}),
		}
	}
}
impl DataSource for PostgrestSource {
	fn query<'a>(&'a self, query: &'a Query) -> BoxFuture<'a, Result<Vec<Value>>> {
		Box::pin(self.fetch(query))
	}
}

pub fn auth_headers(api_key: &str, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	headers.insert(HeaderName::from_static("apikey"), HeaderValue::from_str(api_key)?);
	headers.insert(AUTHORIZATION, format!("Bearer {api_key}").parse()?);

	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::InvalidArgument("Default header values must be strings.".to_string()));
		};

		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}

/// Renders the PostgREST query string, e.g.
/// `select=*&project_status=neq.completed&order=start_date.desc&limit=10`.
pub fn query_params(query: &Query) -> Vec<(String, String)> {
	let mut params = vec![("select".to_string(), query.columns.trim().replace(' ', ""))];

	for filter in &query.filters {
		params.push((filter.column.clone(), format!("{}.{}", filter.op.postgrest(), filter.value)));
	}

	if let Some(order) = query.order.as_ref() {
		let direction = if order.descending { "desc" } else { "asc" };

		params.push(("order".to_string(), format!("{}.{direction}", order.column)));
	}
	if let Some(limit) = query.limit {
		params.push(("limit".to_string(), limit.to_string()));
	}

	params
}

fn json_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

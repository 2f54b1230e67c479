use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub source: Source,
	#[serde(default)]
	pub dashboard: Dashboard,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Source {
	pub kind: SourceKind,
	pub postgrest: Option<Postgrest>,
	pub postgres: Option<Postgres>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
	Postgrest,
	Postgres,
}

/// PostgREST-compatible HTTP endpoint, e.g. a Supabase project.
#[derive(Debug, Clone, Deserialize)]
pub struct Postgrest {
	/// Base URL without the `/rest/v1` suffix.
	pub url: String,
	pub api_key: String,
	#[serde(default = "default_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Dashboard {
	pub refresh_interval_secs: u64,
	pub activity_limit: u32,
	pub project_limit: u32,
}
impl Default for Dashboard {
	fn default() -> Self {
		Self { refresh_interval_secs: 60, activity_limit: 20, project_limit: 10 }
	}
}

fn default_timeout_ms() -> u64 {
	10_000
}

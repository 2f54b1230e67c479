pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Query against {table} failed: {message}")]
	Query { table: String, message: String },
	#[error("Row from {table} could not be mapped: {message}")]
	Mapping { table: String, message: String },
}
impl Error {
	pub fn query(table: &str, err: opsdash_storage::Error) -> Self {
		Self::Query { table: table.to_string(), message: err.to_string() }
	}

	pub fn mapping(table: &str, err: serde_json::Error) -> Self {
		Self::Mapping { table: table.to_string(), message: err.to_string() }
	}
}

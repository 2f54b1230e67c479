pub mod db;
pub mod memory;
pub mod models;
pub mod postgrest;
pub mod query;

mod error;

pub use error::Error;
pub use query::{Filter, FilterOp, Order, Query};

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

use opsdash_config::{Source, SourceKind};

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A read-only collection store that answers filtered, ordered, limited selects with JSON rows.
pub trait DataSource
where
	Self: Send + Sync,
{
	fn query<'a>(&'a self, query: &'a Query) -> BoxFuture<'a, Result<Vec<Value>>>;
}

/// Builds the source selected by `source.kind`.
pub async fn connect(cfg: &Source) -> Result<Arc<dyn DataSource>> {
	match cfg.kind {
		SourceKind::Postgrest => {
			let postgrest = cfg.postgrest.as_ref().ok_or_else(|| {
				Error::InvalidArgument("source.postgrest is not configured.".to_string())
			})?;

			Ok(Arc::new(postgrest::PostgrestSource::new(postgrest)?))
		},
		SourceKind::Postgres => {
			let postgres = cfg.postgres.as_ref().ok_or_else(|| {
				Error::InvalidArgument("source.postgres is not configured.".to_string())
			})?;
			let db = db::Db::connect(postgres).await?;

			Ok(Arc::new(db::PgSource::new(db)))
		},
	}
}

mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Dashboard, Postgres, Postgrest, Service, Source, SourceKind};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	match cfg.source.kind {
		SourceKind::Postgrest => {
			let Some(postgrest) = cfg.source.postgrest.as_ref() else {
				return Err(Error::Validation {
					message: "source.postgrest is required when source.kind is postgrest."
						.to_string(),
				});
			};

			for (label, value) in [
				("source.postgrest.url", &postgrest.url),
				("source.postgrest.api_key", &postgrest.api_key),
			] {
				if value.trim().is_empty() {
					return Err(Error::Validation { message: format!("{label} must be non-empty.") });
				}
			}

			if !postgrest.url.starts_with("http://") && !postgrest.url.starts_with("https://") {
				return Err(Error::Validation {
					message: "source.postgrest.url must start with http:// or https://.".to_string(),
				});
			}
			if postgrest.timeout_ms == 0 {
				return Err(Error::Validation {
					message: "source.postgrest.timeout_ms must be greater than zero.".to_string(),
				});
			}
			if postgrest.default_headers.values().any(|value| !value.is_string()) {
				return Err(Error::Validation {
					message: "source.postgrest.default_headers values must be strings.".to_string(),
				});
			}
		},
		SourceKind::Postgres => {
			let Some(postgres) = cfg.source.postgres.as_ref() else {
				return Err(Error::Validation {
					message: "source.postgres is required when source.kind is postgres.".to_string(),
				});
			};

			if postgres.dsn.trim().is_empty() {
				return Err(Error::Validation {
					message: "source.postgres.dsn must be non-empty.".to_string(),
				});
			}
			if postgres.pool_max_conns == 0 {
				return Err(Error::Validation {
					message: "source.postgres.pool_max_conns must be greater than zero.".to_string(),
				});
			}
		},
	}

	if cfg.dashboard.refresh_interval_secs == 0 {
		return Err(Error::Validation {
			message: "dashboard.refresh_interval_secs must be greater than zero.".to_string(),
		});
	}
	if cfg.dashboard.activity_limit == 0 {
		return Err(Error::Validation {
			message: "dashboard.activity_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.dashboard.project_limit == 0 {
		return Err(Error::Validation {
			message: "dashboard.project_limit must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if let Some(postgrest) = cfg.source.postgrest.as_mut() {
		let trimmed = postgrest.url.trim().trim_end_matches('/');

		postgrest.url = trimmed.to_string();
	}
}

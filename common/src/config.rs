use std::path::Path;

use serde::de::DeserializeOwned;

use crate::logging;

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct TlsConfig {
	/// The path to the TLS certificate
	pub cert: String,

	/// The path to the TLS private key
	pub key: String,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
	/// The log level to use, this is a tracing env filter
	pub level: String,

	/// What logging mode we should use
	pub mode: logging::Mode,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			mode: logging::Mode::Default,
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
	/// The database URL to use
	pub uri: String,

	/// Upper bound on pooled connections, one is held per in-flight request
	pub max_connections: u32,
}

impl Default for DatabaseConfig {
	fn default() -> Self {
		Self {
			uri: "postgres://root@localhost:5432/contact_dev".to_string(),
			max_connections: 10,
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read config file {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to parse config file {path}: {source}")]
	Toml {
		path: String,
		#[source]
		source: toml::de::Error,
	},
}

/// Loads a TOML config file into `C`.
///
/// A missing file is only an error when `required` is set, otherwise the
/// defaults are returned. The second value is the canonical path of the file
/// that was loaded, if any.
pub fn parse_file<C: DeserializeOwned + Default>(
	path: Option<&str>,
	required: bool,
) -> Result<(C, Option<String>), ConfigError> {
	let Some(path) = path else {
		return Ok((C::default(), None));
	};

	let contents = match std::fs::read_to_string(path) {
		Ok(contents) => contents,
		Err(source) => {
			let err = ConfigError::Io {
				path: path.to_string(),
				source,
			};

			if required {
				return Err(err);
			}

			tracing::debug!("failed to load config file: {}", err);
			return Ok((C::default(), None));
		}
	};

	let config = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
		path: path.to_string(),
		source,
	})?;

	let location = std::fs::canonicalize(Path::new(path))
		.map(|p| p.display().to_string())
		.unwrap_or_else(|_| path.to_string());

	Ok((config, Some(location)))
}

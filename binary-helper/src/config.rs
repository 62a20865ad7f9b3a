use std::ffi::OsString;

use clap::Parser;
use common::config::{DatabaseConfig, LoggingConfig};
use common::logging::Mode;
use serde::de::DeserializeOwned;

use super::Config;

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig<T: ConfigExtention> {
	/// The name of the application
	pub name: String,

	/// The path to the config file
	pub config_file: Option<String>,

	/// The logging configuration
	pub logging: LoggingConfig,

	/// The database configuration
	pub database: DatabaseConfig,

	#[serde(flatten)]
	pub extra: T,
}

/// Command line flags, every flag can also be given through its `CONTACT_*`
/// environment variable. Anything set here wins over the config file.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli<E: clap::Args> {
	/// Path to a TOML config file
	#[arg(long, env = "CONTACT_CONFIG_FILE")]
	pub config_file: Option<String>,

	/// Name of this instance
	#[arg(long, env = "CONTACT_NAME")]
	pub name: Option<String>,

	/// Tracing env filter
	#[arg(long = "log-level", env = "CONTACT_LOGGING_LEVEL")]
	pub logging_level: Option<String>,

	/// Log output mode (default, json, pretty, compact)
	#[arg(long = "log-mode", env = "CONTACT_LOGGING_MODE")]
	pub logging_mode: Option<Mode>,

	/// Postgres connection URI
	#[arg(long, env = "CONTACT_DATABASE_URI")]
	pub database_uri: Option<String>,

	/// Maximum number of pooled database connections
	#[arg(long, env = "CONTACT_DATABASE_MAX_CONNECTIONS")]
	pub database_max_connections: Option<u32>,

	#[command(flatten)]
	pub extra: E,
}

pub trait ConfigExtention: Default + Sized {
	const APP_NAME: &'static str;

	type Cli: clap::Args;

	fn config_default() -> AppConfig<Self> {
		AppConfig {
			name: Self::APP_NAME.to_owned(),
			config_file: Some("config.toml".to_owned()),
			logging: Default::default(),
			database: Default::default(),
			extra: Self::default(),
		}
	}

	fn apply_cli(&mut self, cli: Self::Cli);

	fn pre_hook(_config: &mut AppConfig<Self>) -> anyhow::Result<()> {
		Ok(())
	}
}

impl<T: ConfigExtention> Default for AppConfig<T> {
	fn default() -> Self {
		T::config_default()
	}
}

impl<T: ConfigExtention> AppConfig<T> {
	fn apply_cli(&mut self, cli: Cli<T::Cli>) {
		if let Some(name) = cli.name {
			self.name = name;
		}

		if let Some(level) = cli.logging_level {
			self.logging.level = level;
		}

		if let Some(mode) = cli.logging_mode {
			self.logging.mode = mode;
		}

		if let Some(uri) = cli.database_uri {
			self.database.uri = uri;
		}

		if let Some(max_connections) = cli.database_max_connections {
			self.database.max_connections = max_connections;
		}

		self.extra.apply_cli(cli.extra);
	}
}

impl<T: ConfigExtention + DeserializeOwned> Config for AppConfig<T> {
	fn logging(&self) -> &LoggingConfig {
		&self.logging
	}

	fn parse_from<I, A>(args: I) -> anyhow::Result<Self>
	where
		I: IntoIterator<Item = A>,
		A: Into<OsString> + Clone,
	{
		let cli = match Cli::<T::Cli>::try_parse_from(args) {
			Ok(cli) => cli,
			Err(err) if matches!(err.kind(), clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion) => {
				err.exit()
			}
			Err(err) => return Err(err.into()),
		};

		// An explicitly requested file has to exist, the default one is optional.
		let (path, required) = match &cli.config_file {
			Some(path) => (Some(path.clone()), true),
			None => (Self::default().config_file, false),
		};

		let (mut config, config_file): (Self, _) = common::config::parse_file(path.as_deref(), required)?;

		config.config_file = config_file;
		config.apply_cli(cli);

		Ok(config)
	}

	fn name(&self) -> &str {
		&self.name
	}

	fn pre_hook(&mut self) -> anyhow::Result<()> {
		T::pre_hook(self)
	}
}

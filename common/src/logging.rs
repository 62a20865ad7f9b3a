use std::str::FromStr;

use once_cell::sync::OnceCell;
use tracing_subscriber::layer::Layered;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Layer, Registry};

type FilteredRegistry = Layered<reload::Layer<EnvFilter, Registry>, Registry>;

static RELOAD_HANDLE: OnceCell<reload::Handle<EnvFilter, Registry>> = OnceCell::new();

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
	#[default]
	Default,
	Json,
	Pretty,
	Compact,
}

impl FromStr for Mode {
	type Err = LoggingError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"default" => Ok(Self::Default),
			"json" => Ok(Self::Json),
			"pretty" => Ok(Self::Pretty),
			"compact" => Ok(Self::Compact),
			_ => Err(LoggingError::UnknownMode(s.to_string())),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
	#[error("invalid log filter: {0}")]
	InvalidFilter(#[from] tracing_subscriber::filter::ParseError),
	#[error("unknown logging mode: {0}")]
	UnknownMode(String),
	#[error("failed to init logger: {0}")]
	Init(#[from] tracing_subscriber::util::TryInitError),
	#[error("failed to reload logger: {0}")]
	Reload(#[from] reload::Error),
}

/// Installs the global subscriber on the first call. Later calls only swap
/// the filter, the output mode is fixed once installed.
pub fn init(level: &str, mode: Mode) -> Result<(), LoggingError> {
	let env_filter = EnvFilter::from_str(level)?;

	let handle = RELOAD_HANDLE.get_or_try_init(|| {
		let (filter, handle) = reload::Layer::new(EnvFilter::from_str(level)?);

		let fmt_layer: Box<dyn Layer<FilteredRegistry> + Send + Sync> = match mode {
			Mode::Default => fmt::layer().with_file(true).with_line_number(true).boxed(),
			Mode::Json => fmt::layer().json().with_file(true).with_line_number(true).boxed(),
			Mode::Pretty => fmt::layer().pretty().with_file(true).with_line_number(true).boxed(),
			Mode::Compact => fmt::layer().compact().with_file(true).with_line_number(true).boxed(),
		};

		tracing_subscriber::registry().with(filter).with(fmt_layer).try_init()?;

		Ok::<_, LoggingError>(handle)
	})?;

	handle.reload(env_filter)?;

	Ok(())
}

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;
use common::context::{Context, Handler};
use common::logging;
use common::signal::SignalHandler;
use tokio::signal::unix::SignalKind;
use tokio::{select, time};
pub use traits::{Config, Global};

pub mod config;
pub mod global;
pub mod traits;


/// How long running tasks get to drop their contexts after a shutdown signal.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(60);

/// Runs a service to completion.
///
/// Parses `C`, installs logging, builds the global state `G` and spawns
/// `process` with it. The process runs until SIGINT/SIGTERM arrives or it
/// exits on its own, after which every context is cancelled and given
/// [`SHUTDOWN_GRACE`] to wind down. A second signal skips the wait.
pub async fn bootstrap<C: Config, G: Global<C>, F: Future<Output = anyhow::Result<()>> + Send + 'static>(
	process: impl FnOnce(Arc<G>) -> F,
) -> anyhow::Result<()> {
	let config = load_config::<C>()?;

	logging::init(&config.logging().level, config.logging().mode).context("failed to init logging")?;

	tracing::info!(name = config.name(), "starting up");

	let (ctx, handler) = Context::new();
	let global = Arc::new(G::new(ctx, config).await.context("failed to create global state")?);

	let mut signals = SignalHandler::new()
		.with_signal(SignalKind::interrupt())
		.and_then(|signals| signals.with_signal(SignalKind::terminate()))
		.context("failed to register signal handlers")?;

	let process = tokio::spawn(process(global));

	select! {
		Some(signal) = signals.recv() => tracing::info!(?signal, "received shutdown signal"),
		result = process => report_exit(result),
	}

	shutdown(handler, &mut signals).await;

	Ok(())
}

fn load_config<C: Config>() -> anyhow::Result<C> {
	let mut config = match C::parse() {
		Ok(config) => config,
		Err(err) => {
			// Nothing is configured yet, fall back to a verbose logger so the
			// error below is visible.
			logging::init("trace", Default::default()).ok();
			return Err(err.context("failed to parse config"));
		}
	};

	config.pre_hook().context("config pre hook failed")?;

	Ok(config)
}

fn report_exit(result: Result<anyhow::Result<()>, tokio::task::JoinError>) {
	match result {
		Ok(Ok(())) => tracing::error!("process stopped unexpectedly without an error"),
		Ok(Err(err)) => tracing::error!("process stopped unexpectedly: {:#}", err),
		Err(err) => tracing::error!("process task failed: {}", err),
	}
}

async fn shutdown(handler: Handler, signals: &mut SignalHandler) {
	tracing::info!("waiting for tasks to finish");

	select! {
		_ = handler.cancel() => tracing::info!("shutdown complete"),
		_ = time::sleep(SHUTDOWN_GRACE) => tracing::warn!("grace period elapsed, forcing shutdown"),
		_ = signals.recv() => tracing::warn!("second signal received, forcing shutdown"),
	}
}

use std::sync::Arc;

use anyhow::Context as _;
use binary_helper::global::setup_database;
use binary_helper::{bootstrap, impl_global_traits};
use common::context::Context;
use platform_contact::config::{AppConfig, ContactConfig};
use platform_contact::database::MIGRATOR;

struct GlobalState {
	ctx: Context,
	config: AppConfig,
	db: Arc<sqlx::PgPool>,
}

impl_global_traits!(GlobalState);

impl binary_helper::global::GlobalConfigProvider<ContactConfig> for GlobalState {
	#[inline(always)]
	fn provide_config(&self) -> &ContactConfig {
		&self.config.extra.contact
	}
}

impl binary_helper::Global<AppConfig> for GlobalState {
	async fn new(ctx: Context, config: AppConfig) -> anyhow::Result<Self> {
		let db = setup_database(&config.database, Some(&MIGRATOR)).await?;

		Ok(Self { ctx, config, db })
	}
}

#[tokio::main]
pub async fn main() {
	if let Err(err) = bootstrap::<AppConfig, GlobalState, _>(|global| async move {
		platform_contact::api::run(global)
			.await
			.context("contact server stopped unexpectedly")
	})
	.await
	{
		tracing::error!("{:#}", err);
		std::process::exit(1);
	}
}

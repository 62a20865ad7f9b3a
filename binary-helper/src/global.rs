use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context as _;
use common::config::DatabaseConfig;
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::ConnectOptions;

#[macro_export]
macro_rules! impl_global_traits {
	($struct:ty) => {
		impl binary_helper::global::GlobalCtx for $struct {
			#[inline(always)]
			fn ctx(&self) -> &::common::context::Context {
				&self.ctx
			}
		}

		impl binary_helper::global::GlobalDb for $struct {
			#[inline(always)]
			fn db(&self) -> &::std::sync::Arc<::sqlx::PgPool> {
				&self.db
			}
		}

		impl binary_helper::global::GlobalConfig for $struct {}
	};
}

pub trait GlobalCtx {
	fn ctx(&self) -> &common::context::Context;
}

pub trait GlobalConfig {
	#[inline(always)]
	fn config<C>(&self) -> &C
	where
		Self: GlobalConfigProvider<C>,
	{
		GlobalConfigProvider::provide_config(self)
	}
}

pub trait GlobalConfigProvider<C> {
	fn provide_config(&self) -> &C;
}

pub trait GlobalDb {
	fn db(&self) -> &Arc<sqlx::PgPool>;
}

/// Builds the connection pool and applies any pending migrations.
///
/// The pool itself connects lazily, only the migrator needs a live database
/// at startup.
pub async fn setup_database(config: &DatabaseConfig, migrator: Option<&Migrator>) -> anyhow::Result<Arc<sqlx::PgPool>> {
	let options = PgConnectOptions::from_str(&config.uri)
		.context("failed to parse database uri")?
		.disable_statement_logging();

	let pool = PgPoolOptions::new()
		.max_connections(config.max_connections)
		.connect_lazy_with(options);

	if let Some(migrator) = migrator {
		migrator.run(&pool).await.context("failed to run database migrations")?;
		tracing::info!("database migrations applied");
	}

	Ok(Arc::new(pool))
}

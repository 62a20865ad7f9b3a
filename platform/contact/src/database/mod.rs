use sqlx::migrate::Migrator;

mod error;
mod message;
mod postgres;
mod repository;

pub use error::*;
pub use message::*;
pub use postgres::*;
pub use repository::*;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

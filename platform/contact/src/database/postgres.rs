use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, PgPool, Postgres};

use super::{Message, MessageRepository, StorageError};

/// Postgres backed [`MessageRepository`].
///
/// A connection is checked out of the pool on first use and handed back when
/// the repository is dropped, whichever way the request ends.
pub struct PgMessageRepository<'a> {
	pool: &'a PgPool,
	conn: Option<PoolConnection<Postgres>>,
}

impl<'a> PgMessageRepository<'a> {
	pub fn new(pool: &'a PgPool) -> Self {
		Self { pool, conn: None }
	}

	#[cfg(test)]
	pub(crate) fn is_connected(&self) -> bool {
		self.conn.is_some()
	}

	async fn conn(&mut self) -> Result<&mut PgConnection, StorageError> {
		let conn = match self.conn.take() {
			Some(conn) => conn,
			None => self.pool.acquire().await.map_err(StorageError::Unavailable)?,
		};

		Ok(&mut **self.conn.insert(conn))
	}
}

#[async_trait::async_trait]
impl MessageRepository for PgMessageRepository<'_> {
	async fn create(&mut self, name: &str, email: &str, body: &str) -> Result<i64, StorageError> {
		let id = sqlx::query_scalar::<_, i64>("INSERT INTO messages (name, email, body) VALUES ($1, $2, $3) RETURNING id")
			.bind(name)
			.bind(email)
			.bind(body)
			.fetch_one(self.conn().await?)
			.await?;

		Ok(id)
	}

	async fn find_by_id(&mut self, id: i64) -> Result<Option<Message>, StorageError> {
		let message = sqlx::query_as::<_, Message>("SELECT id, name, email, body, submitted_at FROM messages WHERE id = $1")
			.bind(id)
			.fetch_optional(self.conn().await?)
			.await?;

		Ok(message)
	}

	async fn update(&mut self, id: i64, name: &str, email: &str, body: &str) -> Result<(), StorageError> {
		sqlx::query("UPDATE messages SET name = $1, email = $2, body = $3 WHERE id = $4")
			.bind(name)
			.bind(email)
			.bind(body)
			.bind(id)
			.execute(self.conn().await?)
			.await?;

		Ok(())
	}

	async fn delete(&mut self, id: i64) -> Result<(), StorageError> {
		let result = sqlx::query("DELETE FROM messages WHERE id = $1")
			.bind(id)
			.execute(self.conn().await?)
			.await?;

		tracing::debug!(id, rows = result.rows_affected(), "deleted message");

		Ok(())
	}

	async fn count_by_email_excluding_id(&mut self, email: &str, id: i64) -> Result<i64, StorageError> {
		let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages WHERE email = $1 AND id <> $2")
			.bind(email)
			.bind(id)
			.fetch_one(self.conn().await?)
			.await?;

		Ok(count)
	}

	async fn list_all(&mut self) -> Result<Vec<Message>, StorageError> {
		let messages = sqlx::query_as::<_, Message>(
			"SELECT id, name, email, body, submitted_at FROM messages ORDER BY submitted_at DESC, id DESC",
		)
		.fetch_all(self.conn().await?)
		.await?;

		Ok(messages)
	}
}

use super::{Message, StorageError};

/// Persistence gateway for the `messages` table.
///
/// Every method is a single statement. Implementations are scoped to one
/// request and may hold a connection until dropped.
#[async_trait::async_trait]
pub trait MessageRepository: Send {
	/// Inserts a new row stamped with the current time and returns its id.
	async fn create(&mut self, name: &str, email: &str, body: &str) -> Result<i64, StorageError>;

	async fn find_by_id(&mut self, id: i64) -> Result<Option<Message>, StorageError>;

	/// Only touches `name`, `email` and `body`.
	async fn update(&mut self, id: i64, name: &str, email: &str, body: &str) -> Result<(), StorageError>;

	/// Removing an id that does not exist succeeds.
	async fn delete(&mut self, id: i64) -> Result<(), StorageError>;

	async fn count_by_email_excluding_id(&mut self, email: &str, id: i64) -> Result<i64, StorageError>;

	/// Newest first.
	async fn list_all(&mut self) -> Result<Vec<Message>, StorageError>;
}

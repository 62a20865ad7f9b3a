use crate::database::{Message, MessageRepository, StorageError};

/// Every stored message, newest first. Always read fresh from the repository.
pub async fn handle<R: MessageRepository + ?Sized>(repo: &mut R) -> Result<Vec<Message>, StorageError> {
	repo.list_all().await
}

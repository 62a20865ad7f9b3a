use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::database::{Message, MessageRepository, StorageError};

mod config;
mod postgres;
mod templates;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
	/// Behaves as if no connection could be made.
	Unavailable,
	/// The statement runs but fails.
	Query,
}

impl Failure {
	fn error(self) -> StorageError {
		match self {
			Self::Unavailable => StorageError::Unavailable(sqlx::Error::PoolTimedOut),
			Self::Query => StorageError::Query(sqlx::Error::RowNotFound),
		}
	}
}

/// In memory stand-in for the `messages` table. Every insert is stamped one
/// second after the previous one.
#[derive(Debug, Default)]
pub struct MemoryRepository {
	pub rows: Vec<Message>,
	pub calls: Vec<&'static str>,
	pub fail: Option<Failure>,
	/// Restricts `fail` to one operation.
	pub fail_op: Option<&'static str>,
	next_id: i64,
}

impl MemoryRepository {
	pub fn failing(failure: Failure) -> Self {
		Self {
			fail: Some(failure),
			..Default::default()
		}
	}

	pub fn failing_on(failure: Failure, op: &'static str) -> Self {
		Self {
			fail: Some(failure),
			fail_op: Some(op),
			..Default::default()
		}
	}

	pub fn seed(&mut self, name: &str, email: &str, body: &str) -> i64 {
		self.next_id += 1;
		self.rows.push(Message {
			id: self.next_id,
			name: name.to_string(),
			email: email.to_string(),
			body: body.to_string(),
			submitted_at: epoch() + Duration::seconds(self.next_id),
		});
		self.next_id
	}

	pub fn get(&self, id: i64) -> Option<&Message> {
		self.rows.iter().find(|row| row.id == id)
	}

	fn call(&mut self, op: &'static str) -> Result<(), StorageError> {
		self.calls.push(op);
		match (self.fail, self.fail_op) {
			(Some(failure), None) => Err(failure.error()),
			(Some(failure), Some(only)) if only == op => Err(failure.error()),
			_ => Ok(()),
		}
	}
}

pub fn epoch() -> DateTime<Utc> {
	Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

#[async_trait::async_trait]
impl MessageRepository for MemoryRepository {
	async fn create(&mut self, name: &str, email: &str, body: &str) -> Result<i64, StorageError> {
		self.call("create")?;
		Ok(self.seed(name, email, body))
	}

	async fn find_by_id(&mut self, id: i64) -> Result<Option<Message>, StorageError> {
		self.call("find_by_id")?;
		Ok(self.get(id).cloned())
	}

	async fn update(&mut self, id: i64, name: &str, email: &str, body: &str) -> Result<(), StorageError> {
		self.call("update")?;
		if let Some(row) = self.rows.iter_mut().find(|row| row.id == id) {
			row.name = name.to_string();
			row.email = email.to_string();
			row.body = body.to_string();
		}
		Ok(())
	}

	async fn delete(&mut self, id: i64) -> Result<(), StorageError> {
		self.call("delete")?;
		self.rows.retain(|row| row.id != id);
		Ok(())
	}

	async fn count_by_email_excluding_id(&mut self, email: &str, id: i64) -> Result<i64, StorageError> {
		self.call("count_by_email_excluding_id")?;
		Ok(self.rows.iter().filter(|row| row.email == email && row.id != id).count() as i64)
	}

	async fn list_all(&mut self) -> Result<Vec<Message>, StorageError> {
		self.call("list_all")?;
		let mut rows = self.rows.clone();
		rows.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at).then(b.id.cmp(&a.id)));
		Ok(rows)
	}
}

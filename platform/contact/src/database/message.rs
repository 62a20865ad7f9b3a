use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Message {
	/// Assigned by the database, never changes.
	pub id: i64,
	/// Name of the sender.
	pub name: String,
	/// Contact address of the sender.
	pub email: String,
	/// The message itself.
	pub body: String,
	/// Set once when the row is inserted.
	pub submitted_at: DateTime<Utc>,
}

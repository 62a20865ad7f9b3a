#[derive(Debug, thiserror::Error)]
pub enum StorageError {
	#[error("database unavailable: {0}")]
	Unavailable(#[source] sqlx::Error),
	#[error("constraint violation: {0}")]
	Constraint(#[source] sqlx::Error),
	#[error("query failed: {0}")]
	Query(#[source] sqlx::Error),
}

impl StorageError {
	/// No connection could be established, so there is nothing the request
	/// can do but fail.
	pub fn is_fatal(&self) -> bool {
		matches!(self, Self::Unavailable(_))
	}

	pub fn kind(&self) -> &'static str {
		match self {
			Self::Unavailable(_) => "Unavailable",
			Self::Constraint(_) => "Constraint",
			Self::Query(_) => "Query",
		}
	}
}

impl From<sqlx::Error> for StorageError {
	fn from(err: sqlx::Error) -> Self {
		match &err {
			sqlx::Error::Database(db) if !matches!(db.kind(), sqlx::error::ErrorKind::Other) => Self::Constraint(err),
			_ => Self::Query(err),
		}
	}
}

use serial_test::serial;
use sqlx::PgPool;

use crate::database::{MessageRepository, PgMessageRepository, StorageError, MIGRATOR};

/// Connects to `DATABASE_URL` and empties the table. Returns `None` when no
/// database is configured so the tests are skipped.
async fn pool() -> Option<PgPool> {
	dotenvy::dotenv().ok();

	let url = std::env::var("DATABASE_URL").ok()?;
	let pool = PgPool::connect(&url).await.expect("failed to connect to database");

	MIGRATOR.run(&pool).await.expect("failed to run migrations");
	sqlx::query("TRUNCATE messages RESTART IDENTITY")
		.execute(&pool)
		.await
		.expect("failed to truncate messages");

	Some(pool)
}

#[serial]
#[tokio::test]
async fn test_crud() {
	let Some(pool) = pool().await else {
		return;
	};

	let mut repo = PgMessageRepository::new(&pool);
	assert!(!repo.is_connected());

	let id = repo.create("Alice", "a@test.com", "Hello").await.unwrap();
	assert!(repo.is_connected());

	let message = repo.find_by_id(id).await.unwrap().unwrap();
	assert_eq!(message.name, "Alice");
	assert_eq!(message.email, "a@test.com");
	assert_eq!(message.body, "Hello");

	repo.update(id, "Alicia", "alicia@test.com", "Hello again").await.unwrap();
	let updated = repo.find_by_id(id).await.unwrap().unwrap();
	assert_eq!(updated.name, "Alicia");
	assert_eq!(updated.email, "alicia@test.com");
	assert_eq!(updated.body, "Hello again");
	assert_eq!(updated.submitted_at, message.submitted_at);

	repo.delete(id).await.unwrap();
	assert!(repo.find_by_id(id).await.unwrap().is_none());

	// Deleting again is not an error.
	repo.delete(id).await.unwrap();
}

#[serial]
#[tokio::test]
async fn test_list_and_count() {
	let Some(pool) = pool().await else {
		return;
	};

	let mut repo = PgMessageRepository::new(&pool);
	assert!(repo.list_all().await.unwrap().is_empty());

	let first = repo.create("Bob", "b@test.com", "Hi").await.unwrap();
	let second = repo.create("Bob", "b@test.com", "Hi").await.unwrap();
	let third = repo.create("Carol", "c@test.com", "Hey there").await.unwrap();

	let ids: Vec<i64> = repo.list_all().await.unwrap().iter().map(|m| m.id).collect();
	assert_eq!(ids, vec![third, second, first]);

	assert_eq!(repo.count_by_email_excluding_id("b@test.com", first).await.unwrap(), 1);
	assert_eq!(repo.count_by_email_excluding_id("b@test.com", third).await.unwrap(), 2);
	assert_eq!(repo.count_by_email_excluding_id("c@test.com", third).await.unwrap(), 0);
}

#[serial]
#[tokio::test]
async fn test_query_error_is_not_fatal() {
	let Some(pool) = pool().await else {
		return;
	};

	let mut repo = PgMessageRepository::new(&pool);

	// NUL bytes are rejected by Postgres text columns.
	let err = repo.create("Bad\0Name", "a@test.com", "Hello").await.unwrap_err();
	assert!(!err.is_fatal());
	assert!(!matches!(err, StorageError::Unavailable(_)));
}

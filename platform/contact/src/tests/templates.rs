use chrono::{TimeZone, Utc};
use minijinja::Environment;

use crate::database::Message;
use crate::message::update::EditOutcome;
use crate::message::{FormError, FormOutcome, MessageForm, ValidationError};
use crate::templates;

fn message(id: i64, name: &str, body: &str) -> Message {
	Message {
		id,
		name: name.to_string(),
		email: format!("{}@test.com", name.to_lowercase()),
		body: body.to_string(),
		submitted_at: Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap(),
	}
}

#[test]
fn test_embedded_templates_compile() {
	let mut env = Environment::new();

	for &(name, source) in templates::TEMPLATES {
		if let Err(err) = env.add_template(name, source) {
			panic!("template {name} failed to compile: {err:#}");
		}
	}

	for name in ["create.html", "edit.html", "list.html"] {
		assert!(
			templates::TEMPLATES.iter().any(|&(loaded, _)| loaded == name),
			"{name} is not embedded"
		);
		env.get_template(name).unwrap();
	}
}

#[test]
fn test_list_empty() {
	let page = templates::render_list(&[]).unwrap();

	assert!(page.contains("No messages yet."));
	assert!(!page.contains("/messages/edit?id="));
}

#[test]
fn test_list_rows() {
	let page = templates::render_list(&[message(2, "Bob", "first line\nsecond line"), message(1, "Alice", "Hello")]).unwrap();

	assert!(!page.contains("No messages yet."));
	assert!(page.contains("bob@test.com"));
	assert!(page.contains("first line<br>second line"));
	assert!(page.contains("09/03/2024 14:05"));
	assert!(page.contains(r#"href="/messages/edit?id=2""#));
	assert!(page.contains(r#"name="id" value="1""#));
	assert!(page.find("Bob").unwrap() < page.find("Alice").unwrap());
}

#[test]
fn test_list_escapes_content() {
	let page = templates::render_list(&[message(1, "Mallory", "<script>alert(1)</script>")]).unwrap();

	assert!(!page.contains("<script>alert(1)</script>"));
	assert!(page.contains("&lt;script&gt;"));
}

#[test]
fn test_create_success_banner() {
	let page = templates::render_create(&FormOutcome::persisted(MessageForm::default())).unwrap();

	assert!(page.contains("message added successfully"));
	assert!(!page.contains("Please fix the following errors"));
}

#[test]
fn test_create_errors_keep_values() {
	let outcome = FormOutcome::rejected(
		MessageForm::new("", "not-an-email", "Hello \"you\""),
		vec![
			FormError::Validation(ValidationError::NameRequired),
			FormError::Validation(ValidationError::InvalidEmail),
		],
	);

	let page = templates::render_create(&outcome).unwrap();

	assert!(page.contains("<li>name is required</li>"));
	assert!(page.contains("<li>invalid email</li>"));
	assert!(page.contains(r#"value="not-an-email""#));
	assert!(page.contains("Hello &quot;you&quot;"));
	assert!(!page.contains("message added successfully"));
}

#[test]
fn test_edit_page() {
	let edit = EditOutcome {
		id: 7,
		outcome: FormOutcome::persisted(MessageForm::new("Alice", "a@test.com", "Updated body")),
	};

	let page = templates::render_edit(&edit).unwrap();

	assert!(page.contains(r#"action="/messages/edit?id=7""#));
	assert!(page.contains("message updated successfully"));
	assert!(page.contains(r#"value="Alice""#));
	assert!(page.contains("Updated body"));
}

use std::fmt;

use crate::database::Message;

pub mod create;
pub mod delete;
pub mod list;
pub mod update;
pub mod validation;

pub use validation::{validate, ValidationError, ValidationMode};

pub const CREATED_NOTICE: &str = "message added successfully";
pub const UPDATED_NOTICE: &str = "message updated successfully";

/// How a request reached a handler. Only submissions may change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
	Submission,
	Navigation,
}

impl From<&hyper::Method> for Transport {
	fn from(method: &hyper::Method) -> Self {
		if method == hyper::Method::POST {
			Self::Submission
		} else {
			Self::Navigation
		}
	}
}

/// Raw field values as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct MessageForm {
	pub name: String,
	pub email: String,
	pub body: String,
}

impl MessageForm {
	pub fn new(name: impl Into<String>, email: impl Into<String>, body: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			email: email.into(),
			body: body.into(),
		}
	}

	pub fn trimmed(&self) -> Self {
		Self::new(self.name.trim(), self.email.trim(), self.body.trim())
	}
}

impl From<&Message> for MessageForm {
	fn from(message: &Message) -> Self {
		Self::new(&message.name, &message.email, &message.body)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
	Validation(ValidationError),
	/// The details only go to the logs.
	Storage,
}

impl fmt::Display for FormError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Validation(err) => fmt::Display::fmt(err, f),
			Self::Storage => f.write_str("the message could not be saved, please try again later"),
		}
	}
}

impl From<ValidationError> for FormError {
	fn from(err: ValidationError) -> Self {
		Self::Validation(err)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
	AwaitingInput,
	Rejected,
	Persisted,
}

/// What a form page should show after a handler ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormOutcome {
	pub state: FormState,
	pub form: MessageForm,
	pub errors: Vec<FormError>,
}

impl FormOutcome {
	pub fn awaiting(form: MessageForm) -> Self {
		Self {
			state: FormState::AwaitingInput,
			form,
			errors: Vec::new(),
		}
	}

	pub fn rejected(form: MessageForm, errors: Vec<FormError>) -> Self {
		Self {
			state: FormState::Rejected,
			form,
			errors,
		}
	}

	pub fn persisted(form: MessageForm) -> Self {
		Self {
			state: FormState::Persisted,
			form,
			errors: Vec::new(),
		}
	}

	pub fn success(&self) -> bool {
		self.state == FormState::Persisted
	}
}

/// Parses a message id the way the forms send it. Anything that is not a
/// strictly positive integer is rejected.
pub fn parse_id(raw: Option<&str>) -> Option<i64> {
	raw?.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

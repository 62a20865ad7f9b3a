use email_address::{EmailAddress, Options};

/// Bare addresses only: no display text and the domain needs a TLD.
fn email_options() -> Options {
	Options::default().without_display_text().with_required_tld()
}

/// Bodies shorter than this are only rejected when editing.
pub const MIN_UPDATE_BODY_CHARS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
	Create,
	Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
	#[error("name is required")]
	NameRequired,
	#[error("invalid email")]
	InvalidEmail,
	#[error("message is required")]
	BodyRequired,
	#[error("message must be at least 5 characters")]
	BodyTooShort,
	/// Never produced by [`validate`], the edit flow appends it after asking
	/// the repository.
	#[error("email already used by another message")]
	EmailTaken,
}

/// Checks every rule and returns one error per failing rule, in rule order.
pub fn validate(name: &str, email: &str, body: &str, mode: ValidationMode) -> Vec<ValidationError> {
	let mut errors = Vec::new();

	if name.trim().is_empty() {
		errors.push(ValidationError::NameRequired);
	}

	let email = email.trim();
	if email.is_empty() || EmailAddress::parse_with_options(email, email_options()).is_err() {
		errors.push(ValidationError::InvalidEmail);
	}

	let body = body.trim();
	if body.is_empty() {
		errors.push(ValidationError::BodyRequired);
	} else if mode == ValidationMode::Update && body.chars().count() < MIN_UPDATE_BODY_CHARS {
		errors.push(ValidationError::BodyTooShort);
	}

	errors
}

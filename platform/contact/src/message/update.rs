use super::{parse_id, validate, FormError, FormOutcome, MessageForm, ValidationError, ValidationMode};
use crate::database::{MessageRepository, StorageError};

/// Conditions that end the edit flow before any form is shown.
#[derive(Debug, thiserror::Error)]
pub enum UpdateRejection {
	#[error("invalid id")]
	InvalidId,
	#[error("message not found")]
	NotFound,
	#[error("storage error: {0}")]
	Storage(#[from] StorageError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
	pub id: i64,
	pub outcome: FormOutcome,
}

/// Runs the edit flow for the message addressed by `raw_id`.
///
/// Unlike creation, the body has a minimum length and the email must not be
/// used by any other message.
pub async fn handle<R: MessageRepository + ?Sized>(
	repo: &mut R,
	raw_id: Option<&str>,
	submission: Option<MessageForm>,
) -> Result<EditOutcome, UpdateRejection> {
	let id = parse_id(raw_id).ok_or(UpdateRejection::InvalidId)?;
	let existing = repo.find_by_id(id).await?.ok_or(UpdateRejection::NotFound)?;

	let Some(submission) = submission else {
		return Ok(EditOutcome {
			id,
			outcome: FormOutcome::awaiting(MessageForm::from(&existing)),
		});
	};

	let form = submission.trimmed();

	let mut errors: Vec<FormError> = validate(&form.name, &form.email, &form.body, ValidationMode::Update)
		.into_iter()
		.map(FormError::from)
		.collect();

	if errors.is_empty() {
		match repo.count_by_email_excluding_id(&form.email, id).await {
			Ok(0) => {}
			Ok(_) => errors.push(ValidationError::EmailTaken.into()),
			Err(err) => return storage_failure(id, form, err),
		}
	}

	if !errors.is_empty() {
		return Ok(EditOutcome {
			id,
			outcome: FormOutcome::rejected(form, errors),
		});
	}

	match repo.update(id, &form.name, &form.email, &form.body).await {
		Ok(()) => {
			tracing::info!(id, "message updated");
			Ok(EditOutcome {
				id,
				outcome: FormOutcome::persisted(form),
			})
		}
		Err(err) => storage_failure(id, form, err),
	}
}

fn storage_failure(id: i64, form: MessageForm, err: StorageError) -> Result<EditOutcome, UpdateRejection> {
	if err.is_fatal() {
		return Err(err.into());
	}

	tracing::error!(id, error = %err, kind = err.kind(), "failed to update message");

	Ok(EditOutcome {
		id,
		outcome: FormOutcome::rejected(form, vec![FormError::Storage]),
	})
}

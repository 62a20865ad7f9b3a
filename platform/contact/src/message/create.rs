use super::{validate, FormError, FormOutcome, MessageForm, ValidationMode};
use crate::database::{MessageRepository, StorageError};

/// Runs the create flow. `submission` is `None` when the form is only being
/// viewed.
///
/// Creation never checks whether the email is already in use.
pub async fn handle<R: MessageRepository + ?Sized>(
	repo: &mut R,
	submission: Option<MessageForm>,
) -> Result<FormOutcome, StorageError> {
	let Some(submission) = submission else {
		return Ok(FormOutcome::awaiting(MessageForm::default()));
	};

	let form = submission.trimmed();

	let errors = validate(&form.name, &form.email, &form.body, ValidationMode::Create);
	if !errors.is_empty() {
		return Ok(FormOutcome::rejected(form, errors.into_iter().map(FormError::from).collect()));
	}

	match repo.create(&form.name, &form.email, &form.body).await {
		Ok(id) => {
			tracing::info!(id, "message created");
			Ok(FormOutcome::persisted(MessageForm::default()))
		}
		Err(err) if err.is_fatal() => Err(err),
		Err(err) => {
			tracing::error!(error = %err, kind = err.kind(), "failed to create message");
			Ok(FormOutcome::rejected(form, vec![FormError::Storage]))
		}
	}
}

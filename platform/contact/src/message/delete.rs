use super::{parse_id, Transport};
use crate::database::MessageRepository;

/// What a delete request ended up doing. The caller redirects to the list in
/// every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
	/// Not a form submission, nothing was looked at.
	MethodRejected,
	InvalidId,
	/// The row is gone, whether or not it existed before.
	Removed { id: i64 },
	Failed { id: i64 },
}

pub async fn handle<R: MessageRepository + ?Sized>(repo: &mut R, transport: Transport, raw_id: Option<&str>) -> DeleteOutcome {
	if transport != Transport::Submission {
		return DeleteOutcome::MethodRejected;
	}

	let Some(id) = parse_id(raw_id) else {
		return DeleteOutcome::InvalidId;
	};

	match repo.delete(id).await {
		Ok(()) => DeleteOutcome::Removed { id },
		Err(err) => {
			tracing::error!(id, error = %err, kind = err.kind(), "failed to delete message");
			DeleteOutcome::Failed { id }
		}
	}
}

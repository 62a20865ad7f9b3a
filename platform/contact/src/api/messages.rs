use common::http::ext::{RequestGlobalExt, ResultExt};
use common::http::{see_other, RouteError, TEXT_HTML};
use common::make_response;
use hyper::{Body, Request, Response, StatusCode};

use super::error::{ApiError, Result};
use super::form::FormFields;
use crate::database::{PgMessageRepository, StorageError};
use crate::global::ContactGlobal;
use crate::message::update::UpdateRejection;
use crate::message::{self, MessageForm, Transport};
use crate::templates;

const LIST_PATH: &str = "/messages";

pub async fn create<G: ContactGlobal>(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.get_global::<G, _>()?;
	let submission = read_submission(req).await?;

	let mut repo = PgMessageRepository::new(global.db());

	let outcome = message::create::handle(&mut repo, submission)
		.await
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "database unavailable"))?;

	render(templates::render_create(&outcome))
}

pub async fn list<G: ContactGlobal>(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.get_global::<G, _>()?;

	let mut repo = PgMessageRepository::new(global.db());

	let messages = match message::list::handle(&mut repo).await {
		Ok(messages) => messages,
		Err(err) => return Err(storage_failure(err, "failed to load messages")),
	};

	render(templates::render_list(&messages))
}

pub async fn edit<G: ContactGlobal>(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.get_global::<G, _>()?;
	let query = FormFields::from_query(req.uri());
	let submission = read_submission(req).await?;

	let mut repo = PgMessageRepository::new(global.db());

	let edit = match message::update::handle(&mut repo, query.get("id"), submission).await {
		Ok(edit) => edit,
		Err(UpdateRejection::InvalidId) => return Err((StatusCode::BAD_REQUEST, "invalid id").into()),
		Err(UpdateRejection::NotFound) => return Err((StatusCode::NOT_FOUND, "message not found").into()),
		Err(UpdateRejection::Storage(err)) => return Err(storage_failure(err, "failed to load message")),
	};

	render(templates::render_edit(&edit))
}

/// Always answers with a redirect to the list, whatever happened.
pub async fn delete<G: ContactGlobal>(req: Request<Body>) -> Result<Response<Body>> {
	let global = req.get_global::<G, _>()?;
	let transport = Transport::from(req.method());

	let fields = match transport {
		Transport::Submission => FormFields::from_body(req.into_body()).await.unwrap_or_else(|err| {
			tracing::debug!(error = %err, "ignoring unreadable delete form");
			FormFields::default()
		}),
		Transport::Navigation => FormFields::default(),
	};

	let mut repo = PgMessageRepository::new(global.db());

	let outcome = message::delete::handle(&mut repo, transport, fields.get("id")).await;
	tracing::debug!(?outcome, "delete handled");

	Ok(see_other(LIST_PATH))
}

async fn read_submission(req: Request<Body>) -> Result<Option<MessageForm>> {
	match Transport::from(req.method()) {
		Transport::Submission => Ok(Some(FormFields::from_body(req.into_body()).await?.into_message_form())),
		Transport::Navigation => Ok(None),
	}
}

fn render(page: std::result::Result<String, minijinja::Error>) -> Result<Response<Body>> {
	let page = page.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed to render page"))?;

	Ok(make_response!(StatusCode::OK, TEXT_HTML, page))
}

#[track_caller]
fn storage_failure(err: StorageError, message: &'static str) -> RouteError<ApiError> {
	let message = if err.is_fatal() { "database unavailable" } else { message };

	(StatusCode::INTERNAL_SERVER_ERROR, message, err).into()
}

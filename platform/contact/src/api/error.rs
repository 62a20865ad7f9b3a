use common::http::RouteError;

use crate::database::StorageError;

pub type Result<T, E = RouteError<ApiError>> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
	#[error("failed to parse http body: {0}")]
	ParseHttpBody(#[from] hyper::Error),
	#[error("request body exceeds {limit} bytes")]
	PayloadTooLarge { limit: usize },
	#[error("storage error: {0}")]
	Storage(#[from] StorageError),
	#[error("failed to render template: {0}")]
	Template(#[from] minijinja::Error),
}


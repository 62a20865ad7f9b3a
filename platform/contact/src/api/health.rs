use common::make_response;
use hyper::{Body, Request, Response, StatusCode};

use super::error::Result;

pub async fn health(_: Request<Body>) -> Result<Response<Body>> {
	Ok(make_response!(
		StatusCode::OK,
		"application/json",
		serde_json::json!({ "status": "ok" }).to_string()
	))
}

pub async fn not_found(_: Request<Body>) -> Result<Response<Body>> {
	Err((StatusCode::NOT_FOUND, "not found").into())
}

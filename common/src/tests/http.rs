use hyper::StatusCode;

use crate::http::ext::ResultExt;
use crate::http::{see_other, RouteError, ShouldLog, TEXT_PLAIN};

#[derive(Debug, thiserror::Error)]
#[error("boom")]
struct Boom;

#[tokio::test]
async fn test_route_error_from_status() {
	let err: RouteError<Boom> = (StatusCode::NOT_FOUND, "message not found").into();

	assert_eq!(err.should_log(), ShouldLog::No);

	let resp = err.response();
	assert_eq!(resp.status(), StatusCode::NOT_FOUND);
	assert_eq!(
		resp.headers().get(hyper::header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
		Some(TEXT_PLAIN)
	);

	let body = hyper::body::to_bytes(resp.into_body()).await.expect("failed to read body");
	assert_eq!(&body[..], b"message not found");
}

#[test]
fn test_route_error_should_log() {
	let server: RouteError<Boom> = (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable").into();
	assert_eq!(server.should_log(), ShouldLog::Yes);

	let client: RouteError<Boom> = (StatusCode::BAD_REQUEST, "invalid id", Boom).into();
	assert_eq!(client.should_log(), ShouldLog::Debug);
	assert!(std::error::Error::source(&client).is_some());
}

#[test]
fn test_map_err_route() {
	let res: Result<(), Boom> = Err(Boom);
	let err: RouteError<Boom> = res
		.map_err_route((StatusCode::INTERNAL_SERVER_ERROR, "failed"))
		.expect_err("should be an error");

	assert!(std::error::Error::source(&err).is_some());
	assert_eq!(err.to_string(), "RouteError: boom");
	assert_eq!(err.response().status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_see_other() {
	let resp = see_other("/messages");

	assert_eq!(resp.status(), StatusCode::SEE_OTHER);
	assert_eq!(
		resp.headers().get(hyper::header::LOCATION).and_then(|v| v.to_str().ok()),
		Some("/messages")
	);
}

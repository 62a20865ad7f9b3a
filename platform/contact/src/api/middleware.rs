use std::sync::Arc;

use common::http::RouteError;
use hyper::header::{self, HeaderValue};
use hyper::Body;
use routerify::Middleware;

use super::error::ApiError;
use crate::global::ContactGlobal;

/// Pages may carry visitor input and must never be cached or sniffed.
pub fn response_headers<G: ContactGlobal>(_: &Arc<G>) -> Middleware<Body, RouteError<ApiError>> {
	Middleware::post(|mut resp| async move {
		resp.headers_mut()
			.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
		resp.headers_mut()
			.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

		Ok(resp)
	})
}

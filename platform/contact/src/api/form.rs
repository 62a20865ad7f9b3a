use std::collections::HashMap;

use common::http::ext::ResultExt;
use hyper::body::HttpBody;
use hyper::{Body, StatusCode, Uri};

use super::error::{ApiError, Result};
use crate::message::MessageForm;

/// Largest form body accepted, anything above is answered with 413.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Decoded `application/x-www-form-urlencoded` pairs. A repeated key keeps
/// its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
	pub fn parse(input: &[u8]) -> Self {
		Self(url::form_urlencoded::parse(input).into_owned().collect())
	}

	pub fn from_query(uri: &Uri) -> Self {
		Self::parse(uri.query().unwrap_or_default().as_bytes())
	}

	pub async fn from_body(body: Body) -> Result<Self> {
		Ok(Self::parse(&read_body(body, MAX_BODY_BYTES).await?))
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	/// Missing fields read as empty strings.
	pub fn into_message_form(mut self) -> MessageForm {
		let mut take = |key: &str| self.0.remove(key).unwrap_or_default();

		MessageForm::new(take("name"), take("email"), take("body"))
	}
}

pub async fn read_body(mut body: Body, limit: usize) -> Result<Vec<u8>> {
	let mut buf = Vec::new();

	while let Some(chunk) = body.data().await {
		let chunk = chunk.map_err_route((StatusCode::BAD_REQUEST, "failed to read request body"))?;

		if buf.len() + chunk.len() > limit {
			return Err((StatusCode::PAYLOAD_TOO_LARGE, "request body too large", ApiError::PayloadTooLarge { limit }).into());
		}

		buf.extend_from_slice(&chunk);
	}

	Ok(buf)
}

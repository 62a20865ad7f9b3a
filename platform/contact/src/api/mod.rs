use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use common::http::RouteError;
use hyper::server::conn::Http;
use hyper::Body;
use routerify::{RequestServiceBuilder, Router};
use tokio::net::TcpSocket;
use tokio::select;

use crate::config::ContactConfig;
use crate::global::ContactGlobal;

mod error;
mod form;
mod health;
mod messages;
mod middleware;

pub use error::ApiError;
pub use form::{FormFields, MAX_BODY_BYTES};

const TLS_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

pub fn routes<G: ContactGlobal>(global: &Arc<G>) -> anyhow::Result<Router<Body, RouteError<ApiError>>> {
	let weak = Arc::downgrade(global);

	Router::builder()
		.data(weak)
		.err_handler_with_info(common::http::error_handler::<ApiError>)
		.middleware(middleware::response_headers(global))
		.get("/health", health::health)
		.get("/", messages::create::<G>)
		.post("/", messages::create::<G>)
		.get("/messages", messages::list::<G>)
		.get("/messages/edit", messages::edit::<G>)
		.post("/messages/edit", messages::edit::<G>)
		.any_method("/messages/delete", messages::delete::<G>)
		.any(health::not_found)
		.build()
		.map_err(|err| anyhow::anyhow!("failed to build router: {err}"))
}

async fn tls_acceptor(cert: &str, key: &str) -> anyhow::Result<tokio_rustls::TlsAcceptor> {
	let cert = tokio::fs::read(cert).await.context("failed to read tls cert")?;
	let key = tokio::fs::read(key).await.context("failed to read tls private key")?;

	let key = rustls_pemfile::pkcs8_private_keys(&mut io::BufReader::new(io::Cursor::new(key)))?
		.into_iter()
		.next()
		.map(rustls::PrivateKey)
		.context("no pkcs8 private key found")?;

	let certs = rustls_pemfile::certs(&mut io::BufReader::new(io::Cursor::new(cert)))?
		.into_iter()
		.map(rustls::Certificate)
		.collect();

	Ok(tokio_rustls::TlsAcceptor::from(Arc::new(
		rustls::ServerConfig::builder()
			.with_safe_defaults()
			.with_no_client_auth()
			.with_single_cert(certs, key)?,
	)))
}

pub async fn run<G: ContactGlobal>(global: Arc<G>) -> anyhow::Result<()> {
	let config = global.config::<ContactConfig>();
	tracing::info!("Contact(HTTP) listening on {}", config.bind_address);
	let socket = if config.bind_address.is_ipv6() {
		TcpSocket::new_v6()?
	} else {
		TcpSocket::new_v4()?
	};

	socket.set_reuseaddr(true)?;
	socket.set_reuseport(true)?;
	socket.bind(config.bind_address)?;
	let listener = socket.listen(1024)?;

	let tls_acceptor = match &config.tls {
		Some(tls) => {
			tracing::info!("TLS enabled");
			Some(Arc::new(tls_acceptor(&tls.cert, &tls.key).await?))
		}
		None => None,
	};

	// The router only holds a Weak reference to the global state so that open
	// keep-alive connections do not hold up shutdown.
	let request_service =
		RequestServiceBuilder::new(routes(&global)?).map_err(|err| anyhow::anyhow!("failed to build request service: {err}"))?;

	loop {
		select! {
			_ = global.ctx().done() => {
				return Ok(());
			},
			r = listener.accept() => {
				let (socket, addr) = r?;

				let tls_acceptor = tls_acceptor.clone();
				let service = request_service.build(addr);

				tracing::debug!("Accepted connection from {}", addr);

				tokio::spawn(async move {
					if let Some(tls_acceptor) = tls_acceptor {
						let Ok(Ok(socket)) = tokio::time::timeout(TLS_HANDSHAKE_TIMEOUT, tls_acceptor.accept(socket)).await else {
							return;
						};
						tracing::debug!("TLS handshake complete");
						Http::new().serve_connection(socket, service).await.ok();
					} else {
						Http::new().serve_connection(socket, service).await.ok();
					}
				});
			},
		}
	}
}

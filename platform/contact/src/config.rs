use std::net::SocketAddr;

use binary_helper::config::ConfigExtention;
use common::config::TlsConfig;

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct ContactConfig {
	/// The address to bind to
	pub bind_address: SocketAddr,

	/// TLS configuration
	pub tls: Option<TlsConfig>,
}

impl Default for ContactConfig {
	fn default() -> Self {
		Self {
			bind_address: SocketAddr::from(([0, 0, 0, 0, 0, 0, 0, 0], 8080)),
			tls: None,
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct ExtConfig {
	/// The contact service configuration.
	pub contact: ContactConfig,
}

#[derive(Debug, clap::Args)]
pub struct ContactCli {
	/// Address the HTTP server listens on
	#[arg(long, env = "CONTACT_BIND_ADDRESS")]
	pub bind_address: Option<SocketAddr>,

	/// PEM certificate chain, enables TLS
	#[arg(long, env = "CONTACT_TLS_CERT", requires = "tls_key")]
	pub tls_cert: Option<String>,

	/// PEM PKCS#8 private key
	#[arg(long, env = "CONTACT_TLS_KEY", requires = "tls_cert")]
	pub tls_key: Option<String>,
}

impl ConfigExtention for ExtConfig {
	type Cli = ContactCli;

	const APP_NAME: &'static str = "platform-contact";

	fn apply_cli(&mut self, cli: Self::Cli) {
		if let Some(bind_address) = cli.bind_address {
			self.contact.bind_address = bind_address;
		}

		if let (Some(cert), Some(key)) = (cli.tls_cert, cli.tls_key) {
			self.contact.tls = Some(TlsConfig { cert, key });
		}
	}
}

pub type AppConfig = binary_helper::config::AppConfig<ExtConfig>;

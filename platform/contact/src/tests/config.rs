use std::net::SocketAddr;

use binary_helper::Config;
use common::config::TlsConfig;
use serial_test::serial;

use crate::config::{AppConfig, ContactConfig};

fn clear_env() {
	for (key, _) in std::env::vars() {
		if key.starts_with("CONTACT_") {
			std::env::remove_var(key);
		}
	}
}

#[serial]
#[test]
fn test_defaults() {
	clear_env();

	let config = AppConfig::parse_from(["platform-contact"]).expect("failed to parse config");

	assert_eq!(config.name, "platform-contact");
	assert_eq!(config.extra.contact, ContactConfig::default());
	assert_eq!(config.extra.contact.bind_address, "[::]:8080".parse::<SocketAddr>().unwrap());
	assert_eq!(config.extra.contact.tls, None);
}

#[serial]
#[test]
fn test_file_section() {
	clear_env();

	let tmp_dir = tempfile::tempdir().expect("failed to create temp dir");
	let config_file = tmp_dir.path().join("contact.toml");

	std::fs::write(
		&config_file,
		r#"
[database]
uri = "postgres://contact@db:5432/contact"

[contact]
bind_address = "127.0.0.1:9000"

[contact.tls]
cert = "/etc/contact/cert.pem"
key = "/etc/contact/key.pem"
"#,
	)
	.expect("failed to write config file");

	let config = AppConfig::parse_from(["platform-contact", "--config-file", config_file.to_str().unwrap()])
		.expect("failed to parse config");

	assert_eq!(config.database.uri, "postgres://contact@db:5432/contact");
	assert_eq!(config.extra.contact.bind_address, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
	assert_eq!(
		config.extra.contact.tls,
		Some(TlsConfig {
			cert: "/etc/contact/cert.pem".to_string(),
			key: "/etc/contact/key.pem".to_string(),
		})
	);
}

#[serial]
#[test]
fn test_env_and_cli_override() {
	clear_env();

	std::env::set_var("CONTACT_BIND_ADDRESS", "127.0.0.1:8081");
	std::env::set_var("CONTACT_TLS_CERT", "cert.pem");
	std::env::set_var("CONTACT_TLS_KEY", "key.pem");

	let config = AppConfig::parse_from(["platform-contact", "--bind-address", "0.0.0.0:80"]).expect("failed to parse config");

	assert_eq!(config.extra.contact.bind_address, "0.0.0.0:80".parse::<SocketAddr>().unwrap());
	assert_eq!(
		config.extra.contact.tls,
		Some(TlsConfig {
			cert: "cert.pem".to_string(),
			key: "key.pem".to_string(),
		})
	);

	clear_env();
}

#[serial]
#[test]
fn test_tls_needs_both_files() {
	clear_env();

	let result = AppConfig::parse_from(["platform-contact", "--tls-cert", "cert.pem"]);
	assert!(result.is_err());
}

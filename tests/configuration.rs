use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use serde_json::json;
use telphin_api::config::{DEFAULT_HTTP_VERB, DEFAULT_URL};
use telphin_api::{Adapter, Configuration, Logger, LoggerTarget};

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn defaults_hold_without_reset() {
    let config = Configuration::new();
    assert_eq!(config.site, DEFAULT_URL);
    assert_eq!(config.adapter, Adapter::default());
    assert_eq!(config.max_retries, 2);
    assert_eq!(config.logger.target(), LoggerTarget::Stdout);
    assert!(config.logs_requests());
    assert!(config.logs_errors());
    assert!(!config.logs_responses());
    assert_eq!(DEFAULT_HTTP_VERB, reqwest::Method::POST);
}

#[test]
fn configure_changes_only_what_the_callback_sets() {
    let mut config = Configuration::new();
    config.app_key = Some("key".into());
    let before = config.clone();

    config.configure(|c| c.max_retries = 5);

    assert_eq!(config.max_retries, 5);
    assert_eq!(config.app_key, before.app_key);
    assert_eq!(config.app_secret, before.app_secret);
    assert_eq!(config.site, before.site);
    assert_eq!(config.adapter, before.adapter);
    assert_eq!(config.http_options, before.http_options);
    assert_eq!(config.logger.target(), before.logger.target());
    assert_eq!(config.logger_options(), before.logger_options());
}

#[test]
fn reset_discards_customizations() {
    let capture = Capture::default();
    let mut config = Configuration::new();
    config.configure(|c| {
        c.app_key = Some("key".into());
        c.app_secret = Some("secret".into());
        c.site = "https://example.test/uapi".into();
        c.adapter = Adapter::Http1;
        c.http_options.insert("timeout".into(), json!(30));
        c.max_retries = 9;
        c.logger = Logger::from_writer(capture.clone());
        c.log_requests = false;
        c.log_errors = false;
        c.log_responses = true;
    });
    assert_eq!(config.logger.target(), LoggerTarget::Writer);

    config.reset();

    assert_eq!(config.app_key, None);
    assert_eq!(config.app_secret, None);
    assert_eq!(config.site, DEFAULT_URL);
    assert_eq!(config.adapter, Adapter::Reqwest);
    assert!(config.http_options.is_empty());
    assert_eq!(config.max_retries, 2);
    assert_eq!(config.logger.target(), LoggerTarget::Stdout);
    assert!(config.log_requests);
    assert!(config.log_errors);
    assert!(!config.log_responses);
}

#[test]
fn boolean_readers_follow_the_fields() {
    let mut config = Configuration::new();
    for value in [true, false] {
        config.log_requests = value;
        config.log_errors = !value;
        config.log_responses = value;
        assert_eq!(config.logs_requests(), value);
        assert_eq!(config.logs_errors(), !value);
        assert_eq!(config.logs_responses(), value);
    }
}

#[test]
fn configured_logger_receives_lines() {
    let capture = Capture::default();
    let mut config = Configuration::new();
    config.configure(|c| c.logger = Logger::from_writer(capture.clone()).with_progname("telphin"));

    if config.logs_errors() {
        config.logger.error("request failed");
    }

    let out = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
    assert!(out.contains("ERROR -- telphin: request failed"));
}

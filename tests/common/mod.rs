//! Shared helpers for the integration tests.

use std::sync::{Arc, Mutex};

use fapi_trading::logging::LogSink;
use fapi_trading::{Config, TradingClient};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_API_SECRET: &str = "test-api-secret";

/// Start a mock exchange
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at `server` with a recording log sink
pub fn client_for(server: &MockServer) -> (TradingClient, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let config = Config::new(TEST_API_KEY, TEST_API_SECRET)
        .with_base_url(server.uri())
        .with_log_sink(sink.clone());
    let client = TradingClient::new(config).expect("client should build");
    (client, sink)
}

/// Log sink that keeps every line for inspection
#[derive(Debug, Default)]
pub struct RecordingSink {
    lines: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingSink {
    #[allow(dead_code)]
    pub fn lines(&self, level: &str) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn record(&self, level: &'static str, message: &str) {
        self.lines.lock().unwrap().push((level, message.to_string()));
    }
}

impl LogSink for RecordingSink {
    fn debug(&self, message: &str) {
        self.record("debug", message);
    }

    fn info(&self, message: &str) {
        self.record("info", message);
    }

    fn error(&self, message: &str) {
        self.record("error", message);
    }
}

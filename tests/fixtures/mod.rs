//! Shared test fixtures.

use std::{net::TcpStream, thread, time::Duration};

use fusen_rs::{Config, run_server};

/// A relay server running on its own OS thread for the duration of the
/// test process. Each test uses a dedicated port so tests stay independent.
pub struct TestServer {
    port: u16,
}

impl TestServer {
    /// Start the server on `port` and block until it accepts connections.
    pub fn start(port: u16) -> Self {
        thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().expect("failed to build test runtime");
            rt.block_on(async move {
                let config = Config {
                    host: "127.0.0.1".to_string(),
                    port,
                    ..Config::default()
                };
                if let Err(e) = run_server(config).await {
                    eprintln!("test server error: {e}");
                }
            });
        });

        let server = Self { port };
        server.wait_until_ready();
        server
    }

    fn wait_until_ready(&self) {
        for _ in 0..200 {
            if TcpStream::connect(("127.0.0.1", self.port)).is_ok() {
                return;
            }
            thread::sleep(Duration::from_millis(20));
        }
        panic!("server did not start on port {}", self.port);
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    #[allow(dead_code)] // WebSocket 系テストのみが使う
    pub fn ws_url(&self, connection_id: &str) -> String {
        format!(
            "ws://127.0.0.1:{}/ws?connection_id={}",
            self.port, connection_id
        )
    }
}

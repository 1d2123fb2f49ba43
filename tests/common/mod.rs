//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use hitokoto_api::config::{DeploymentMode, HitokotoConfig};
use hitokoto_api::lifecycle::Shutdown;
use hitokoto_api::HttpServer;
use tempfile::TempDir;

/// Category `a` = ["hi"], category `b` = ["hello world"].
pub const SCENARIO: &[(&str, &str)] = &[
    ("a", r#"[{"id":1,"hitokoto":"hi","from":"greetings"}]"#),
    ("b", r#"[{"id":2,"hitokoto":"hello world","from":"tutorials","from_who":null}]"#),
];

/// Write `<id>.json` files into a fresh temporary directory.
pub fn write_dataset(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (id, content) in files {
        std::fs::write(dir.path().join(format!("{id}.json")), content).unwrap();
    }
    dir
}

pub fn config_for(data_dir: &Path, mode: DeploymentMode) -> HitokotoConfig {
    let mut config = HitokotoConfig::default();
    config.mode = mode;
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.dataset.data_dir = data_dir.to_path_buf();
    config
}

/// A server running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestServer {
    pub async fn start(config: HitokotoConfig) -> Self {
        let server = HttpServer::new(config).unwrap();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server_shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, server_shutdown).await;
        });

        // Accepting starts as soon as the task is polled; yield briefly.
        tokio::time::sleep(Duration::from_millis(50)).await;
        Self { addr, shutdown }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

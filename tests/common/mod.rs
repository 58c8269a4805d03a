//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::sync::mpsc;
use web_starter::config::SiteConfig;
use web_starter::http::HttpServer;
use web_starter::lifecycle::Shutdown;

/// A site running on a fixed local port.
pub struct TestSite {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub config_updates: mpsc::UnboundedSender<SiteConfig>,
    pub handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestSite {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start the site on `addr` and wait until it accepts connections.
pub async fn start_site(addr: SocketAddr, mut config: SiteConfig) -> TestSite {
    config.server.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let (config_updates, updates_rx) = mpsc::unbounded_channel();
    let server = HttpServer::new(config).unwrap();
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move { server.run(listener, updates_rx, server_shutdown).await });

    tokio::time::sleep(Duration::from_millis(200)).await;

    TestSite {
        addr,
        shutdown,
        config_updates,
        handle,
    }
}

/// A client without connection pooling or system proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Encode a solid-color PNG of the given size.
#[allow(dead_code)]
pub fn sample_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 80, 40]));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

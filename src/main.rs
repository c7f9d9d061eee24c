mod api;
mod config;
mod emails;
mod helper_model;
mod integration;
mod methods;
mod model;

use config::CONFIG;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use warp::Filter;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,rv_mail_httpd_rust=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // routing for the server
    let httpd = api::api().and(warp::path::end());
    tracing::info!(bind_addr = %CONFIG.bind_addr, "mail renderer listening");
    // TODO: tls
    warp::serve(httpd).run(CONFIG.bind_addr).await;
}

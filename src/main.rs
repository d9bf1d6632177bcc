//! lectern entry point.

mod app;
mod catalog;
mod commands;
mod config;
mod logging;
mod server;
mod upload;

#[tokio::main]
async fn main() {
    if let Err(e) = app::run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

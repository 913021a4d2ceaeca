use anyhow::Context;
use hrhub::domain::config::ApiConfig;
use hrhub::kernel::config::load_config;
use hrhub_logger::Logger;
use hrhub_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1);
    let cfg: ApiConfig =
        load_config(config_path.as_deref()).context("Critical: Configuration is malformed")?;

    let _log = Logger::from_config(env!("CARGO_PKG_NAME"), &cfg.logging)?.init()?;

    Server::builder().config(cfg).build().await?.run().await
}

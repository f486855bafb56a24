use anyhow::Context;
use freight_proxy::{Config, Server, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. .env, then config, then logging
    dotenv::dotenv().ok();
    let config = Config::from_env();
    setup_environment(&config);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Freight print proxy starting...");

    // 2. Serve until shutdown signal
    let server = Server::new(config);
    server
        .run()
        .await
        .with_context(|| format!("print proxy failed on {}", server.addr()))?;

    Ok(())
}

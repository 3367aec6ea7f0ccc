use clap::Parser;
use faq_server::{ServerConfig, init_tracing, serve};

async fn run() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    config.validate().map_err(anyhow::Error::msg)?;
    serve(config).await
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

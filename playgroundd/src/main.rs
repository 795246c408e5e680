use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use playground_rs::GeminiLLM;

mod args;
mod http;
mod logger;
mod shutdown;

use crate::args::Args;
use crate::http::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    // A missing credential is fatal at startup, never a per-request error.
    let api_key = std::env::var("GEMINI_API_KEY")
        .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY environment variable not set"))?;

    let llm = Arc::new(GeminiLLM::with_base_url(api_key, &args.api_url)?);
    let state = Arc::new(AppState::new(llm, &args.model));
    let app = http::router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, model = %args.model, "playgroundd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await?;
    tracing::info!("playgroundd stopped");
    Ok(())
}

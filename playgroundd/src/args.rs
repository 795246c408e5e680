use clap::Parser;

/// Command line arguments for the playgroundd binary.
#[derive(Parser, Clone, Debug)]
#[command(name = "playgroundd", about = "HTTP backend for the model playground panels")]
pub struct Args {
    /// Address to bind the HTTP listener on
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind the HTTP listener on
    #[arg(long, default_value_t = 8787)]
    pub port: u16,

    /// Model used by all three panels
    #[arg(long, default_value = "gemini-2.5-flash")]
    pub model: String,

    /// Base URL of the generative language API
    #[arg(long = "api-url", default_value = "https://generativelanguage.googleapis.com")]
    pub api_url: String,
}

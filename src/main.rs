use brainstorm_lib::config::load_shared_config;
use brainstorm_lib::file_storage::default_data_dir;
use brainstorm_lib::llm::AnthropicClient;
use brainstorm_lib::server::{self, ServerAppState};
use brainstorm_lib::shutdown::{register_signal_handlers, ShutdownState};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

/// Brainstorm server - mode-based AI brainstorming over HTTP
#[derive(Parser, Debug)]
#[command(name = "brainstorm-server")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Port to bind the server to
    #[arg(long, default_value = "3430")]
    port: u16,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Directory for project files
    #[arg(long, env = "BRAINSTORM_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Scoring config file (TOML). Defaults to the global config location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Allowed CORS origin (repeatable). Any origin is allowed when omitted
    #[arg(long = "cors-origin")]
    cors_origins: Vec<String>,

    /// Anthropic API key
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model used for conversation turns
    #[arg(long, env = "BRAINSTORM_MODEL")]
    model: Option<String>,

    /// Override the LLM API base URL
    #[arg(long)]
    api_base_url: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    env_logger::init();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    rt.block_on(async move {
        let shutdown_state = ShutdownState::new();
        if let Err(e) = register_signal_handlers(shutdown_state.clone()) {
            log::warn!("Failed to register signal handlers: {}", e);
        }

        let config = load_shared_config(cli.config.as_deref());
        let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);

        let mut client = AnthropicClient::new(cli.api_key, cli.model, config.llm_timeout_ms);
        if let Some(base_url) = cli.api_base_url {
            client = client.with_base_url(base_url);
        }
        if !client.has_api_key() {
            log::warn!("No API key configured; send_message will fail until ANTHROPIC_API_KEY is set");
        }

        let state = match ServerAppState::new(
            data_dir,
            config,
            Arc::new(client),
            shutdown_state,
        ) {
            Ok(state) => state,
            Err(e) => {
                eprintln!("Failed to initialise server state: {}", e);
                std::process::exit(1);
            }
        };

        let cors_origins = (!cli.cors_origins.is_empty()).then_some(cli.cors_origins);

        if let Err(e) = server::run_server(cli.port, &cli.bind, state, cors_origins).await {
            eprintln!("Server error: {}", e);
            std::process::exit(1);
        }
    });
}

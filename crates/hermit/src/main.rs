use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use hermit_agent::openai::OpenAiProvider;
use hermit_agent::provider::{ChatRequest, ChatResponse, ProviderError, ReplyProvider};
use hermit_core::config::HermitConfig;
use hermit_fetch::HttpFetcher;
use hermit_session::{Runtime, Supervisor};
use hermit_transport::CredentialStore;

mod console;

/// Personal messaging session orchestrator.
#[derive(Parser)]
#[command(name = "hermit", version, about)]
struct Cli {
    /// Path to hermit.toml (default: ~/.hermit/hermit.toml).
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hermit=info".into()),
        )
        .init();

    let cli = Cli::parse();

    // config: explicit path > HERMIT_CONFIG env > ~/.hermit/hermit.toml
    let config_path = cli.config.or_else(|| std::env::var("HERMIT_CONFIG").ok());
    let config = HermitConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        warn!("config load failed ({e}), using defaults");
        HermitConfig::default()
    });

    let provider = build_provider(&config);
    let fetcher = Arc::new(HttpFetcher::new());
    let runtime = Runtime::new(&config, provider, fetcher);

    let creds = CredentialStore::new(config.session.credentials_file());
    let transport = console::ConsoleTransport::new();
    let supervisor = Supervisor::new(transport, creds, runtime);

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("shutdown requested");
                let _ = shutdown_tx.send(true);
            }
            Err(e) => warn!(error = %e, "signal handler failed"),
        }
    });

    info!(model = %config.agent.model, "hermit starting");
    supervisor.run(shutdown_rx).await?;
    Ok(())
}

/// Build the reply provider from config.
///
/// Priority order: providers.openai, then the OPENAI_API_KEY env var. With
/// neither, a placeholder provider is installed that errors on use — the
/// session still runs, commands work, only generated replies fail.
fn build_provider(config: &HermitConfig) -> Arc<dyn ReplyProvider> {
    if let Some(ref openai) = config.providers.openai {
        info!(base_url = %openai.base_url, "reply provider: OpenAI-compatible");
        return Arc::new(OpenAiProvider::new(
            openai.api_key.clone(),
            Some(openai.base_url.clone()),
        ));
    }
    if let Ok(key) = std::env::var("OPENAI_API_KEY") {
        info!("reply provider: OpenAI-compatible (key from env)");
        return Arc::new(OpenAiProvider::new(key, None));
    }
    warn!("no reply provider configured — auto-replies will fail until one is set");
    Arc::new(NullProvider)
}

/// Placeholder provider when no API key is available.
struct NullProvider;

#[async_trait::async_trait]
impl ReplyProvider for NullProvider {
    fn name(&self) -> &str {
        "null"
    }

    async fn complete(&self, _req: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        Err(ProviderError::Unavailable(
            "no reply provider configured — set providers.openai.api_key in hermit.toml".into(),
        ))
    }
}

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use quiz_forge::api::{create_router, AppState};
use quiz_forge::clients::flexible::{ClientType, FlexibleClient};
use quiz_forge::config::AppConfig;
use quiz_forge::interceptors::FileInterceptor;
use quiz_forge::orchestrator::QuizService;
use quiz_forge::telemetry::init_tracing;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about = "Quiz generation API server", long_about = None)]
#[command(after_help = "ENVIRONMENT VARIABLES:
    LLM_MODEL_ENDPOINT      Azure OpenAI resource endpoint
    LLM_MODEL_API_KEY       Azure OpenAI API key
    LLM_MODEL_DEPLOYMENT    Deployment name
    LLM_MODEL_API_VERSION   API version [default: 2024-06-01]
    QUIZ_CLIENT             azure|mock [default: azure when a key is set]
    QUIZ_TRANSCRIPT_DIR     Write every prompt/reply pair under this directory
    SERVER_HOST, SERVER_PORT")]
struct Args {
    /// Address to bind [default: SERVER_HOST or 0.0.0.0]
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to bind [default: SERVER_PORT or 8080]
    #[arg(short, long)]
    port: Option<u16>,

    /// Model backend [default: QUIZ_CLIENT or auto-detect]
    #[arg(short, long, value_enum)]
    client: Option<ClientType>,

    /// Directory for prompt/reply transcripts
    #[arg(long)]
    transcript_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing(&format!("{}=info", env!("CARGO_CRATE_NAME")));

    let args = Args::parse();
    let mut config = AppConfig::from_env().context("Failed to load configuration")?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(client) = args.client {
        config.client = client;
    }
    if args.transcript_dir.is_some() {
        config.transcript_dir = args.transcript_dir;
    }
    config.validate().context("Invalid configuration")?;

    let client = FlexibleClient::new(config.client, config.azure.clone());
    let mut service = QuizService::new(client);
    if let Some(dir) = &config.transcript_dir {
        let interceptor = FileInterceptor::new(dir.clone());
        info!(path = %interceptor.base_path().display(), "Recording prompt transcripts");
        service = service.with_interceptor(Arc::new(interceptor));
    }

    let app = create_router(AppState::new(service));

    let addr = config.server_addr();
    info!(client = %config.client, deployment = %config.azure.deployment, "Quiz API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Failed to serve application")?;

    Ok(())
}

use anyhow::Context;
use gatehouse::{
    api::routes::build_app,
    cli::{
        init::{self, InitConfig, InitResult},
        output::Output,
        Cli, Commands,
    },
    utils::logging::{init_logging, LogFormat},
    AppState, GatehouseConfig,
};
use std::path::Path;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads secrets from the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match cli.command {
        Some(Commands::Init {
            path,
            force,
            host,
            port,
        }) => {
            let config = InitConfig {
                path,
                force,
                host,
                port,
            };
            match init::run(config, &output) {
                InitResult::Success | InitResult::AlreadyExists => Ok(()),
                InitResult::Error(e) => anyhow::bail!("init failed: {}", e),
            }
        }
        Some(Commands::Serve) | None => serve(&cli.config, cli.verbose, &output).await,
    }
}

async fn serve(config_path: &Path, verbose: bool, output: &Output) -> anyhow::Result<()> {
    let config = match GatehouseConfig::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            output.error(&e.to_string());
            output.hint("Run `gatehouse-server init` to create a configuration");
            return Err(e).with_context(|| format!("loading {}", config_path.display()));
        }
    };

    let level = if verbose {
        "debug".to_string()
    } else {
        config.server.log_level.clone()
    };
    init_logging(&level, LogFormat::parse(&config.server.log_format));

    let jwt_secret = config.jwt_secret()?;
    let address = config.bind_address();
    let token_ttl_secs = config.auth.token_ttl_secs;

    let state = AppState::new(config, &jwt_secret)?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {}", address))?;

    output.banner();
    output.kv("Listening", &format!("http://{}", address));
    output.kv("Token TTL", &format!("{}s", token_ttl_secs));
    info!(address = %address, token_ttl_secs, "Gatehouse server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Gatehouse server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

use load_planner::api;
use load_planner::config::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let dotenv_result = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    if let Err(err) = dotenv_result {
        if !matches!(err, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
        {
            tracing::warn!(error = %err, "could not load .env");
        }
    }

    let app_config = AppConfig::from_env();

    tracing::info!("load planner starting");
    if let Err(err) = api::start_api_server(app_config.api, app_config.projection).await {
        tracing::error!(error = %err, "API server terminated with an error");
        std::process::exit(1);
    }
}

use random_video::{build_router, AppState, Config, PexelsClient, VideoPicker};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_logging()?;

    let config = Config::from_env()?;

    let pexels_client = PexelsClient::with_base_url(
        config.pexels_api_key.clone(),
        config.pexels_api_url.clone(),
    )?;
    if pexels_client.has_api_key() {
        tracing::info!("Pexels API key configured");
    } else {
        tracing::warn!("PEXELS_API_KEY not found. Requests to Pexels will be unauthenticated.");
    }

    if !config.static_dir.is_dir() {
        tracing::warn!("Static directory {} does not exist", config.static_dir.display());
    }

    let state = Arc::new(AppState {
        provider_base_url: pexels_client.base_url().to_string(),
        api_key_configured: pexels_client.has_api_key(),
        picker: VideoPicker::new(Arc::new(pexels_client)),
    });

    let app = build_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server starting on http://{}", listener.local_addr()?);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            "debug,random_video=trace,reqwest=info,hyper=info,tower_http=info".to_string()
        } else {
            "info,random_video=info,reqwest=warn,hyper=warn,tower_http=warn".to_string()
        }
    });

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&log_level))?;

    let fmt_layer = if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .with_thread_ids(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!("Random video server starting up...");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Build mode: {}", if cfg!(debug_assertions) { "development" } else { "production" });
    tracing::info!("Log level: {}", log_level);

    Ok(())
}

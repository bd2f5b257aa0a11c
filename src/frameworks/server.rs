// Framework bootstrap for the slides server runtime.

use crate::domain::ports::SlideGenerator;
use crate::frameworks::config::{AppConfig, GeneratorMode};
use crate::interface_adapters::clients::mock::MockSlideGenerator;
use crate::interface_adapters::clients::triton::{InferenceProxy, TritonClient};
use crate::interface_adapters::credentials::{Argon2PasswordHasher, FileCredentialStore};
use crate::interface_adapters::routes::app;
use crate::interface_adapters::state::{AiSettings, AppState};
use crate::use_cases::tokens::TokenService;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::{io::Result, sync::Arc};
use tokio::sync::Mutex;

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));

    tracing::debug!(json_logs = json, "tracing initialized");
}

pub async fn run(listener: tokio::net::TcpListener, config: AppConfig) -> Result<()> {
    let address = listener.local_addr()?;
    // build state
    let state = build_state(&config).await?;
    let app = app(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let config = AppConfig::from_env();
    tracing::info!(
        generator = config.generator.as_str(),
        port = config.http_port,
        users_file = %config.users_file.display(),
        "configuration loaded"
    );
    let address = SocketAddr::from(([0, 0, 0, 0], config.http_port));

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, config).await
}

pub async fn build_state(config: &AppConfig) -> Result<Arc<AppState>> {
    let users = FileCredentialStore::load(&config.users_file);
    if users.is_empty() {
        tracing::warn!(path = %config.users_file.display(), "no users loaded");
    }

    let tokens = TokenService::new(config.jwt_secret.as_bytes(), config.token_ttl_seconds);
    tracing::debug!(ttl_seconds = tokens.ttl_seconds(), "token service configured");

    let generator: Arc<dyn SlideGenerator> = match config.generator {
        GeneratorMode::Mock => {
            tracing::warn!("using mock slide generator");
            Arc::new(MockSlideGenerator)
        }
        GeneratorMode::Triton => {
            let client = TritonClient::new(
                config.triton_url.clone(),
                config.model_name.clone(),
                config.output_name.clone(),
                config.inference_timeout,
            )
            .map_err(|e| std::io::Error::other(format!("failed to initialize inference client: {e}")))?;
            tracing::debug!(
                triton_url = %config.triton_url,
                model = %config.model_name,
                timeout_ms = config.inference_timeout.as_millis(),
                "inference client configured"
            );
            // A dead server at startup leaves the proxy disconnected for the process lifetime.
            Arc::new(InferenceProxy::connect(client).await)
        }
    };

    Ok(Arc::new(AppState {
        users: Arc::new(users),
        verifier: Arc::new(Argon2PasswordHasher::new()),
        tokens: Arc::new(tokens),
        presentations: Arc::new(Mutex::new(HashMap::new())),
        generator,
        ai_settings: AiSettings {
            generator: config.generator.as_str().to_string(),
            model_name: config.model_name.clone(),
            inference_url: config.triton_url.clone(),
            output_name: config.output_name.clone(),
            timeout_ms: u64::try_from(config.inference_timeout.as_millis()).unwrap_or(u64::MAX),
        },
    }))
}

mod config;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            tracing::warn!(error = %e, "failed to read .env");
        }
    }

    let config = match config::SiteConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    if config.mail.is_none() {
        tracing::warn!("RESEND_API_KEY not set; contact form disabled");
    }
    if config.captcha.is_none() {
        tracing::info!("RECAPTCHA_SECRET not set; contact form accepts submissions without captcha");
    }

    let state = state::AppState::from_config(&config);
    let app = routes::app(state.clone(), &config.website_dir);

    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, port = config.port, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(
        port = config.port,
        posts_dir = %state.blog.dir().display(),
        website_dir = %config.website_dir.display(),
        "site listening"
    );
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        std::process::exit(1);
    }
}

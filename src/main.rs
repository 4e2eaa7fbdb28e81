mod catalog;
mod config;
mod routes;
mod state;
mod tools;

use tools::convert::currency::CurrencyRates;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env().expect("invalid server configuration");

    // A broken rates file falls back to the built-in table.
    let rates = match config.rates_file.as_deref() {
        Some(path) => match CurrencyRates::load(path) {
            Ok(rates) => {
                tracing::info!(path = %path.display(), currencies = rates.len(), base = rates.base(), "currency rates loaded");
                rates
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "currency rates unreadable, using built-in table");
                CurrencyRates::default()
            }
        },
        None => CurrencyRates::default(),
    };

    let addr = config.socket_addr();
    let app = routes::app(state::AppState::new(rates, config));
    let listener = tokio::net::TcpListener::bind(addr).await.expect("failed to bind");

    tracing::info!(%addr, tools = catalog::tools().len(), "toolshelf listening");
    axum::serve(listener, app).await.expect("server failed");
}

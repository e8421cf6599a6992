use board_game_reviews::{run_app, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Error: {:#}", error);
            std::process::exit(1);
        }
    };
    match run_app(&config).await {
        Ok(_) => (),
        Err(error) => tracing::error!("Error: {:#}", error),
    }
}

use dotenvy::dotenv;
use elevators::{api, config, errors::Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    if dotenv().is_ok() {
        info!("Loaded .env file.");
    }

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Open the database and ensure the tables exist
    let db = config::database::init_db(&app_config.database.url)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Serve the API until shutdown
    api::serve(&app_config, db)
        .await
        .inspect_err(|e| error!("Server error: {}", e))
}

use tracing::{info, warn};

use authgate::config::DEV_JWT_SECRET;
use authgate::{AuthService, AuthgateError, Config, Database, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = authgate::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        authgate::logging::init_console_only(&config.logging.level);
    }

    info!("Authgate - account authentication service");

    if config.auth.jwt_secret == DEV_JWT_SECRET {
        warn!("Using the built-in development JWT secret; set [auth].jwt_secret for production");
    }

    if let Err(e) = run(config).await {
        tracing::error!("Fatal: {e}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> authgate::Result<()> {
    let db = Database::open(&config.database.path).await?;
    let service = AuthService::new(&config, &db).await?;

    let server = WebServer::new(&config.server, service);
    info!(
        "Server configured on {}:{}",
        config.server.host, config.server.port
    );

    server.run().await.map_err(AuthgateError::Io)
}

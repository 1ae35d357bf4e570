//! API Gateway for the account service

use std::sync::Arc;

use account_service::{
    AccountService, CustomerClient, HttpCustomerClient, InMemoryAccountRepository, PostgresAccountRepository,
};
use api_gateway::{config::AppConfig, router, AppState};
use clap::Parser;
use common::db::run_migrations;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{debug, info, Level};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

/// Account service API server
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Listening address (defaults to 127.0.0.1:$PORT)
    #[clap(short, long)]
    addr: Option<String>,

    /// Keep accounts in memory instead of PostgreSQL
    #[clap(long)]
    in_memory: bool,

    /// Apply database migrations before serving
    #[clap(long)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging with debug level when DEBUG=1 env var is set
    let env = std::env::var("DEBUG").unwrap_or_else(|_| "0".to_string());
    let log_level = if env == "1" { Level::DEBUG } else { Level::INFO };

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .parse(format!("tower_http={},api_gateway={},account_service={}", log_level, log_level, log_level))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    debug!("Debug logging enabled");

    let config = AppConfig::new();
    let customers: Arc<dyn CustomerClient> = Arc::new(HttpCustomerClient::from_config(&config.service)?);
    info!("Customer service at {}", config.service.customer_service_url);

    // Initialize services
    let account_service = if args.in_memory || config.use_in_memory {
        info!("Using in-memory account repository");
        AccountService::new(Arc::new(InMemoryAccountRepository::new()), customers)
    } else {
        let repo = PostgresAccountRepository::with_config(&config.service).await?;
        if args.migrate || config.run_migrations {
            run_migrations(repo.pool()).await?;
        }
        AccountService::new(Arc::new(repo), customers)
    };

    let state = Arc::new(AppState {
        account_service: Arc::new(account_service),
    });

    let app = router(state, log_level);

    // Start the server
    let addr: std::net::SocketAddr = args.addr.unwrap_or_else(|| config.addr()).parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    // Run until interrupt signal
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}

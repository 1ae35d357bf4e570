use account_service::{AccountService, AccountServiceConfig, PostgresAccountRepository};
use clap::{Parser, Subcommand};
use common::db::run_migrations;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Account Service admin CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Set the log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Database URL (defaults to DATABASE_URL)
    #[arg(short, long, global = true)]
    database_url: Option<String>,

    /// Database pool size
    #[arg(short, long, global = true)]
    pool_size: Option<u32>,

    /// Commands
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,
    /// Print accounts as JSON
    List {
        /// Only accounts of this customer
        #[arg(short, long)]
        customer_id: Option<String>,
    },
    /// Print one account as JSON
    Show {
        /// Account ID
        id: Uuid,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Parse command line arguments
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!("account_service={},common={}", cli.log_level, cli.log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Create config using provided values or env vars
    let mut config = AccountServiceConfig::from_env();
    if let Some(url) = cli.database_url {
        config.database_url = url;
    }
    if let Some(pool_size) = cli.pool_size {
        config.db_pool_size = pool_size;
    }

    match cli.command {
        Commands::Migrate => {
            let repo = PostgresAccountRepository::with_config(&config).await?;
            run_migrations(repo.pool()).await?;
            info!("Migrations applied");
        }
        Commands::List { customer_id } => {
            let service = AccountService::with_config(&config).await?;
            let accounts = match customer_id {
                Some(customer_id) => service.find_by_customer_id(&customer_id).await?,
                None => service.find_all().await?,
            };
            println!("{}", serde_json::to_string_pretty(&accounts)?);
        }
        Commands::Show { id } => {
            let service = AccountService::with_config(&config).await?;
            match service.find_by_id(id).await? {
                Some(account) => println!("{}", serde_json::to_string_pretty(&account)?),
                None => {
                    eprintln!("Account not found: {}", id);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

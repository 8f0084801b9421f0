use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use panelgate::cli::create_admin;
use panelgate::jobs::MailWorker;
use panelgate::router::init_router;
use panelgate::state::init_app_state;
use panelgate::utils::email::mailer_from_config;
use panelgate_cache::{CacheConfig, RedisStore};
use panelgate_config::EmailConfig;
use panelgate_db::{init_db_pool, run_migrations};
use panelgate_observability::{LoggingConfig, init_logging};
use tracing::info;

#[derive(Parser)]
#[command(name = "panelgate")]
#[command(about = "Panelgate - proxy panel API server and tools", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Process queued emails
    Worker,
    /// Create an admin account
    CreateAdmin {
        /// Email address
        email: String,

        /// Password
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let _log_guard = init_logging(&LoggingConfig::from_env());

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve().await,
        Command::Worker => worker().await,
        Command::CreateAdmin { email, password } => {
            let pool = init_db_pool(&database_url()?).await?;
            run_migrations(&pool).await?;

            create_admin(&pool, &email, &password)
                .await
                .map_err(|e| anyhow::anyhow!("Error creating admin: {}", e))?;
            println!("✅ Admin created successfully!");
            println!("   Email: {}", email);
            Ok(())
        }
    }
}

fn database_url() -> anyhow::Result<String> {
    std::env::var("DATABASE_URL").map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))
}

async fn serve() -> anyhow::Result<()> {
    let state = init_app_state().await?;
    run_migrations(&state.db).await?;

    let app = init_router(state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Server running");
    info!("Swagger UI available at /swagger-ui, Scalar UI at /scalar");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

async fn worker() -> anyhow::Result<()> {
    let store = RedisStore::connect(&CacheConfig::from_env()).await?;
    let mailer = mailer_from_config(&EmailConfig::from_env());

    MailWorker::new(Arc::new(store), mailer)
        .run(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;
    Ok(())
}

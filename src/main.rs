use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leaflog::{api, db};

#[derive(Parser)]
#[command(name = "leaflog")]
#[command(about = "Single-user houseplant care tracker")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Leaflog server
    Serve {
        /// Port for the HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Path to the SQLite file (defaults to the user data directory)
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "leaflog=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let (port, db_path) = match cli.command {
        Some(Commands::Serve { port, db }) => (port, db),
        None => (3000, None),
    };

    let db = match db_path {
        Some(path) => db::Database::open(&path)?,
        None => db::Database::open_default()?,
    };
    db.migrate()?;

    let app = api::create_router(db);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("Leaflog listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

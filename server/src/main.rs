use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use employee_server::{
    config::AppConfig,
    http::{self, AppState, ServeConfig},
    seed::seed_employees,
};
use migration::{Migrator, MigratorTrait};
use platform_db::{DatabaseSettings, DbPool, connect};
use platform_obs::{ObsConfig, init_tracing};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "employee-server", version, about = "Employee records service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply pending migrations and start the HTTP server.
    Serve(ServeCommand),
    /// Manage the database schema.
    #[command(subcommand)]
    Migrate(MigrateCommand),
    /// Insert sample employees.
    Seed,
}

#[derive(Subcommand, Debug)]
enum MigrateCommand {
    /// Apply pending migrations.
    Up,
    /// Roll back the most recent migration.
    Down,
    /// Show applied and pending migrations.
    Status,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
}

impl From<ServeCommand> for ServeConfig {
    fn from(value: ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let _obs = init_tracing(ObsConfig::from_env(env!("CARGO_BIN_NAME")))?;
    let cli = Cli::parse();
    match cli.command {
        Command::Serve(cmd) => run_server(cmd).await,
        Command::Migrate(action) => {
            let pool = setup_pool().await?;
            match action {
                MigrateCommand::Up => {
                    Migrator::up(&pool, None).await?;
                    info!("database migrations applied");
                }
                MigrateCommand::Down => {
                    Migrator::down(&pool, Some(1)).await?;
                    info!("most recent migration rolled back");
                }
                MigrateCommand::Status => Migrator::status(&pool).await?,
            }
            Ok(())
        }
        Command::Seed => run_seed().await,
    }
}

async fn setup_pool() -> Result<DbPool> {
    let settings = DatabaseSettings::from_env()?;
    connect(&settings)
        .await
        .context("failed to connect to the database")
}

async fn run_server(cmd: ServeCommand) -> Result<()> {
    let config = Arc::new(AppConfig::load()?);
    let pool = setup_pool().await?;
    Migrator::up(&pool, None)
        .await
        .context("failed to apply migrations")?;
    http::serve(cmd.into(), AppState::new(pool, config)).await
}

async fn run_seed() -> Result<()> {
    let config = Arc::new(AppConfig::load()?);
    let pool = setup_pool().await?;
    let state = AppState::new(pool, config);
    let seeded = seed_employees(state.employees.as_ref()).await?;
    info!(count = seeded.len(), "seed complete");
    Ok(())
}

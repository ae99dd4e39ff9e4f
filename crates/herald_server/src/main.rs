use anyhow::Result;
use clap::Parser;
use herald_core::Settings;
use herald_store::GuildStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Herald dashboard API", long_about = None)]
struct Args {
    /// Path to the settings file, overriding the default candidates
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind, overriding the settings file
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let (settings, settings_path) = match &args.config {
        Some(path) => (Settings::from_file(path)?, path.clone()),
        None => Settings::discover()?,
    };
    info!(path = %settings_path.display(), "Loaded settings");

    let store = Arc::new(GuildStore::new(
        &settings.storage.data_directory,
        settings.bot.permissions.clone(),
    )?);

    let bind_addr = args.bind.unwrap_or(settings.server.bind_addr);
    herald_server::serve(store, &bind_addr).await?;
    Ok(())
}

use std::error::Error;

use services::{AppServices, RandomSource, ServicesOptions};

mod args;
mod commands;

use args::{Args, Command, normalize_sqlite_url, print_usage};

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn Error>> {
    let Some(path) = db_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Ok(());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse(
        std::env::args().skip(1),
        std::env::var("VOCAB_DB_URL").ok(),
    )
    .inspect_err(|_| print_usage())?;

    if args.command == Command::Help {
        print_usage();
        return Ok(());
    }

    let db_url = normalize_sqlite_url(&args.db_url);
    prepare_sqlite_file(&db_url)?;

    let options = ServicesOptions {
        random: args.seed.map_or(RandomSource::Default, RandomSource::seeded),
        ..ServicesOptions::default()
    };
    let services = AppServices::new_sqlite(&db_url, options).await?;
    tracing::debug!(db = %db_url, seeded = args.seed.is_some(), "services ready");

    match args.command {
        Command::Quiz { fresh } => commands::quiz(&services, fresh).await,
        Command::Cards => commands::cards(&services).await,
        Command::Sample => commands::sample(&services).await,
        Command::Sets => commands::sets(&services).await,
        Command::Apply(id) => commands::apply(&services, id).await,
        Command::Delete(id) => commands::delete(&services, id).await,
        Command::Import { name, source } => commands::import(&services, &name, source).await,
        Command::Stats => commands::stats(&services).await,
        Command::Help => Ok(()),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

use clap::{Parser, Subcommand};
use eyre::Result;
use std::path::PathBuf;
use storefront_images::{catalog, pass, Config};
use tracing::info;

#[derive(Debug, Parser)]
#[command(version, about = "Scrape, render and publish storefront product images")]
struct Cli {
    /// TOML file overriding the built-in configuration.
    #[arg(long, short, global = true, env = "STOREFRONT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a placeholder image for every product.
    Placeholders {
        /// Only these product slugs.
        #[arg(long)]
        only: Vec<String>,
    },
    /// Look up real product images on Amazon and Google Images.
    Scrape {
        /// Scrape products that already have a real image too.
        #[arg(long)]
        force: bool,
        /// Only these product slugs.
        #[arg(long)]
        only: Vec<String>,
    },
    /// Download the image URLs found by hand earlier.
    Known {
        /// Replace real images already on disk too.
        #[arg(long)]
        force: bool,
        /// Only these product slugs.
        #[arg(long)]
        only: Vec<String>,
    },
    /// Point the backend's product thumbnails at the image files.
    Update {
        /// Print the planned updates without contacting the backend.
        #[arg(long)]
        dry_run: bool,
    },
    /// List the image files with their sizes.
    Report,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Placeholders { only } => {
            let products = catalog::select(&config.products, &only);
            let written = pass::placeholders(&config, &products)?;
            info!("{} placeholders written to {}", written, config.output_dir.display());
        }
        Command::Scrape { force, only } => {
            let products = catalog::select(&config.products, &only);
            let outcomes = pass::scrape(&config, &products, force).await?;
            let missing: Vec<_> = products
                .iter()
                .zip(&outcomes)
                .filter(|(_, outcome)| **outcome == pass::Outcome::Unresolved)
                .map(|(product, _)| product.slug.as_str())
                .collect();
            if missing.is_empty() {
                info!("every product has an image");
            } else {
                info!("still without image: {}", missing.join(", "));
            }
        }
        Command::Known { force, only } => {
            let products = catalog::select(&config.products, &only);
            let stored = pass::known(&config, &products, force).await?;
            info!("{} known images stored", stored);
        }
        Command::Update { dry_run: true } => {
            for update in pass::planned_updates(&config) {
                println!("{} -> {}", update.remote_id, update.thumbnail);
            }
        }
        Command::Update { dry_run: false } => {
            let report = pass::update(&config).await?;
            for (remote_id, err) in &report.failed {
                println!("ERROR {}: {}", remote_id, err);
            }
        }
        Command::Report => {
            for (name, len) in pass::report(&config.output_dir)? {
                println!("  {}: {} bytes", name, len);
            }
        }
    }
    Ok(())
}

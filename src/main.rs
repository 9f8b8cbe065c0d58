use std::path::Path;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use satcap::app::AppContext;
use satcap::cli::{commands, Cli, Commands};
use satcap::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("satcap=info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            commands::init_config(cli.config.as_deref())?;
        }
        Commands::Links { save } => {
            let ctx = load_context(cli.config.as_deref(), cli.pages)?;
            commands::collect_links(&ctx, save.as_deref()).await?;
        }
        Commands::Describe { from } => {
            let ctx = load_context(cli.config.as_deref(), cli.pages)?;
            commands::describe(&ctx, from.as_deref()).await?;
        }
        Commands::Images { from } => {
            let ctx = load_context(cli.config.as_deref(), cli.pages)?;
            commands::download_images(&ctx, from.as_deref()).await?;
        }
        Commands::Caption { dir, trigger } => {
            let ctx = load_context(cli.config.as_deref(), cli.pages)?;
            commands::add_trigger(&ctx, dir.as_deref(), trigger.as_deref())?;
        }
    }

    Ok(())
}

fn load_context(config_path: Option<&Path>, pages: Option<usize>) -> anyhow::Result<AppContext> {
    let mut config = Config::load(config_path)?;
    if let Some(pages) = pages {
        config.gallery.pages = pages;
    }
    Ok(AppContext::new(config)?)
}

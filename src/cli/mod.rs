pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "satcap")]
#[command(about = "Builds a caption dataset from a public image gallery", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/satcap/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the number of gallery pages to scan
    #[arg(short, long, global = true)]
    pub pages: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect detail-page links from the gallery
    Links {
        /// Save the collected links as JSON
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Write a summarized description file for every detail page
    Describe {
        /// Use links saved by `links --save` instead of crawling
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Download the hi-res image of every detail page
    Images {
        /// Use links saved by `links --save` instead of crawling
        #[arg(long)]
        from: Option<PathBuf>,
    },
    /// Append the style trigger to every caption file
    Caption {
        /// Caption directory (overrides config)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Trigger text (overrides config)
        #[arg(short, long)]
        trigger: Option<String>,
    },
    /// Write the default config file if it does not exist
    Init,
}

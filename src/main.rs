use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use dav_sync::config::{Config, CONFIG_FILE};
use dav_sync::git::{GitRunner, SystemGit};
use dav_sync::sync::Syncer;
use dav_sync::webdav::WebDavStore;

#[derive(Parser)]
#[command(name = "dav-sync")]
#[command(about = "Upload changed logsheets, teams and images to the WebDAV store")]
#[command(version)]
struct Cli {}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let _cli = Cli::parse();

    let cwd = std::env::current_dir().context("Could not determine the current directory")?;
    let toplevel = SystemGit::new(&cwd)
        .run(&["rev-parse", "--show-toplevel"])
        .context("Not inside a git working tree")?;
    let work_dir = PathBuf::from(toplevel.trim());

    let config = Config::load(&work_dir.join(CONFIG_FILE))?;
    let store = WebDavStore::new(&config.base_url, &config.access_token)?;
    let git = SystemGit::new(&work_dir);

    Syncer::new(&store, &work_dir).sync(&git, config.mode)?;

    Ok(())
}

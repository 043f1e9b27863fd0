//! chronotrak - ディレクトリ単位の個人向けタイムトラッカー

mod cli;
mod command;
mod config;
mod database;
mod error;
mod logging;
mod report;

use anyhow::Result;

fn main() -> Result<()> {
    logging::init();
    cli::run()
}

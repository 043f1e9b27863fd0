//! CLIモジュール

use crate::command::{self, Command};
use crate::config::Config;
use crate::database::Database;
use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::io::{self, Write};
use tracing::{debug, info};

/// chronotrak - ディレクトリ単位の個人向けタイムトラッカー
#[derive(Parser, Debug)]
#[command(name = "chronotrak")]
#[command(about = "ディレクトリ単位の個人向けタイムトラッカー", long_about = None)]
// -h や -V もコマンド解析に渡し、未知の動詞として使い方を表示させる
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// コマンドとその引数（list / create / update / stop / delete）
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// CLIエントリポイント
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = Command::parse(cli.args);
    debug!(?command, "コマンドを解析しました");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !command.needs_storage() {
        command::print_usage(&mut out)?;
        return Ok(());
    }

    let cwd = env::current_dir().context("作業ディレクトリを取得できません")?;
    let config = Config::load(&cwd)?;
    info!("データベース: {}", config.db_path.display());

    // スキーマを確立できなければここで終了（非ゼロ終了）
    let db = Database::open(&config.db_path).with_context(|| {
        format!(
            "データベース {} を準備できませんでした",
            config.db_path.display()
        )
    })?;

    command.run(&db, &config, &mut out)?;
    out.flush()?;

    Ok(())
}

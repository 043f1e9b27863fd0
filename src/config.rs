//! 設定モジュール

use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

/// データベースファイル名
pub const DB_FILE_NAME: &str = "chronotrak.db";

/// 一覧表示の開始時刻フォーマット
pub const DEFAULT_STARTED_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// アプリケーション設定
///
/// フラグ・環境変数・設定ファイルは持たず、作業ディレクトリだけで決まる。
#[derive(Debug, Clone)]
pub struct Config {
    /// データベースファイルパス
    pub db_path: PathBuf,
    /// 一覧の開始時刻フォーマット（chronoのstrftime形式）
    pub started_format: String,
}

impl Config {
    /// 作業ディレクトリに対する設定
    pub fn for_dir(dir: &Path) -> Self {
        Self {
            db_path: dir.join(DB_FILE_NAME),
            started_format: DEFAULT_STARTED_FORMAT.to_string(),
        }
    }

    /// 設定を読み込む
    ///
    /// ストアは作業ディレクトリごとに独立する。
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let metadata = fs::metadata(dir)?;
        if !metadata.is_dir() {
            return Err(ConfigError::InvalidValue(format!(
                "ディレクトリではありません: {}",
                dir.display()
            )));
        }

        Ok(Config::for_dir(dir))
    }
}

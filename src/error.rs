//! エラー型定義モジュール

use std::io;
use thiserror::Error;

/// 設定エラー
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IOエラー: {0}")]
    IoError(#[from] io::Error),

    #[error("設定値が不正です: {0}")]
    InvalidValue(String),
}

/// データベースエラー
#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLiteエラー: {0}")]
    SqliteError(#[from] rusqlite::Error),

    #[error("テーブル {0} を作成できませんでした")]
    SchemaMissing(String),

    #[error("不正なID: {0:?}")]
    InvalidId(String),
}

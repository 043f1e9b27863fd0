//! データベースモジュール
//!
//! タスクテーブルのスキーマ管理とCRUDを担当する。
//! CRUD操作はストレージの失敗を呼び出し側に漏らさず、
//! ログに記録した上で `None` / `false` に変換して返す。

use crate::error::DatabaseError;
use chrono::{Local, NaiveDateTime};
use rusqlite::{params, Connection};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// タスクテーブル名
pub const TABLE_NAME: &str = "chronotrak";

/// タスクレコードDTO
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: i64,
    pub message: String,
    pub running: bool,
    pub started_at: NaiveDateTime,
    pub stopped_at: Option<NaiveDateTime>,
}

/// コマンドラインから受け取ったタスクID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskId(pub i64);

impl FromStr for TaskId {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(TaskId)
            .map_err(|_| DatabaseError::InvalidId(s.to_string()))
    }
}

/// データベース管理
pub struct Database {
    conn: Connection,
}

impl Database {
    /// データベースを開く（必要に応じて作成）
    ///
    /// スキーマを確立できなければエラーを返す。呼び出し側はこれを致命的エラーとして扱う。
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path)?;

        let db = Database { conn };
        db.ensure_schema()?;

        Ok(db)
    }

    /// スキーマを保証する
    ///
    /// 何度呼んでも安全。作成後に `sqlite_master` を参照してテーブルの存在を確認する。
    pub fn ensure_schema(&self) -> Result<(), DatabaseError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS chronotrak (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                message TEXT NOT NULL UNIQUE,
                status INTEGER NOT NULL DEFAULT 1,
                started_at TEXT NOT NULL,
                stopped_at TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_chronotrak_started_at
            ON chronotrak(started_at);
            "#,
        )?;

        self.verify_schema()
    }

    /// `sqlite_master` にタスクテーブルがあることを確認
    fn verify_schema(&self) -> Result<(), DatabaseError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(name) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![TABLE_NAME],
            |row| row.get(0),
        )?;
        if count != 1 {
            return Err(DatabaseError::SchemaMissing(TABLE_NAME.to_string()));
        }

        Ok(())
    }

    /// 全タスクを開始時刻の昇順で取得
    pub fn list_tasks(&self) -> Result<Vec<Task>, DatabaseError> {
        self.ensure_schema()?;

        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, message, status, started_at, stopped_at
            FROM chronotrak
            ORDER BY started_at ASC, id ASC
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Task {
                id: row.get(0)?,
                message: row.get(1)?,
                running: row.get::<_, i32>(2)? != 0,
                started_at: row.get(3)?,
                stopped_at: row.get(4)?,
            })
        })?;

        let mut tasks = Vec::new();
        for row in rows {
            tasks.push(row?);
        }

        Ok(tasks)
    }

    /// 実行中のタスクを作成し、採番されたIDを返す
    ///
    /// メッセージの重複などで失敗した場合は `None`。
    pub fn create_task(&self, message: &str) -> Option<i64> {
        let now = Local::now().naive_local();
        or_no_effect("タスクの作成", self.insert_task(message, now).map(Some), None)
    }

    /// タスクを削除（ちょうど1行消えた場合のみ true）
    pub fn delete_task(&self, id: &str) -> bool {
        or_no_effect("タスクの削除", self.try_delete_task(id), false)
    }

    /// メッセージのみを更新（ちょうど1行変わった場合のみ true）
    pub fn update_task(&self, id: &str, message: &str) -> bool {
        or_no_effect("タスクの更新", self.try_update_task(id, message), false)
    }

    /// タスクを停止（ちょうど1行変わった場合のみ true）
    ///
    /// 変更するのは状態のみで、停止時刻は記録しない。
    pub fn stop_task(&self, id: &str) -> bool {
        or_no_effect("タスクの停止", self.try_stop_task(id), false)
    }

    fn insert_task(&self, message: &str, started_at: NaiveDateTime) -> Result<i64, DatabaseError> {
        self.ensure_schema()?;

        self.conn.execute(
            r#"
            INSERT INTO chronotrak (message, status, started_at, stopped_at)
            VALUES (?1, 1, ?2, NULL)
            "#,
            params![message, started_at],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!(id, task = message, "タスクを作成しました");
        Ok(id)
    }

    fn try_delete_task(&self, id: &str) -> Result<bool, DatabaseError> {
        let TaskId(id) = id.parse()?;
        self.ensure_schema()?;

        let changed = self
            .conn
            .execute("DELETE FROM chronotrak WHERE id = ?1", params![id])?;
        Ok(changed == 1)
    }

    fn try_update_task(&self, id: &str, message: &str) -> Result<bool, DatabaseError> {
        let TaskId(id) = id.parse()?;
        self.ensure_schema()?;

        let changed = self.conn.execute(
            "UPDATE chronotrak SET message = ?1 WHERE id = ?2",
            params![message, id],
        )?;
        Ok(changed == 1)
    }

    fn try_stop_task(&self, id: &str) -> Result<bool, DatabaseError> {
        let TaskId(id) = id.parse()?;
        self.ensure_schema()?;

        let changed = self
            .conn
            .execute("UPDATE chronotrak SET status = 0 WHERE id = ?1", params![id])?;
        Ok(changed == 1)
    }
}

/// 失敗をログに記録し、「効果なし」の値に置き換える
fn or_no_effect<T>(action: &str, result: Result<T, DatabaseError>, fallback: T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!("{}に失敗しました: {}", action, e);
            fallback
        }
    }
}

//! コマンドモジュール
//!
//! 先頭引数（小文字化）でコマンドを選び、残りの引数をそのまま渡す。

use crate::config::Config;
use crate::database::Database;
use crate::report;
use anyhow::Result;
use chrono::Local;
use std::io::Write;

/// 使い方
pub const USAGE: &str = "
使い方: chronotrak [COMMAND] arg1 arg2 ..argN

    引数の意味は COMMAND ごとに異なる。COMMAND は次のいずれか:

    list        : 全タスクとそのIDを一覧表示
    create      : 新しいタスクを作成し、計測を開始
    update  ID  : 指定したタスクのメッセージを変更
    stop    ID  : 指定したタスクの計測を停止
    delete  ID  : 指定したタスクを削除

    例:

    chronotrak list
    chronotrak create This is a test issue
    chronotrak update 2 This is the new message string
    chronotrak stop 2
    chronotrak delete 2
";

/// コマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// タスク一覧
    List,
    /// タスク作成（引数を空白で連結したものがメッセージ）
    Create { message: String },
    /// メッセージ更新
    Update { id: Option<String>, message: String },
    /// 計測停止
    Stop { id: Option<String> },
    /// タスク削除
    Delete { id: Option<String> },
    /// 使い方を表示
    Help,
}

impl Command {
    /// 引数列からコマンドを組み立てる
    pub fn parse<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let Some(verb) = args.next() else {
            return Command::Help;
        };
        let rest: Vec<String> = args.collect();

        match verb.to_lowercase().as_str() {
            "list" => Command::List,
            "create" => Command::Create {
                message: rest.join(" "),
            },
            "update" => {
                let mut rest = rest.into_iter();
                let id = rest.next();
                let message = rest.collect::<Vec<_>>().join(" ");
                Command::Update { id, message }
            }
            "stop" => Command::Stop {
                id: rest.into_iter().next(),
            },
            "delete" => Command::Delete {
                id: rest.into_iter().next(),
            },
            _ => Command::Help,
        }
    }

    /// データベースを必要とするか
    pub fn needs_storage(&self) -> bool {
        !matches!(self, Command::Help)
    }

    /// コマンドを実行し、結果を `out` に出力
    pub fn run<W: Write>(&self, db: &Database, config: &Config, out: &mut W) -> Result<()> {
        match self {
            Command::List => {
                let tasks = db.list_tasks()?;
                let now = Local::now().naive_local();
                report::render_tasks(out, &tasks, now, &config.started_format)?;
            }
            Command::Create { message } => match db.create_task(message) {
                Some(id) => writeln!(out, "作成しました。IDは {} です", id)?,
                None => writeln!(out, "タスクを作成できませんでした")?,
            },
            Command::Update { id, message } => match id {
                Some(id) if db.update_task(id, message) => {
                    writeln!(out, "タスクを更新しました")?
                }
                Some(id) => writeln!(
                    out,
                    "タスク {} を更新できませんでした。IDを確認してください",
                    id
                )?,
                None => writeln!(out, "IDを指定してください")?,
            },
            Command::Stop { id } => match id {
                Some(id) if db.stop_task(id) => writeln!(out, "タスクを停止しました")?,
                Some(id) => writeln!(
                    out,
                    "タスク {} を停止できませんでした。IDを確認してください",
                    id
                )?,
                None => writeln!(out, "IDを指定してください")?,
            },
            Command::Delete { id } => match id {
                Some(id) if db.delete_task(id) => writeln!(out, "タスクを削除しました")?,
                Some(id) => writeln!(
                    out,
                    "タスク {} を削除できませんでした。IDを確認してください",
                    id
                )?,
                None => writeln!(out, "IDを指定してください")?,
            },
            Command::Help => print_usage(out)?,
        }

        Ok(())
    }
}

/// 使い方を出力
pub fn print_usage<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", USAGE)
}

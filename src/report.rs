//! 一覧表示モジュール

use crate::database::Task;
use chrono::{DateTime, NaiveDateTime, Utc};
use std::io::{self, Write};

const HEADER: &str = " id      run?    started              Duration  message";
const RULE: &str = "-------------------------------------------------------";

/// 経過秒数を計算
///
/// 停止時刻が無ければ現在時刻までを経過とみなす。
/// `stop` は停止時刻を記録しないため、停止済みタスクも通常はこの扱いになる。
pub fn elapsed_seconds(task: &Task, now: NaiveDateTime) -> i64 {
    let end = task.stopped_at.unwrap_or(now);
    (end - task.started_at).num_seconds().max(0)
}

/// 経過秒数を「HH:MM」形式にフォーマット
///
/// エポックからの時刻として時・分を取り出すため、24時間で一周する。
pub fn format_elapsed(seconds: i64) -> String {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// タスク一覧を表形式で出力
pub fn render_tasks<W: Write>(
    out: &mut W,
    tasks: &[Task],
    now: NaiveDateTime,
    started_format: &str,
) -> io::Result<()> {
    if tasks.is_empty() {
        writeln!(out, "表示するタスクはありません。'create' で作成してください")?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "{}", HEADER)?;
    writeln!(out, "{}", RULE)?;
    for task in tasks {
        let mode = if task.running { "YES" } else { "NO" };
        let start = task.started_at.format(started_format).to_string();
        let delta = format_elapsed(elapsed_seconds(task, now));
        writeln!(
            out,
            "({:4})   {:^4}    {:16}  {:5}     {}",
            task.id, mode, start, delta, task.message
        )?;
    }
    writeln!(out)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_STARTED_FORMAT;
    use chrono::NaiveDate;

    fn at(hour: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 12, 30)
            .unwrap()
            .and_hms_opt(hour, min, sec)
            .unwrap()
    }

    fn task(id: i64, running: bool, stopped_at: Option<NaiveDateTime>) -> Task {
        Task {
            id,
            message: format!("task {}", id),
            running,
            started_at: at(9, 0, 0),
            stopped_at,
        }
    }

    fn render(tasks: &[Task], now: NaiveDateTime) -> String {
        let mut out = Vec::new();
        render_tasks(&mut out, tasks, now, DEFAULT_STARTED_FORMAT).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(59), "00:00");
        assert_eq!(format_elapsed(60), "00:01");
        assert_eq!(format_elapsed(3660), "01:01");
        assert_eq!(format_elapsed(23 * 3600 + 59 * 60), "23:59");
    }

    #[test]
    fn test_format_elapsed_wraps_after_a_day() {
        assert_eq!(format_elapsed(24 * 3600), "00:00");
        assert_eq!(format_elapsed(26 * 3600 + 5 * 60), "02:05");
    }

    #[test]
    fn test_elapsed_running_uses_now() {
        let t = task(1, true, None);
        assert_eq!(elapsed_seconds(&t, at(10, 30, 0)), 5400);
    }

    #[test]
    fn test_elapsed_stopped_uses_stop_time() {
        let t = task(1, false, Some(at(9, 45, 0)));
        assert_eq!(elapsed_seconds(&t, at(18, 0, 0)), 2700);
    }

    #[test]
    fn test_elapsed_stopped_task_counts_to_now() {
        let t = task(1, false, None);
        assert_eq!(elapsed_seconds(&t, at(9, 10, 0)), 600);
    }

    #[test]
    fn test_elapsed_never_negative() {
        let t = task(1, true, None);
        assert_eq!(elapsed_seconds(&t, at(8, 0, 0)), 0);
    }

    #[test]
    fn test_render_empty() {
        let output = render(&[], at(9, 0, 0));
        assert!(output.contains("表示するタスクはありません"));
        assert!(!output.contains("Duration"));
    }

    #[test]
    fn test_render_rows() {
        let tasks = vec![task(1, false, Some(at(10, 5, 0))), task(12, true, None)];
        let output = render(&tasks, at(11, 30, 0));

        assert!(output.contains(HEADER));
        assert!(output.contains("(   1)    NO     2024/12/30 09:00:00  01:05     task 1"));
        assert!(output.contains("(  12)   YES     2024/12/30 09:00:00  02:30     task 12"));
    }

    #[test]
    fn test_render_custom_started_format() {
        let mut out = Vec::new();
        render_tasks(&mut out, &[task(3, true, None)], at(9, 0, 0), "%H:%M").unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("(   3)   YES     09:00"));
        assert!(!output.contains("2024"));
    }
}

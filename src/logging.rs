//! ログインフラモジュール

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// RUST_LOG未設定時のログレベル
///
/// 標準出力のコマンド結果に情報ログが混ざらないよう warn にしている。
pub const DEFAULT_LEVEL: &str = "warn";

/// ログシステムを初期化
///
/// RUST_LOG環境変数でログレベルを設定可能:
/// - error: エラーのみ
/// - warn: 警告以上（デフォルト）
/// - info: 情報以上
/// - debug: デバッグ情報以上
/// - trace: すべて
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    // init() はプロセスで1回しか呼べないため、フィルタのみ検証
    #[test]
    fn test_default_level_is_valid_directive() {
        assert!(EnvFilter::try_new(DEFAULT_LEVEL).is_ok());
    }
}

/// ログ基盤モジュール
///
/// CloudWatch Logsに流すための構造化ログ設定。
/// 受信イベントとレスポンスはWAFログと突き合わせる用途で出力する。
use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ログサブスクライバー初期化用の同期プリミティブ
static INIT: Once = Once::new();

/// デフォルトのログレベル（`RUST_LOG`未設定時）
const DEFAULT_LEVEL: &str = "info";

/// Lambda環境向けのログサブスクライバーを初期化する
///
/// JSON形式（1行1イベント）で出力し、`RUST_LOG`でフィルタリングする。
/// 複数回呼び出しても最初の1回のみ初期化される。
///
/// # 使用例
/// ```ignore
/// use demo_backend::infrastructure::init_logging;
///
/// init_logging();
/// tracing::info!(path = "/health", "リクエスト受信");
/// ```
pub fn init_logging() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

        // フィールドをトップレベルに展開したJSON（CloudWatch Logs Insightsで検索しやすい形）
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .flatten_event(true)
            .with_current_span(false);

        // テストなどで既に初期化済みの場合は無視する
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init();
    });
}

/// テスト用のログサブスクライバーを初期化する（人間が読みやすい形式）
#[cfg(test)]
pub fn init_test_logging() {
    static TEST_INIT: Once = Once::new();

    TEST_INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init();
    });
}

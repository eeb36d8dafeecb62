// レスポンスに含めるタイムスタンプ生成
//
// 形式はISO 8601のUTC、ミリ秒3桁 + `Z`（例: 2024-01-02T03:04:05.678Z）。

use chrono::{DateTime, SecondsFormat, Utc};

/// 指定時刻をレスポンス用の文字列に変換
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 現在時刻のタイムスタンプ文字列
pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

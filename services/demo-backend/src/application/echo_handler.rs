// Kinesis Firehose WAFロギングデモ用ハンドラー
//
// パスによる分岐は行わず、受け取ったリクエスト情報をそのまま返す。

use lambda_http::http::StatusCode;
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::domain::{CorsPolicy, HttpResponse};
use crate::infrastructure::now_timestamp;

use super::event_parser::{parse_direct_invoke_event, ProxyEvent};
use super::invocation::bad_request;

/// レスポンスメッセージ
pub const ECHO_MESSAGE: &str = "Hello from WAF Kinesis Firehose Test API!";

/// 直接呼び出し形式のリクエストをエコーするハンドラー
#[derive(Debug, Default)]
pub struct EchoHandler;

impl EchoHandler {
    /// 新しいハンドラーを作成
    pub fn new() -> Self {
        Self
    }

    /// 生のイベントを処理（現在時刻を使用）
    pub fn handle(&self, event: &Value) -> HttpResponse {
        self.handle_at(event, &now_timestamp())
    }

    /// 生のイベントを指定タイムスタンプで処理
    pub fn handle_at(&self, event: &Value, timestamp: &str) -> HttpResponse {
        info!(event = %event, "イベント受信");

        match parse_direct_invoke_event(event) {
            Ok(proxy) => self.respond(proxy, timestamp),
            Err(err) => {
                warn!(error = %err, "イベントの形式が不正");
                bad_request(CorsPolicy::ECHO, &err, timestamp)
            }
        }
    }

    /// パース済みイベントに応答
    ///
    /// イベントに無いフィールドはボディからも省略し、`null`は`null`のまま返す。
    pub fn respond(&self, proxy: ProxyEvent, timestamp: &str) -> HttpResponse {
        let mut body = Map::new();
        body.insert("message".to_string(), json!(ECHO_MESSAGE));
        body.insert("timestamp".to_string(), json!(timestamp));

        let echoed = [
            ("path", proxy.path),
            ("method", proxy.http_method),
            ("queryStringParameters", proxy.query_string_parameters),
            ("headers", proxy.headers),
        ];
        for (key, value) in echoed {
            if let Some(value) = value {
                body.insert(key.to_string(), value);
            }
        }

        HttpResponse::json(StatusCode::OK, CorsPolicy::ECHO, &Value::Object(body))
    }
}

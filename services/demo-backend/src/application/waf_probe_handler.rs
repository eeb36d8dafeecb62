// S3 WAFロギングデモ用ハンドラー
//
// API Gateway HTTP API (payload v2.0) から呼び出される。
// WAFルール（SQLインジェクション、ボット検出、レート制限）を
// 発火させるための検証用パスを持つ。
// 未知のパスは404ではなく200で案内メッセージを返す。

use lambda_http::http::StatusCode;
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::domain::{CorsPolicy, HttpRequest, HttpResponse, Route, RouteTable};
use crate::infrastructure::{now_timestamp, ServiceConfig};

use super::event_parser::parse_http_api_event;
use super::invocation::{bad_request, Invocation};

/// user-agentヘッダーが無い場合の値
pub const UNKNOWN_USER_AGENT: &str = "Unknown";

/// フォールバックで案内するエンドポイント一覧
pub const ENDPOINTS: [&str; 4] = [
    "/test-sql - Test SQL injection detection",
    "/test-bot - Test bot detection",
    "/test-rate-limit - Test rate limiting",
    "/health - Health check",
];

/// WAF検証用パスを処理するハンドラー
pub struct WafProbeHandler {
    config: ServiceConfig,
    routes: RouteTable<Invocation>,
}

impl WafProbeHandler {
    /// 新しいハンドラーを作成
    pub fn new(config: ServiceConfig) -> Self {
        let routes = RouteTable::new(Route::new("(welcome)", StatusCode::OK, welcome))
            .with_route("/test-sql", StatusCode::OK, test_sql)
            .with_route("/test-bot", StatusCode::OK, test_bot)
            .with_route("/test-rate-limit", StatusCode::OK, test_rate_limit)
            .with_route("/health", StatusCode::OK, health);

        Self { config, routes }
    }

    /// 生のイベントを処理（現在時刻を使用）
    pub fn handle(&self, event: &Value) -> HttpResponse {
        self.handle_at(event, &now_timestamp())
    }

    /// 生のイベントを指定タイムスタンプで処理
    ///
    /// requestContext.httpが欠落したイベントは400を返す。
    pub fn handle_at(&self, event: &Value, timestamp: &str) -> HttpResponse {
        info!(event = %event, "イベント受信");

        let response = match parse_http_api_event(event) {
            Ok(request) => self.respond(request, timestamp),
            Err(err) => {
                warn!(error = %err, "HTTP APIイベントの形式が不正");
                bad_request(CorsPolicy::WAF_PROBE, &err, timestamp)
            }
        };

        info!(
            status_code = response.status_code,
            response = ?response,
            "レスポンス送信"
        );

        response
    }

    /// 正規化済みリクエストに応答
    pub fn respond(&self, request: HttpRequest, timestamp: &str) -> HttpResponse {
        // WAFログと突き合わせるためのリクエスト詳細
        info!(
            method = %request.method,
            path = %request.path,
            query = ?request.query,
            headers = ?request.headers,
            "リクエスト受信"
        );

        let dispatch = self.routes.resolve(&request.path);
        info!(route = dispatch.route().path, "エンドポイント処理");

        let invocation = Invocation {
            request,
            config: self.config.clone(),
            timestamp: timestamp.to_string(),
        };
        let (status, body) = dispatch.route().respond(&invocation);

        HttpResponse::json(status, CorsPolicy::WAF_PROBE, &body)
    }
}

fn test_sql(invocation: &Invocation) -> Value {
    json!({
        "message": "SQL injection test endpoint",
        "query": invocation.request.query,
        "timestamp": invocation.timestamp,
    })
}

fn test_bot(invocation: &Invocation) -> Value {
    let user_agent = invocation
        .request
        .header("user-agent")
        .filter(|ua| !ua.is_empty())
        .unwrap_or(UNKNOWN_USER_AGENT);

    json!({
        "message": "Bot detection test endpoint",
        "userAgent": user_agent,
        "timestamp": invocation.timestamp,
    })
}

fn test_rate_limit(invocation: &Invocation) -> Value {
    let mut body = Map::new();
    body.insert("message".to_string(), json!("Rate limit test endpoint"));
    // sourceIpが無い場合はキーごと省略する
    if let Some(ip) = &invocation.request.source_ip {
        body.insert("clientIp".to_string(), json!(ip));
    }
    body.insert("timestamp".to_string(), json!(invocation.timestamp));

    Value::Object(body)
}

fn health(invocation: &Invocation) -> Value {
    json!({
        "status": "healthy",
        "timestamp": invocation.timestamp,
    })
}

fn welcome(invocation: &Invocation) -> Value {
    json!({
        "message": "Welcome to WAF S3 Logging Demo",
        "endpoints": ENDPOINTS,
        "timestamp": invocation.timestamp,
    })
}

// ALB連携デモ用ハンドラー
//
// ALBターゲットグループから呼び出され、固定のパステーブルで応答する。
// 未知のパスは404を返す。

use lambda_http::http::StatusCode;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::domain::{CorsPolicy, HttpRequest, HttpResponse, Route, RouteTable};
use crate::infrastructure::{now_timestamp, ServiceConfig};

use super::event_parser::parse_alb_event;
use super::invocation::{bad_request, Invocation};

/// サービス名（/api/infoで返す）
pub const SERVICE_NAME: &str = "Lambda ALB Example";

/// サービスバージョン（/api/infoで返す）
pub const SERVICE_VERSION: &str = "1.0.0";

/// ルートパスで案内するエンドポイント一覧
pub const ENDPOINTS: [&str; 3] = [
    "/health - Health check endpoint",
    "/api/hello - Hello endpoint",
    "/api/info - Service information",
];

/// ALB形式のリクエストを処理するハンドラー
pub struct AlbHandler {
    config: ServiceConfig,
    routes: RouteTable<Invocation>,
}

impl AlbHandler {
    /// 新しいハンドラーを作成
    pub fn new(config: ServiceConfig) -> Self {
        let routes = RouteTable::new(Route::new("(not found)", StatusCode::NOT_FOUND, not_found))
            .with_route("/health", StatusCode::OK, health)
            .with_route("/api/hello", StatusCode::OK, hello)
            .with_route("/api/info", StatusCode::OK, info_body)
            .with_route("/", StatusCode::OK, welcome);

        Self { config, routes }
    }

    /// 生のイベントを処理（現在時刻を使用）
    pub fn handle(&self, event: &Value) -> HttpResponse {
        self.handle_at(event, &now_timestamp())
    }

    /// 生のイベントを指定タイムスタンプで処理
    ///
    /// 同じイベントとタイムスタンプからは常に同じレスポンスが得られる。
    pub fn handle_at(&self, event: &Value, timestamp: &str) -> HttpResponse {
        info!(event = %event, "イベント受信");

        match parse_alb_event(event) {
            Ok(request) => self.respond(request, timestamp),
            Err(err) => {
                warn!(error = %err, "ALBイベントの形式が不正");
                bad_request(CorsPolicy::ALB, &err, timestamp)
            }
        }
    }

    /// 正規化済みリクエストに応答
    pub fn respond(&self, request: HttpRequest, timestamp: &str) -> HttpResponse {
        info!(path = %request.path, method = %request.method, "リクエスト解析完了");

        let dispatch = self.routes.resolve(&request.path);
        if dispatch.is_fallback() {
            info!(path = %request.path, "未知のパス");
        } else {
            info!(route = dispatch.route().path, "エンドポイント処理");
        }

        let invocation = Invocation {
            request,
            config: self.config.clone(),
            timestamp: timestamp.to_string(),
        };
        let (status, body) = dispatch.route().respond(&invocation);

        HttpResponse::json(status, CorsPolicy::ALB, &body)
    }
}

fn health(invocation: &Invocation) -> Value {
    json!({
        "status": "healthy",
        "timestamp": invocation.timestamp,
        "environment": invocation.config.environment,
    })
}

fn hello(invocation: &Invocation) -> Value {
    json!({
        "message": "Hello from Lambda!",
        "timestamp": invocation.timestamp,
        "method": invocation.request.method,
        "path": invocation.request.path,
    })
}

fn info_body(invocation: &Invocation) -> Value {
    let mut body = json!({
        "service": SERVICE_NAME,
        "version": SERVICE_VERSION,
        "environment": invocation.config.environment,
        "timestamp": invocation.timestamp,
    });

    // AWS_REGION未設定時はキーごと省略する
    if let (Some(region), Some(map)) = (&invocation.config.region, body.as_object_mut()) {
        map.insert("region".to_string(), Value::String(region.clone()));
    }

    body
}

fn welcome(invocation: &Invocation) -> Value {
    json!({
        "message": "Welcome to Lambda ALB Example",
        "endpoints": ENDPOINTS,
        "timestamp": invocation.timestamp,
    })
}

fn not_found(invocation: &Invocation) -> Value {
    json!({
        "error": "Not Found",
        "message": format!("Path {} not found", invocation.request.path),
        "timestamp": invocation.timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::logging::init_test_logging;

    const TS: &str = "2024-06-01T12:00:00.000Z";

    fn handler() -> AlbHandler {
        init_test_logging();
        AlbHandler::new(ServiceConfig::new("staging", Some("ap-northeast-1".to_string())))
    }

    fn call(event: Value) -> (HttpResponse, Value) {
        let response = handler().handle_at(&event, TS);
        let body = response.body_json().unwrap();
        (response, body)
    }

    #[test]
    fn test_health() {
        let (response, body) = call(json!({"path": "/health", "httpMethod": "GET"}));

        assert_eq!(response.status_code, 200);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["environment"], "staging");
        assert_eq!(body["timestamp"], TS);
    }

    #[test]
    fn test_hello_echoes_method_and_path() {
        let (response, body) = call(json!({"path": "/api/hello", "httpMethod": "POST"}));

        assert_eq!(response.status_code, 200);
        assert_eq!(body["message"], "Hello from Lambda!");
        assert_eq!(body["method"], "POST");
        assert_eq!(body["path"], "/api/hello");
    }

    #[test]
    fn test_info_includes_region() {
        let (response, body) = call(json!({"path": "/api/info"}));

        assert_eq!(response.status_code, 200);
        assert_eq!(body["service"], "Lambda ALB Example");
        assert_eq!(body["version"], "1.0.0");
        assert_eq!(body["environment"], "staging");
        assert_eq!(body["region"], "ap-northeast-1");
    }

    #[test]
    fn test_info_omits_region_when_unset() {
        init_test_logging();
        let handler = AlbHandler::new(ServiceConfig::new("dev", None));

        let response = handler.handle_at(&json!({"path": "/api/info"}), TS);
        let body = response.body_json().unwrap();

        assert!(body.get("region").is_none());
        assert_eq!(body["environment"], "dev");
    }

    #[test]
    fn test_missing_path_returns_welcome() {
        let (response, body) = call(json!({"httpMethod": "GET"}));

        assert_eq!(response.status_code, 200);
        assert_eq!(body["message"], "Welcome to Lambda ALB Example");
        assert_eq!(body["endpoints"].as_array().unwrap().len(), 3);
        assert_eq!(body["endpoints"][0], "/health - Health check endpoint");
    }

    #[test]
    fn test_non_string_query_and_headers_are_accepted() {
        let (response, body) = call(json!({
            "path": "/health",
            "httpMethod": "GET",
            "headers": {"x-retry": 3},
            "queryStringParameters": {"n": 1}
        }));

        assert_eq!(response.status_code, 200);
        assert_eq!(body["status"], "healthy");
    }

    #[test]
    fn test_unknown_path_returns_404() {
        let (response, body) = call(json!({"path": "/unknown-xyz"}));

        assert_eq!(response.status_code, 404);
        assert_eq!(body["error"], "Not Found");
        assert!(body["message"].as_str().unwrap().contains("/unknown-xyz"));
    }

    #[test]
    fn test_every_response_has_fixed_headers() {
        for path in ["/health", "/api/hello", "/api/info", "/", "/nope"] {
            let (response, _) = call(json!({"path": path}));

            assert_eq!(response.headers["Content-Type"], "application/json");
            assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
            assert_eq!(
                response.headers["Access-Control-Allow-Methods"],
                "GET, POST, PUT, DELETE, OPTIONS"
            );
            assert_eq!(response.headers["Access-Control-Allow-Headers"], "Content-Type");
        }
    }

    #[test]
    fn test_same_input_same_output() {
        let event = json!({"path": "/api/hello", "httpMethod": "GET", "headers": {"a": "b"}});
        let handler = handler();

        assert_eq!(handler.handle_at(&event, TS), handler.handle_at(&event, TS));
    }

    #[test]
    fn test_malformed_event_returns_400() {
        let (response, body) = call(json!("not an object"));

        assert_eq!(response.status_code, 400);
        assert_eq!(response.headers["Content-Type"], "application/json");
        assert_eq!(body["error"], "Bad Request");
    }

    #[test]
    fn test_handle_uses_current_timestamp() {
        let response = handler().handle(&json!({"path": "/health"}));
        let body = response.body_json().unwrap();

        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }
}

// 1回の呼び出しでボディビルダーに渡すコンテキスト

use lambda_http::http::StatusCode;
use serde_json::json;

use crate::domain::{CorsPolicy, HttpRequest, HttpResponse};
use crate::infrastructure::ServiceConfig;

use super::EventParseError;

/// ルートのボディビルダーに渡すコンテキスト
#[derive(Debug, Clone)]
pub struct Invocation {
    /// 正規化済みリクエスト
    pub request: HttpRequest,
    /// サービス設定
    pub config: ServiceConfig,
    /// レスポンスに埋め込むタイムスタンプ
    pub timestamp: String,
}

/// 不正なイベントに対する400レスポンス
///
/// パース失敗でLambda呼び出し自体を失敗させず、
/// 通常のレスポンスと同じヘッダーで理由を返す。
pub fn bad_request(cors: CorsPolicy, error: &EventParseError, timestamp: &str) -> HttpResponse {
    HttpResponse::json(
        StatusCode::BAD_REQUEST,
        cors,
        &json!({
            "error": "Bad Request",
            "message": error.to_string(),
            "timestamp": timestamp,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_response() {
        let response = bad_request(
            CorsPolicy::WAF_PROBE,
            &EventParseError::MissingRequestContext,
            "2024-01-01T00:00:00.000Z",
        );

        assert_eq!(response.status_code, 400);
        assert_eq!(response.headers["Content-Type"], "application/json");

        let body = response.body_json().unwrap();
        assert_eq!(body["error"], "Bad Request");
        assert_eq!(body["message"], "missing requestContext in event");
        assert_eq!(body["timestamp"], "2024-01-01T00:00:00.000Z");
    }
}

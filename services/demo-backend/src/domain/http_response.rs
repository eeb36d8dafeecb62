// Lambdaプロキシ統合形式のHTTPレスポンス
//
// ALB / API Gatewayが解釈する `{statusCode, headers, body}` 形式。

use std::collections::BTreeMap;

use lambda_http::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::cors::CorsPolicy;

/// プロキシ統合レスポンス
///
/// bodyは常にシリアライズ済みのJSON文字列。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    /// HTTPステータスコード
    pub status_code: u16,
    /// レスポンスヘッダー
    pub headers: BTreeMap<String, String>,
    /// JSON文字列のボディ
    pub body: String,
}

impl HttpResponse {
    /// JSONボディとCORSヘッダー付きのレスポンスを構築
    ///
    /// # Arguments
    /// * `status` - HTTPステータス
    /// * `cors` - 付与するCORSポリシー
    /// * `body` - ボディとなるJSON値
    pub fn json(status: StatusCode, cors: CorsPolicy, body: &Value) -> Self {
        Self {
            status_code: status.as_u16(),
            headers: cors.response_headers(),
            body: body.to_string(),
        }
    }

    /// ボディをJSON値としてパース
    pub fn body_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_response_fields() {
        let response = HttpResponse::json(
            StatusCode::NOT_FOUND,
            CorsPolicy::ALB,
            &json!({"error": "Not Found"}),
        );

        assert_eq!(response.status_code, 404);
        assert_eq!(response.headers["Content-Type"], "application/json");
        assert_eq!(response.body_json().unwrap()["error"], "Not Found");
    }

    #[test]
    fn test_serializes_in_proxy_integration_shape() {
        let response = HttpResponse::json(StatusCode::OK, CorsPolicy::ECHO, &json!({"a": 1}));
        let value = serde_json::to_value(&response).unwrap();

        // Lambdaプロキシ統合が要求するキー名
        assert_eq!(value["statusCode"], 200);
        assert!(value["headers"].is_object());
        assert_eq!(value["body"], r#"{"a":1}"#);
        assert_eq!(value.as_object().unwrap().len(), 3);
    }
}

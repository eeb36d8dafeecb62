// CORSレスポンスヘッダー
//
// 全レスポンス（成功・失敗問わず）に付与する固定ヘッダーを定義する。
// Allow-Methods / Allow-Headers の内容はバリアントごとに異なる。

use std::collections::BTreeMap;

/// Content-Typeヘッダー名
pub const CONTENT_TYPE: &str = "Content-Type";
/// Access-Control-Allow-Originヘッダー名
pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
/// Access-Control-Allow-Methodsヘッダー名
pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
/// Access-Control-Allow-Headersヘッダー名
pub const ACCESS_CONTROL_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";

/// レスポンスのContent-Type（全バリアント共通）
pub const APPLICATION_JSON: &str = "application/json";

/// CORSポリシー
///
/// Originは常に`*`。メソッドとヘッダーの許可リストのみ可変。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorsPolicy {
    /// Access-Control-Allow-Methodsの値
    pub allow_methods: &'static str,
    /// Access-Control-Allow-Headersの値
    pub allow_headers: &'static str,
}

impl CorsPolicy {
    /// ALB連携デモ用
    pub const ALB: CorsPolicy = CorsPolicy {
        allow_methods: "GET, POST, PUT, DELETE, OPTIONS",
        allow_headers: "Content-Type",
    };

    /// Kinesis Firehoseロギングデモ用（エコー）
    pub const ECHO: CorsPolicy = CorsPolicy {
        allow_methods: "GET, POST, PUT, DELETE, OPTIONS",
        allow_headers: "Content-Type, Authorization",
    };

    /// S3ロギングデモ用（WAFルール検証パス）
    pub const WAF_PROBE: CorsPolicy = CorsPolicy {
        allow_methods: "GET, POST, OPTIONS",
        allow_headers: "Content-Type, Authorization, X-API-Key",
    };

    /// レスポンスに付与するヘッダー一式を生成
    ///
    /// - Content-Type: application/json
    /// - Access-Control-Allow-Origin: *
    /// - Access-Control-Allow-Headers: ポリシーの値
    /// - Access-Control-Allow-Methods: ポリシーの値
    pub fn response_headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();

        headers.insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN.to_string(), "*".to_string());
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS.to_string(),
            self.allow_headers.to_string(),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS.to_string(),
            self.allow_methods.to_string(),
        );

        headers
    }
}

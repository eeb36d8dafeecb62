/// Lambdaイベントパーサー
///
/// プラットフォームごとのイベント形式から`HttpRequest`を抽出する。
/// フィールドの存在を仮定せず、欠落時はデフォルト値または明示的なエラーを返す。
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::domain::{headers_from_value, query_from_value, HttpRequest};

/// ALB形式でpathが無い場合のデフォルト
pub const DEFAULT_PATH: &str = "/";

/// httpMethod / methodが無い場合のデフォルト
pub const DEFAULT_METHOD: &str = "GET";

/// イベントパースエラー
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EventParseError {
    /// イベントがJSONオブジェクトでない
    #[error("event must be a JSON object")]
    NotAnObject,

    /// フィールドの型が想定と異なる
    #[error("invalid event envelope: {0}")]
    InvalidEnvelope(String),

    /// requestContextが欠落
    #[error("missing requestContext in event")]
    MissingRequestContext,

    /// requestContext.httpが欠落
    #[error("missing requestContext.http in event")]
    MissingHttpContext,

    /// requestContext.http配下の必須フィールドが欠落
    #[error("missing requestContext.http.{0} in event")]
    MissingField(&'static str),
}

impl From<serde_json::Error> for EventParseError {
    fn from(err: serde_json::Error) -> Self {
        EventParseError::InvalidEnvelope(err.to_string())
    }
}

/// ALB形式のイベント
///
/// 全フィールドが任意。`null`も未設定として扱う。
/// headers / queryStringParametersは値の型を検証しない。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlbEvent {
    path: Option<String>,
    http_method: Option<String>,
    headers: Option<Value>,
    query_string_parameters: Option<Value>,
}

/// 直接呼び出し形式のイベント（API Gateway REST / Lambda直接実行）
///
/// エコー用途のため値は加工せずに保持する。
/// キーが無い場合は`None`、`null`が明示された場合は`Some(Value::Null)`になる。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyEvent {
    /// リクエストパス
    #[serde(default, deserialize_with = "present")]
    pub path: Option<Value>,
    /// HTTPメソッド
    #[serde(default, deserialize_with = "present")]
    pub http_method: Option<Value>,
    /// リクエストヘッダー
    #[serde(default, deserialize_with = "present")]
    pub headers: Option<Value>,
    /// クエリパラメータ
    #[serde(default, deserialize_with = "present")]
    pub query_string_parameters: Option<Value>,
}

/// キーが存在すれば`null`を含めてそのまま`Some`にする
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// API Gateway HTTP API (payload v2.0) 形式のイベント
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HttpApiEvent {
    request_context: Option<HttpApiRequestContext>,
    headers: Option<Value>,
    query_string_parameters: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct HttpApiRequestContext {
    http: Option<HttpApiHttp>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HttpApiHttp {
    method: Option<String>,
    path: Option<String>,
    query_string_parameters: Option<Value>,
    headers: Option<Value>,
    source_ip: Option<String>,
}

/// ALB形式のイベントをパース
///
/// path / httpMethod / headers はすべて任意で、欠落時はデフォルト値を使う。
/// 空文字列のpath / httpMethodも未設定として扱う。
pub fn parse_alb_event(event: &Value) -> Result<HttpRequest, EventParseError> {
    ensure_object(event)?;
    let envelope = AlbEvent::deserialize(event)?;

    let path = envelope
        .path
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| DEFAULT_PATH.to_string());
    let method = envelope
        .http_method
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_METHOD.to_string());

    Ok(HttpRequest {
        method,
        path,
        headers: envelope
            .headers
            .as_ref()
            .map(headers_from_value)
            .unwrap_or_default(),
        query: envelope
            .query_string_parameters
            .as_ref()
            .map(query_from_value)
            .unwrap_or_default(),
        source_ip: None,
        raw: event.clone(),
    })
}

/// 直接呼び出し形式のイベントをパース
///
/// エコー用途のため、欠落フィールドはデフォルトで埋めずにそのまま保持する。
/// オブジェクトであれば中身の型は問わない。
pub fn parse_direct_invoke_event(event: &Value) -> Result<ProxyEvent, EventParseError> {
    ensure_object(event)?;
    Ok(ProxyEvent::deserialize(event)?)
}

/// API Gateway HTTP API (v2) 形式のイベントをパース
///
/// # 必須フィールド
/// - requestContext
/// - requestContext.http
/// - requestContext.http.path
///
/// methodはログ出力にしか使わないため、欠落時は`GET`とみなす。
/// クエリパラメータとヘッダーは`requestContext.http`配下を優先し、
/// 無ければトップレベルの値を使う。
pub fn parse_http_api_event(event: &Value) -> Result<HttpRequest, EventParseError> {
    ensure_object(event)?;
    let envelope = HttpApiEvent::deserialize(event)?;

    let http = envelope
        .request_context
        .ok_or(EventParseError::MissingRequestContext)?
        .http
        .ok_or(EventParseError::MissingHttpContext)?;

    let path = http.path.ok_or(EventParseError::MissingField("path"))?;
    let method = http
        .method
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_METHOD.to_string());

    let headers = http
        .headers
        .or(envelope.headers)
        .as_ref()
        .map(headers_from_value)
        .unwrap_or_default();
    let query = http
        .query_string_parameters
        .or(envelope.query_string_parameters)
        .as_ref()
        .map(query_from_value)
        .unwrap_or_default();

    Ok(HttpRequest {
        method,
        path,
        headers,
        query,
        source_ip: http.source_ip,
        raw: event.clone(),
    })
}

fn ensure_object(event: &Value) -> Result<(), EventParseError> {
    if event.is_object() {
        Ok(())
    } else {
        Err(EventParseError::NotAnObject)
    }
}

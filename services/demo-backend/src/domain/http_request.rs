// 正規化されたHTTPリクエスト
//
// ALB / API Gateway (REST, HTTP API v2) などプラットフォームごとに異なる
// イベント形式から抽出した、ハンドラー共通のリクエスト表現。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// クエリパラメータの値
///
/// プラットフォームによって単一値または複数値で渡される。
/// どちらにも当てはまらない値は検証せずそのまま保持する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// 単一値（`?a=1`）
    Single(String),
    /// 複数値（multiValueQueryStringParameters形式）
    Multi(Vec<String>),
    /// 文字列以外の値（直接呼び出しで数値などが渡された場合）
    Other(Value),
}

impl From<Value> for QueryValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(single) => QueryValue::Single(single),
            Value::Array(items) if items.iter().all(Value::is_string) => QueryValue::Multi(
                items
                    .into_iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
            ),
            other => QueryValue::Other(other),
        }
    }
}

/// クエリパラメータ（キー順で保持）
pub type QueryParams = BTreeMap<String, QueryValue>;

/// リクエストヘッダー（キー順で保持）
pub type Headers = BTreeMap<String, String>;

/// JSONオブジェクトからヘッダーを取り出す
///
/// 数値と真偽値は文字列化し、null・配列・オブジェクトの値は捨てる。
/// オブジェクト以外が渡された場合は空のヘッダーになる。
pub fn headers_from_value(value: &Value) -> Headers {
    let Some(map) = value.as_object() else {
        return Headers::new();
    };

    map.iter()
        .filter_map(|(name, value)| {
            let text = match value {
                Value::String(text) => text.clone(),
                Value::Number(number) => number.to_string(),
                Value::Bool(flag) => flag.to_string(),
                _ => return None,
            };
            Some((name.clone(), text))
        })
        .collect()
}

/// JSONオブジェクトからクエリパラメータを取り出す
///
/// 値の型は問わない。オブジェクト以外が渡された場合は空になる。
pub fn query_from_value(value: &Value) -> QueryParams {
    value
        .as_object()
        .map(|map| {
            map.iter()
                .map(|(name, value)| (name.clone(), QueryValue::from(value.clone())))
                .collect()
        })
        .unwrap_or_default()
}

/// 正規化されたHTTPリクエスト
///
/// 1回の呼び出しの間だけ存在し、構築後は変更しない。
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTPメソッド
    pub method: String,
    /// リクエストパス
    pub path: String,
    /// リクエストヘッダー
    pub headers: Headers,
    /// クエリパラメータ
    pub query: QueryParams,
    /// 送信元IP（取得できる場合のみ）
    pub source_ip: Option<String>,
    /// プラットフォームから受け取った元のイベント
    pub raw: Value,
}

impl HttpRequest {
    /// ヘッダー値を大文字小文字を区別せずに取得
    ///
    /// 完全一致するキーを優先し、見つからなければ
    /// ASCII大文字小文字を無視して検索する。
    pub fn header(&self, name: &str) -> Option<&str> {
        if let Some(value) = self.headers.get(name) {
            return Some(value.as_str());
        }

        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

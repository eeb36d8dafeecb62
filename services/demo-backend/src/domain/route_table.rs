// パスルーティングテーブル
//
// パス文字列から (ステータス, ボディビルダー) への順序付きマッピング。
// 条件分岐の連鎖ではなく完全一致のルックアップで解決する。

use lambda_http::http::StatusCode;
use serde_json::Value;

/// レスポンスボディを構築する関数
///
/// `C`はハンドラーごとのコンテキスト（リクエスト、設定、タイムスタンプなど）。
pub type BodyBuilder<C> = fn(&C) -> Value;

/// ルート定義
pub struct Route<C> {
    /// 一致させるパス（フォールバックでは表示用の名前）
    pub path: &'static str,
    /// 返却するステータス
    pub status: StatusCode,
    /// ボディビルダー
    pub build: BodyBuilder<C>,
}

impl<C> Route<C> {
    /// ルートを作成
    pub const fn new(path: &'static str, status: StatusCode, build: BodyBuilder<C>) -> Self {
        Self {
            path,
            status,
            build,
        }
    }

    /// コンテキストからステータスとボディを生成
    pub fn respond(&self, context: &C) -> (StatusCode, Value) {
        (self.status, (self.build)(context))
    }
}

/// ルックアップ結果
pub enum Dispatch<'a, C> {
    /// テーブル内のパスに一致
    Matched(&'a Route<C>),
    /// どのパスにも一致せずフォールバックを使用
    Fallback(&'a Route<C>),
}

impl<'a, C> Dispatch<'a, C> {
    /// 解決されたルート
    pub fn route(&self) -> &'a Route<C> {
        match self {
            Dispatch::Matched(route) | Dispatch::Fallback(route) => *route,
        }
    }

    /// フォールバックが選ばれたかどうか
    pub fn is_fallback(&self) -> bool {
        matches!(self, Dispatch::Fallback(_))
    }
}

/// 順序付きルーティングテーブル
pub struct RouteTable<C> {
    routes: Vec<Route<C>>,
    fallback: Route<C>,
}

impl<C> RouteTable<C> {
    /// フォールバックのみを持つ空のテーブルを作成
    ///
    /// # Arguments
    /// * `fallback` - 一致しなかった場合に使うルート
    pub fn new(fallback: Route<C>) -> Self {
        Self {
            routes: Vec::new(),
            fallback,
        }
    }

    /// ルートを末尾に追加
    pub fn with_route(mut self, path: &'static str, status: StatusCode, build: BodyBuilder<C>) -> Self {
        self.routes.push(Route::new(path, status, build));
        self
    }

    /// パスを完全一致で解決
    ///
    /// 同じパスが複数登録されている場合は先に登録されたものが優先される。
    pub fn resolve(&self, path: &str) -> Dispatch<'_, C> {
        self.routes
            .iter()
            .find(|route| route.path == path)
            .map(Dispatch::Matched)
            .unwrap_or(Dispatch::Fallback(&self.fallback))
    }
}

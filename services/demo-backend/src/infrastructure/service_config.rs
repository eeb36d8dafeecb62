// サービス設定
//
// レスポンスボディに埋め込む環境情報を環境変数から読み込む。

/// ENVIRONMENT未設定時のデフォルト
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// サービス設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// デプロイ環境名 (ENVIRONMENT環境変数、デフォルト: dev)
    pub environment: String,
    /// AWSリージョン (AWS_REGION環境変数、Lambda実行環境では常に設定される)
    pub region: Option<String>,
}

impl ServiceConfig {
    /// 環境変数から設定を読み込み
    ///
    /// - ENVIRONMENT: 空文字・空白のみは未設定扱い
    /// - AWS_REGION: 未設定の場合は`None`
    pub fn from_env() -> Self {
        let get_optional_string = |key: &str| -> Option<String> {
            std::env::var(key).ok().filter(|s| !s.trim().is_empty())
        };

        let environment = get_optional_string("ENVIRONMENT")
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
        let region = get_optional_string("AWS_REGION");

        Self {
            environment,
            region,
        }
    }

    /// テスト用に明示的な値で作成
    pub fn new(environment: impl Into<String>, region: Option<String>) -> Self {
        Self {
            environment: environment.into(),
            region,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENVIRONMENT, None)
    }
}

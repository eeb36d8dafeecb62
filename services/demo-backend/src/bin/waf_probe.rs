/// S3 WAFロギングデモ Lambdaエントリポイント
///
/// API Gateway HTTP API (payload v2.0) 経由で呼び出され、
/// WAFルール検証用のパスに応答する。
///
/// # 環境変数
/// - RUST_LOG: ログレベル（デフォルト: info）
use demo_backend::application::WafProbeHandler;
use demo_backend::domain::HttpResponse;
use demo_backend::infrastructure::{init_logging, ServiceConfig};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("WAF検証Lambda関数を初期化");

    let func = service_fn(handler);
    lambda_runtime::run(func).await?;
    Ok(())
}

/// Lambda関数のメインハンドラー
///
/// requestContextが欠落したイベントでも呼び出しは失敗させず、400を返す。
async fn handler(event: LambdaEvent<Value>) -> Result<HttpResponse, Error> {
    let (payload, context) = event.into_parts();
    info!(request_id = %context.request_id, "呼び出し開始");

    let config = ServiceConfig::from_env();
    Ok(WafProbeHandler::new(config).handle(&payload))
}

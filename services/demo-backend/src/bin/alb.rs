/// ALB連携デモ Lambdaエントリポイント
///
/// ALBターゲットグループから受け取ったイベントをパステーブルで処理し、
/// `{statusCode, headers, body}`形式のレスポンスを返却する。
///
/// # 環境変数
/// - ENVIRONMENT: /health, /api/infoで返す環境名（デフォルト: dev）
/// - AWS_REGION: /api/infoで返すリージョン（Lambdaランタイムが設定）
use demo_backend::application::AlbHandler;
use demo_backend::domain::HttpResponse;
use demo_backend::infrastructure::{init_logging, ServiceConfig};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("ALBデモLambda関数を初期化");

    let func = service_fn(handler);
    lambda_runtime::run(func).await?;
    Ok(())
}

/// Lambda関数のメインハンドラー
///
/// 設定は呼び出しごとに環境変数から読み込む。
async fn handler(event: LambdaEvent<Value>) -> Result<HttpResponse, Error> {
    let (payload, context) = event.into_parts();
    info!(request_id = %context.request_id, "呼び出し開始");

    let config = ServiceConfig::from_env();
    Ok(AlbHandler::new(config).handle(&payload))
}

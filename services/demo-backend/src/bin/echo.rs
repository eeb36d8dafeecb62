/// Kinesis Firehose WAFロギングデモ Lambdaエントリポイント
///
/// WAFを通過したリクエストの内容（path, method, クエリ, ヘッダー）を
/// そのままJSONで返却する。
use demo_backend::application::EchoHandler;
use demo_backend::domain::HttpResponse;
use demo_backend::infrastructure::init_logging;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("エコーLambda関数を初期化");

    let func = service_fn(handler);
    lambda_runtime::run(func).await?;
    Ok(())
}

/// Lambda関数のメインハンドラー
async fn handler(event: LambdaEvent<Value>) -> Result<HttpResponse, Error> {
    let (payload, context) = event.into_parts();
    info!(request_id = %context.request_id, "呼び出し開始");

    Ok(EchoHandler::new().handle(&payload))
}

/// デモバックエンドのローカル実行CLI
///
/// Lambdaにデプロイせずに、JSONイベントファイルを各ハンドラーに渡して
/// レスポンスを確認する。
///
/// # ローカル実行
/// ```bash
/// # ALBデモに/healthイベントを渡す
/// echo '{"path": "/health"}' | cargo run --bin local_invoke -- --variant alb -
///
/// # WAF検証デモにファイルのイベントを渡す（タイムスタンプ固定）
/// cargo run --bin local_invoke -- --variant waf-probe events/test-bot.json \
///     --timestamp 2024-01-01T00:00:00.000Z
/// ```
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Parser;
use demo_backend::application::Variant;
use demo_backend::domain::HttpResponse;
use demo_backend::infrastructure::{init_logging, now_timestamp, ServiceConfig};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

/// コマンドライン引数
#[derive(Parser, Debug)]
#[command(name = "local_invoke")]
#[command(about = "JSONイベントをデモハンドラーにローカルで渡してレスポンスを表示")]
struct CliArgs {
    /// 実行するハンドラー
    #[arg(long, short = 'v', value_enum)]
    variant: Variant,

    /// イベントJSONファイル（`-`で標準入力）
    event: PathBuf,

    /// レスポンスに埋め込むタイムスタンプ（省略時は現在時刻）
    #[arg(long, short = 't')]
    timestamp: Option<String>,

    /// 1行のJSONで出力
    #[arg(long)]
    compact: bool,

    /// ハンドラーのログをJSONで出力（レスポンスと同じ標準出力に出る）
    #[arg(long)]
    log: bool,
}

/// ローカル実行のエラー
#[derive(Debug, Error)]
enum LocalInvokeError {
    /// イベントの読み込みに失敗
    #[error("failed to read event from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// イベントがJSONとしてパースできない
    #[error("event is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

fn main() -> std::process::ExitCode {
    let args = CliArgs::parse();

    if args.log {
        init_logging();
    }

    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            std::process::ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "ローカル実行に失敗");
            eprintln!("{}", err);
            std::process::ExitCode::FAILURE
        }
    }
}

/// イベントを読み込んでハンドラーを実行し、出力文字列を返す
fn run(args: &CliArgs) -> Result<String, LocalInvokeError> {
    let raw = read_event(&args.event)?;
    let event: Value = serde_json::from_str(&raw)?;

    let timestamp = args.timestamp.clone().unwrap_or_else(now_timestamp);
    info!(variant = args.variant.name(), "ローカル実行");

    let response = args
        .variant
        .handle_at(ServiceConfig::from_env(), &event, &timestamp);

    render(&response, args.compact)
}

/// イベントをファイルまたは標準入力から読み込む
fn read_event(path: &Path) -> Result<String, LocalInvokeError> {
    let read_error = |source: std::io::Error| LocalInvokeError::Read {
        path: path.display().to_string(),
        source,
    };

    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(read_error)?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(path).map_err(read_error)
    }
}

/// レスポンスを表示用に整形
///
/// bodyはJSON文字列のままだと読みにくいため、パースできる場合は展開して表示する。
fn render(response: &HttpResponse, compact: bool) -> Result<String, LocalInvokeError> {
    let mut output = serde_json::to_value(response)?;
    if let (Ok(body), Some(map)) = (response.body_json(), output.as_object_mut()) {
        map.insert("body".to_string(), body);
    }

    let rendered = if compact {
        serde_json::to_string(&output)?
    } else {
        serde_json::to_string_pretty(&output)?
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn temp_event(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "demo-backend-{}-{}.json",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn args(variant: Variant, event: PathBuf) -> CliArgs {
        CliArgs {
            variant,
            event,
            timestamp: Some("2024-01-01T00:00:00.000Z".to_string()),
            compact: true,
            log: false,
        }
    }

    #[test]
    #[serial(service_env)]
    fn test_run_alb_health() {
        init_logging();
        let path = temp_event("alb-health", r#"{"path": "/health"}"#);

        let output = run(&args(Variant::Alb, path.clone())).unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["statusCode"], 200);
        // bodyは展開されて表示される
        assert_eq!(parsed["body"]["status"], "healthy");
        assert_eq!(parsed["body"]["timestamp"], "2024-01-01T00:00:00.000Z");

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    #[serial(service_env)]
    fn test_run_invalid_json() {
        let path = temp_event("invalid", "{not json");

        let result = run(&args(Variant::Echo, path.clone()));
        assert!(matches!(result, Err(LocalInvokeError::InvalidJson(_))));

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_run_missing_file() {
        let result = run(&args(Variant::Alb, PathBuf::from("/nonexistent/event.json")));
        assert!(matches!(result, Err(LocalInvokeError::Read { .. })));
    }

    #[test]
    fn test_cli_parses_variant() {
        let args = CliArgs::parse_from(["local_invoke", "--variant", "waf-probe", "-", "--compact"]);

        assert_eq!(args.variant, Variant::WafProbe);
        assert_eq!(args.event, PathBuf::from("-"));
        assert!(args.compact);
        assert!(args.timestamp.is_none());
        assert!(!args.log);
    }
}

// デモバックエンドの種類
//
// Lambdaバイナリとローカル実行CLIの両方から、
// イベントを対応するハンドラーに振り分けるために使う。

use clap::ValueEnum;
use serde_json::Value;

use crate::domain::HttpResponse;
use crate::infrastructure::ServiceConfig;

use super::{AlbHandler, EchoHandler, WafProbeHandler};

/// デモバックエンドの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// ALB連携デモ（パステーブル、未知のパスは404）
    Alb,
    /// Kinesis Firehose WAFロギングデモ（リクエストをエコー）
    Echo,
    /// S3 WAFロギングデモ（WAF検証パス、未知のパスは200）
    WafProbe,
}

impl Variant {
    /// 表示用の名前
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Alb => "alb",
            Variant::Echo => "echo",
            Variant::WafProbe => "waf-probe",
        }
    }

    /// 指定タイムスタンプでイベントを処理
    pub fn handle_at(&self, config: ServiceConfig, event: &Value, timestamp: &str) -> HttpResponse {
        match self {
            Variant::Alb => AlbHandler::new(config).handle_at(event, timestamp),
            Variant::Echo => EchoHandler::new().handle_at(event, timestamp),
            Variant::WafProbe => WafProbeHandler::new(config).handle_at(event, timestamp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::logging::init_test_logging;
    use serde_json::json;

    const TS: &str = "2024-06-01T12:00:00.000Z";

    #[test]
    fn test_unknown_path_policy_differs_by_variant() {
        init_test_logging();

        let alb = Variant::Alb.handle_at(ServiceConfig::default(), &json!({"path": "/x"}), TS);
        let echo = Variant::Echo.handle_at(ServiceConfig::default(), &json!({"path": "/x"}), TS);
        let waf = Variant::WafProbe.handle_at(
            ServiceConfig::default(),
            &json!({"requestContext": {"http": {"method": "GET", "path": "/x"}}}),
            TS,
        );

        assert_eq!(alb.status_code, 404);
        assert_eq!(echo.status_code, 200);
        assert_eq!(waf.status_code, 200);
    }

    #[test]
    fn test_all_variants_return_json_body() {
        init_test_logging();

        for variant in Variant::value_variants() {
            let response = variant.handle_at(ServiceConfig::default(), &json!({}), TS);

            assert_eq!(response.headers["Content-Type"], "application/json");
            assert!(!response.body.is_empty());
            assert!(response.body_json().is_ok(), "{} body must be JSON", variant.name());
        }
    }

    #[test]
    fn test_value_enum_names() {
        assert_eq!(Variant::from_str("alb", true), Ok(Variant::Alb));
        assert_eq!(Variant::from_str("waf-probe", true), Ok(Variant::WafProbe));
    }
}

// アプリケーション層モジュール
pub mod alb_handler;
pub mod echo_handler;
pub mod event_parser;
pub mod invocation;
pub mod variant;
pub mod waf_probe_handler;

// 再エクスポート
pub use alb_handler::AlbHandler;
pub use echo_handler::EchoHandler;
pub use event_parser::{
    parse_alb_event, parse_direct_invoke_event, parse_http_api_event, EventParseError, ProxyEvent,
};
pub use invocation::Invocation;
pub use variant::Variant;
pub use waf_probe_handler::WafProbeHandler;

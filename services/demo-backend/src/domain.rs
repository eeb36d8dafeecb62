// Domain layer modules
pub mod cors;
pub mod http_request;
pub mod http_response;
pub mod route_table;

// Re-exports
pub use cors::CorsPolicy;
pub use http_request::{
    headers_from_value, query_from_value, Headers, HttpRequest, QueryParams, QueryValue,
};
pub use http_response::HttpResponse;
pub use route_table::{BodyBuilder, Dispatch, Route, RouteTable};

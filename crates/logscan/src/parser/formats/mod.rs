/// Individual log format extractors

pub mod app;
pub mod http_log;

pub use app::AppParser;
pub use http_log::{ApacheParser, NginxParser};

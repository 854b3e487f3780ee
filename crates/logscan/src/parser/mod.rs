/// Log parsing module
/// 
/// Classifies log lines against a fixed set of formats and extracts typed
/// records from them.
/// 
/// # Architecture
/// 
/// - `traits.rs`: Core trait shared by every format extractor
/// - `registry.rs`: Ordered format registry with first-match detection
/// - `formats/`: Individual format extractors
/// - `timestamp.rs`: Best-effort timestamp parsing
/// - `metrics.rs`: Per-run parse counters
/// 
/// # Guarantees
/// 
/// - A line that does not fit its format is dropped, never fatal
/// - Timestamps that fail to parse are kept as raw text
/// - `raw_entry` always holds the source line

pub mod traits;
pub mod registry;
pub mod metrics;
pub mod formats;
pub mod model;
pub mod timestamp;

// Re-export commonly used types
pub use traits::LogParser;
pub use registry::FormatRegistry;
pub use metrics::ParseMetrics;
pub use model::{
    AppRecord, ExtendedRequestRecord, LogFormat, LogRecord, ParseError, RequestRecord, UnknownFormat,
};
pub use timestamp::{PointInTime, Timestamp};

// Constants
pub const NO_VALUE: &str = "-"; // bytes-sent marker for "nothing sent"

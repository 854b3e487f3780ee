//! Analysis — frequency counts and top-N rankings over parsed records.

pub mod count;
pub mod summary;
mod serde_utils;

pub use count::{FrequencyCounter, FrequencyMap, Ranking};
pub use summary::{analyze, analyze_top, Analysis, Summary, DEFAULT_TOP_N, NO_ENTRIES};

//! Descriptive statistics over parsed records.
//!
//! Each record feeds only the dimensions of its own family: request records
//! count addresses, status codes and paths; application records count levels
//! and modules. A dimension with no contributing record is left out.

use serde::{Serialize, Serializer};
use serde::ser::SerializeMap;

use crate::parser::LogRecord;
use super::count::{FrequencyCounter, FrequencyMap, Ranking};

pub const DEFAULT_TOP_N: usize = 10;
pub const NO_ENTRIES: &str = "No entries to analyze";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_ips: Option<Ranking<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_codes: Option<FrequencyMap<u16>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_paths: Option<Ranking<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_levels: Option<FrequencyMap<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_modules: Option<Ranking<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    /// Nothing was parsed
    Empty,
    Summary(Summary),
}

impl Analysis {
    pub fn is_empty(&self) -> bool {
        matches!(self, Analysis::Empty)
    }

    pub fn summary(&self) -> Option<&Summary> {
        match self {
            Analysis::Summary(s) => Some(s),
            Analysis::Empty => None,
        }
    }
}

/// `Empty` renders as `{"error": "No entries to analyze"}`.
impl Serialize for Analysis {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Analysis::Empty => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", NO_ENTRIES)?;
                map.end()
            }
            Analysis::Summary(summary) => summary.serialize(serializer),
        }
    }
}

/// Analyze with the default ranking size of ten.
pub fn analyze(records: &[LogRecord]) -> Analysis {
    analyze_top(records, DEFAULT_TOP_N)
}

pub fn analyze_top(records: &[LogRecord], top_n: usize) -> Analysis {
    if records.is_empty() {
        return Analysis::Empty;
    }

    let mut ips = FrequencyCounter::new();
    let mut statuses = FrequencyCounter::new();
    let mut paths = FrequencyCounter::new();
    let mut levels = FrequencyCounter::new();
    let mut modules = FrequencyCounter::new();

    for record in records {
        match record {
            LogRecord::RequestBasic(_) | LogRecord::RequestExtended(_) => {
                if let Some(req) = record.request() {
                    ips.add(req.source_address.clone());
                    statuses.add(req.status_code);
                    paths.add(req.path.clone());
                }
            }
            LogRecord::AppStructured(app) => {
                levels.add(app.severity_level.clone());
                modules.add(app.module_name.clone());
            }
        }
    }

    let mut summary = Summary::default();
    if !ips.is_empty() {
        summary.top_ips = Some(ips.top(top_n));
        summary.top_paths = Some(paths.top(top_n));
        summary.status_codes = Some(statuses.into_map());
    }
    if !levels.is_empty() {
        summary.top_modules = Some(modules.top(top_n));
        summary.log_levels = Some(levels.into_map());
    }

    tracing::debug!(
        records = records.len(),
        addresses = summary.top_ips.as_ref().map(|r| r.len()).unwrap_or(0),
        levels = summary.log_levels.as_ref().map(|m| m.len()).unwrap_or(0),
        "analysis: summary computed"
    );

    Analysis::Summary(summary)
}

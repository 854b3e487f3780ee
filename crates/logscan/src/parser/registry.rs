use super::traits::*;
use super::formats::*;

/// Fixed, ordered set of recognised formats.
///
/// Detection is first-match in registration order, so a line that satisfies
/// more than one pattern always resolves to the same format.
pub struct FormatRegistry {
    parsers: Vec<Box<dyn LogParser>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        let parsers: Vec<Box<dyn LogParser>> = vec![
            // Order matters! Must follow LogFormat::ALL
            Box::new(ApacheParser::new()),
            Box::new(NginxParser::new()),
            Box::new(AppParser::new()),
        ];

        Self { parsers }
    }

    /// Return the first registered format whose pattern matches the sample.
    pub fn detect(&self, sample: &str) -> Option<LogFormat> {
        let sample = sample.trim();
        let format = self
            .parsers
            .iter()
            .find(|parser| parser.matches(sample))
            .map(|parser| parser.format());

        tracing::trace!(?format, "registry: detection finished");
        format
    }

    pub fn parser(&self, format: LogFormat) -> Option<&dyn LogParser> {
        self.parsers
            .iter()
            .find(|parser| parser.format() == format)
            .map(|parser| parser.as_ref())
    }

    /// Formats in registration order.
    pub fn formats(&self) -> impl Iterator<Item = LogFormat> + '_ {
        self.parsers.iter().map(|parser| parser.format())
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

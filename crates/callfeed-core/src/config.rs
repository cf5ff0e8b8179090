/// Default number of records kept after selection.
pub const DEFAULT_LIMIT: usize = 5;

/// Maximum number of vanity candidates kept per record.
pub const CANDIDATE_LIMIT: usize = 3;

/// Knobs for the synchronous part of a load cycle.
///
/// Transport settings (endpoint, timeout) live on the fetchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Records kept after sorting by recency.
    pub limit: usize,

    /// Fail on proxy envelopes whose `statusCode` is not 2xx instead of
    /// decoding their body.
    pub strict_envelope: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            strict_envelope: false,
        }
    }
}

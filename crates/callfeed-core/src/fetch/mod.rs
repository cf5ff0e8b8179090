//! Transport seam.
//!
//! A fetcher produces the raw bytes of one payload. It knows nothing about
//! JSON; decoding starts in [`crate::payload::unwrap`].

pub mod file;
pub mod http;

use std::future::Future;

use crate::error::PipelineError;
use crate::payload::read::FetchedPayload;

pub use file::FileFetcher;
pub use http::HttpFetcher;

pub trait Fetch {
    /// Perform one fetch. Failures are always [`PipelineError::TransportFailure`].
    fn fetch(&self) -> impl Future<Output = Result<FetchedPayload, PipelineError>> + Send;

    /// Human-readable source, used in logs.
    fn describe(&self) -> String;
}

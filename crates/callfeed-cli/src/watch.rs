//! Periodic refresh.
//!
//! Load cycles run strictly one after another: a tick that fires while a
//! cycle is still in flight is skipped, never queued behind it.

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use tokio::time::MissedTickBehavior;

use callfeed_core::config::PipelineConfig;
use callfeed_core::fetch::Fetch;
use callfeed_core::report::model::{FeedReport, ToolInfo};

/// Suppresses re-rendering of a payload identical to the last good one.
#[derive(Debug, Default)]
pub struct ChangeFilter {
    last_hash: Option<String>,
}

impl ChangeFilter {
    /// Failed cycles always render and reset the filter, so the next good
    /// payload is shown even if it matches the one before the failure.
    pub fn should_render(&mut self, report: &FeedReport) -> bool {
        if !report.is_ok() {
            self.last_hash = None;
            return true;
        }

        let hash = report.payload_hash();
        if hash.is_some() && hash == self.last_hash.as_deref() {
            return false;
        }
        self.last_hash = hash.map(str::to_owned);
        true
    }
}

/// Resolves when `signal` fires.
///
/// If the handler cannot be installed this never resolves, so the refresh
/// loop keeps running until the process is killed.
pub async fn until_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(err) = signal.await {
        tracing::warn!(error = %err, "failed to listen for Ctrl-C, refresh runs until killed");
        std::future::pending::<()>().await;
    }
}

/// Run load cycles every `every` until `shutdown` resolves.
pub async fn run<F, S, E>(
    fetcher: &F,
    config: &PipelineConfig,
    tool: &ToolInfo,
    every: Duration,
    shutdown: S,
    mut emit: E,
) -> Result<()>
where
    F: Fetch,
    S: Future,
    E: FnMut(&FeedReport) -> Result<()>,
{
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut filter = ChangeFilter::default();

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {}
        }

        let report = tokio::select! {
            _ = &mut shutdown => break,
            report = callfeed_core::load(fetcher, config, tool.clone()) => report,
        };

        if filter.should_render(&report) {
            emit(&report)?;
        } else {
            tracing::debug!("payload unchanged, skipping render");
        }
    }

    tracing::info!("refresh stopped");
    Ok(())
}

use std::path::PathBuf;

use crate::error::PipelineError;
use crate::fetch::Fetch;
use crate::payload::read::{FetchedPayload, read_payload, read_stdin};

/// Reads a saved payload from disk, or from stdin when the path is `-`.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }
}

impl Fetch for FileFetcher {
    async fn fetch(&self) -> Result<FetchedPayload, PipelineError> {
        let path = self.path.clone();
        let stdin = self.is_stdin();

        tokio::task::spawn_blocking(move || {
            if stdin {
                read_stdin()
            } else {
                read_payload(&path)
            }
        })
        .await
        .map_err(|e| PipelineError::transport(e.to_string()))?
        .map_err(|e| PipelineError::transport(format!("{e:#}")))
    }

    fn describe(&self) -> String {
        if self.is_stdin() {
            "stdin".to_string()
        } else {
            self.path.display().to_string()
        }
    }
}

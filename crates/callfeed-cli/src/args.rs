use std::path::PathBuf;
use std::time::Duration;

use clap::builder::RangedU64ValueParser;
use clap::{ArgGroup, Parser, ValueEnum};

use callfeed_core::config::{DEFAULT_LIMIT, PipelineConfig};
use callfeed_core::report::render::{DisplayZone, JsonPresenter, Presenter, TextPresenter};

#[derive(Debug, Parser)]
#[command(
    name = "callfeed",
    version,
    about = "Show recent callers and their vanity number suggestions"
)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .multiple(true)
        .args(["endpoint", "input"])
))]
pub struct Args {
    /// Recent-calls API endpoint
    #[arg(long, env = "CALLFEED_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Read a saved payload instead of calling the API (`-` for stdin).
    /// Takes precedence over `--endpoint`.
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Number of calls to show
    #[arg(
        long,
        default_value_t = DEFAULT_LIMIT,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub limit: usize,

    /// Treat proxy envelopes with a non-2xx statusCode as failures
    #[arg(long)]
    pub strict_envelope: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Show times in the local zone instead of UTC
    #[arg(long)]
    pub local_time: bool,

    /// Reload every SECS seconds until interrupted
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub watch: Option<u64>,

    /// Enable debug logging on stderr (RUST_LOG overrides)
    #[arg(long)]
    pub debug: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

impl Args {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            limit: self.limit,
            strict_envelope: self.strict_envelope,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        self.watch.map(Duration::from_secs)
    }

    /// Watch mode emits one compact JSON document per cycle.
    pub fn presenter(&self) -> Box<dyn Presenter> {
        match self.format {
            OutputFormat::Json => Box::new(JsonPresenter {
                pretty: self.watch.is_none(),
            }),
            OutputFormat::Text => Box::new(TextPresenter {
                zone: if self.local_time {
                    DisplayZone::Local
                } else {
                    DisplayZone::Utc
                },
            }),
        }
    }
}

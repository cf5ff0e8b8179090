use anyhow::{Result, bail};
use clap::Parser;

use callfeed_core::fetch::{Fetch, FileFetcher, HttpFetcher};
use callfeed_core::report::model::ToolInfo;
use callfeed_core::{TOOL_NAME, load};

mod args;
mod logging;
mod output;
mod watch;

#[tokio::main]
async fn main() -> Result<()> {
    let args = args::Args::parse();
    logging::init(args.debug);

    let tool = ToolInfo {
        name: TOOL_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let exit_code = match (&args.input, &args.endpoint) {
        (Some(path), _) => run(&FileFetcher::new(path), &args, tool).await?,
        (None, Some(url)) => run(&HttpFetcher::new(url, args.timeout()), &args, tool).await?,
        (None, None) => bail!("one of --endpoint or --input is required"),
    };

    std::process::exit(exit_code);
}

async fn run<F: Fetch>(fetcher: &F, args: &args::Args, tool: ToolInfo) -> Result<i32> {
    let config = args.pipeline_config();
    let presenter = args.presenter();
    let out = args.out.as_deref();

    let Some(every) = args.refresh_interval() else {
        let report = load(fetcher, &config, tool).await;
        output::emit(out, &presenter.render(&report)?)?;
        return Ok(report.exit_code());
    };

    tracing::info!(source = %fetcher.describe(), every_secs = every.as_secs(), "watching");
    watch::run(
        fetcher,
        &config,
        &tool,
        every,
        watch::until_signal(tokio::signal::ctrl_c()),
        |report| output::emit(out, &presenter.render(report)?),
    )
    .await?;

    Ok(0)
}

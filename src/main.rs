use anyhow::Result;
use clap::Parser;
use proxy_vet::proxy::probe::{ProbeConfig, DEFAULT_TARGET_URL, DEFAULT_TIMEOUT_SECS};
use proxy_vet::{run, RunConfig, DEFAULT_INPUT_FILE, DEFAULT_MAX_CONCURRENCY, DEFAULT_OUTPUT_FILE};
use std::path::PathBuf;
use std::time::Duration;

/// A concurrent proxy list checker
#[derive(Parser)]
#[command(name = "proxy-vet")]
#[command(about = "Checks a list of proxies and saves the working ones")]
struct Cli {
    /// Input file containing proxy addresses, one per line
    #[arg(default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,

    /// Output file working proxies are appended to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Maximum number of concurrent probes
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    threads: usize,

    /// Timeout per probe in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// URL requested through each proxy
    #[arg(long, default_value = DEFAULT_TARGET_URL)]
    test_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    println!(
        "Checking proxies from {:?} with up to {} concurrent probes",
        cli.input, cli.threads
    );

    let config = RunConfig {
        input: cli.input,
        output: cli.output,
        max_concurrency: cli.threads,
        probe: ProbeConfig::new()
            .with_timeout(Duration::from_secs(cli.timeout))
            .with_target_url(cli.test_url),
    };

    let summary = run(&config).await?;

    println!();
    println!(
        "{} of {} proxies work. Saved to {:?}",
        summary.valid, summary.total, config.output
    );

    Ok(())
}

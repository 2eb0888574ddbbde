use clap::Parser;
use spate::report::{self, Banner, TextReport};
use spate_core::{
    RunConfig, Verdict, DEFAULT_DURATION_SECS, DEFAULT_MAX_CONCURRENT, DEFAULT_RPM,
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "spate", version, about = "A synthetic traffic generator for log ingest endpoints")]
struct Cli {
    /// Target endpoint, e.g. https://api.example.com/ingest
    url: String,

    /// Requests launched per minute
    #[arg(long, default_value_t = DEFAULT_RPM)]
    rpm: i64,

    /// Run length in seconds
    #[arg(long, default_value_t = DEFAULT_DURATION_SECS)]
    duration: i64,

    /// Maximum in-flight requests
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENT)]
    concurrent: usize,

    /// Disable TLS certificate verification
    #[arg(long)]
    skip_ssl: bool,

    /// Comma-separated tenant ids to spread records across
    #[arg(long, value_delimiter = ',')]
    tenants: Vec<String>,

    /// Print a machine-readable JSON summary instead of the text report
    #[arg(long)]
    json: bool,

    /// Exit non-zero unless the verdict is Passed
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // JSON consumers get a quiet stdout unless they opt back in via RUST_LOG.
    let default_filter = if cli.json { "spate=warn" } else { "spate=info" };
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let mut config = RunConfig::new(&cli.url);
    config.rpm = cli.rpm;
    config.duration_secs = cli.duration;
    config.max_concurrent = cli.concurrent;
    config.skip_ssl = cli.skip_ssl;
    if !cli.tenants.is_empty() {
        config.tenants = cli.tenants;
    }

    let plan = config.plan();
    if !cli.json {
        println!(
            "{}\n",
            Banner {
                config: &config,
                plan: &plan,
            }
        );
    }

    let run = spate::execute(&config).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report::json_summary(&run))?);
    } else {
        println!("{}", TextReport(&run));
    }

    if cli.check && run.verdict != Verdict::Passed {
        std::process::exit(1);
    }

    Ok(())
}

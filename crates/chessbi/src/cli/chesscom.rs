use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use chessbi_fetch::{ClientOptions, DEFAULT_USER_AGENT, Fetcher, ReqwestClient};
use chessbi_ingest::{ChessComClient, IngestOptions, IngestSummary, MonthKey, run_ingest};
use clap::Args;
use tracing::debug;

const RULE: &str = "============================================================";

#[derive(Clone, Debug, Args)]
pub struct ChesscomArgs {
    /// Chess.com username to fetch games for
    #[arg(long)]
    pub username: String,

    /// Output directory for raw JSON files
    #[arg(long = "out", default_value = "data/raw")]
    pub out_dir: PathBuf,

    /// Maximum number of recent months to fetch
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_months: u32,

    /// Only fetch months >= this one (YYYY-MM)
    #[arg(long)]
    pub since: Option<MonthKey>,

    /// Path to the ETag cache file
    #[arg(long, default_value = ".cache/chesscom_etags.json")]
    pub cache_path: PathBuf,

    /// User-Agent sent with every request
    #[arg(long, env = "CHESSBI_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Retries after the first attempt for transient failures
    #[arg(long, default_value_t = 5)]
    pub max_retries: u32,

    /// Base of the exponential backoff, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub backoff_base_ms: u64,
}

impl ChesscomArgs {
    fn client_options(&self) -> ClientOptions {
        ClientOptions::default()
            .user_agent(self.user_agent.clone())
            .timeout(Duration::from_secs(self.timeout_secs))
            .max_retries(self.max_retries)
            .backoff_base(Duration::from_millis(self.backoff_base_ms))
    }

    fn ingest_options(&self) -> IngestOptions {
        IngestOptions::new(self.username.clone())
            .out_dir(self.out_dir.clone())
            .max_months(self.max_months as usize)
            .since(self.since.clone())
            .cache_path(self.cache_path.clone())
    }
}

pub async fn run(args: ChesscomArgs) -> anyhow::Result<()> {
    debug!(
        username = %args.username,
        user_agent = %args.user_agent,
        max_retries = args.max_retries,
        "building client"
    );
    let http = ReqwestClient::new(&args.client_options()).context("failed to build HTTP client")?;
    let client = ChessComClient::new(Fetcher::new(http, args.client_options()));

    println!("\n{RULE}\nChessBI - Chess.com Ingestion\n{RULE}\n");

    let result = run_ingest(&client, &args.ingest_options()).await;
    client.close();

    let summary = result.with_context(|| format!("ingestion failed for {}", args.username))?;
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &IngestSummary) {
    println!("\n{RULE}\nSummary\n{RULE}");
    println!("  Username:         {}", summary.username);
    println!("  Months selected:  {}", summary.months_selected.len());
    println!("  Months fetched:   {}", summary.months_fetched.len());
    println!("  Months unchanged: {}", summary.months_unchanged.len());
    println!("  Total games:      {}", summary.total_games);
    println!(
        "  Output directory: {}",
        summary.out_dir.join("chesscom").join(&summary.username).display()
    );
    println!("{RULE}\n");

    if !summary.months_fetched.is_empty() {
        println!("Fetched {} month(s)", summary.months_fetched.len());
    }
    if !summary.months_unchanged.is_empty() {
        println!("Skipped {} unchanged month(s) (cached)", summary.months_unchanged.len());
    }
}

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bookmark_indexer::{check_summary, parse_method, Dependencies, IndexingError, Settings};
use bookmark_indexer_repository::opensearch::DEFAULT_INDEX_NAME;

#[derive(Parser)]
#[command(name = "bookmark-indexer")]
#[command(about = "Sync Pinboard bookmarks into a search index", long_about = None)]
struct Cli {
    /// Which bookmarks to pull: all, recent or test
    method: String,

    /// Target index
    #[arg(env = "ELASTIC_PINBOARD_INDEX", default_value = DEFAULT_INDEX_NAME)]
    index: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Bookmark sync failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> Result<(), IndexingError> {
    let method = parse_method(&cli.method)?;
    let index = cli.index;

    let settings = Settings::from_env()?;
    let dependencies = Dependencies::new(&settings)?;

    let summary = dependencies.pipeline.run(method.as_str(), &index).await?;

    info!(
        index = %index,
        total = summary.total,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Sync complete"
    );

    check_summary(&summary)
}

use clap::Parser;
use tracing::{debug, error};
use volley::{unpack_outcomes, DispatchOptions, Dispatcher};

/// The endpoint the original demo hammered three times.
const DEFAULT_URL: &str = "https://api.chucknorris.io/jokes/random";

/// Dispatch a batch of concurrent HTTP GET requests and print each result
#[derive(Parser)]
#[command(name = "volley")]
#[command(about = "Fetch a batch of URLs concurrently, one outcome per URL", long_about = None)]
struct Cli {
    /// URLs to fetch; defaults to three requests against the public joke API
    urls: Vec<String>,

    /// Maximum number of requests in flight (default: unbounded)
    #[arg(long)]
    max_parallel: Option<usize>,

    /// Collect through the completion channel alone instead of joining tasks first
    #[arg(long)]
    detached: bool,

    /// Print outcomes as JSON instead of plain text
    #[arg(long)]
    json: bool,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .init();

    let urls = if cli.urls.is_empty() {
        vec![DEFAULT_URL.to_string(); 3]
    } else {
        cli.urls.clone()
    };
    debug!("fetching {} URLs (detached: {})", urls.len(), cli.detached);

    let dispatcher = Dispatcher::with_options(DispatchOptions {
        max_parallel: cli.max_parallel,
        cancel: None,
    });

    let outcomes = if cli.detached {
        dispatcher.dispatch_detached(&urls).await
    } else {
        dispatcher.dispatch(&urls).await
    };

    if cli.json {
        match serde_json::to_string_pretty(&outcomes) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                error!("failed to render outcomes as JSON: {}", e);
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let (bodies, errors) = unpack_outcomes(outcomes);
    for (index, url) in urls.iter().enumerate() {
        match &errors[index] {
            Some(err) => eprintln!("{url}: {err}"),
            None => println!("{}", bodies[index]),
        }
    }
}

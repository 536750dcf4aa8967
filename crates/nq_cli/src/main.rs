use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use futures::future::join_all;
use nq_core::FeedFetcher;
use nq_feeds::{default_sources, ContentFetcher, FetchConfig, HttpPageFetcher, RssFeedFetcher};
use nq_inference::{AnswerGenerator, Ranker};
use nq_storage::{CacheConfig, MetadataCache, SystemClock};
use nq_web::{AppState, AskPipeline, ModerationPolicy};
use tracing::info;

mod client;
mod duration;

use duration::HumanDuration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Ask questions about the latest crypto news", long_about = None)]
pub struct Cli {
    #[arg(long, default_value = "info", global = true, help = "Default log level when RUST_LOG is unset")]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Serve the question-answering API
    Serve(ServeArgs),
    /// Ask a running server and stream the answer to stdout
    Ask {
        question: String,
        #[arg(long, default_value = "http://127.0.0.1:3000")]
        server: String,
    },
    /// Fetch every configured feed once and print the article metadata
    Feeds,
}

#[derive(clap::Args, Debug)]
struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: String,
    #[arg(long, default_value = "huggingface", help = "Model to use for inference. Available models: huggingface (default), dummy")]
    model: String,
    #[arg(long, env = "HUGGINGFACE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, default_value = nq_inference::DEFAULT_EMBEDDING_MODEL)]
    embedding_model: String,
    #[arg(long, default_value = nq_inference::DEFAULT_CHAT_MODEL)]
    chat_model: String,
    #[arg(long, default_value = nq_inference::DEFAULT_ROUTER_URL)]
    router_url: String,
    /// How long fetched feed metadata stays fresh (e.g. 30m, 1h)
    #[arg(long, default_value = "30m")]
    cache_ttl: HumanDuration,
    /// Articles used to ground each answer
    #[arg(long, default_value_t = nq_web::pipeline::DEFAULT_LIMIT)]
    limit: usize,
    /// Pause between streamed words, in milliseconds
    #[arg(long, default_value_t = 20)]
    token_delay_ms: u64,
    /// Words that make a question get rejected
    #[arg(long, value_delimiter = ',')]
    banned_words: Vec<String>,
}

fn build_state(args: &ServeArgs) -> anyhow::Result<AppState> {
    let fetch_config = FetchConfig::default();

    let model = nq_inference::create_model(nq_inference::Config {
        api_key: args.api_key.clone(),
        model_name: Some(args.model.clone()),
        router_url: args.router_url.clone(),
        embedding_model: args.embedding_model.clone(),
        chat_model: args.chat_model.clone(),
        ..nq_inference::Config::default()
    })?;
    info!("🧠 Inference model initialized (using {})", model.name());

    let cache = Arc::new(MetadataCache::new(
        default_sources(),
        Arc::new(RssFeedFetcher::new(fetch_config.clone())?),
        Arc::new(SystemClock),
        CacheConfig { ttl: args.cache_ttl.0 },
    ));
    let pipeline = AskPipeline::new(
        cache,
        Ranker::new(model.clone()),
        ContentFetcher::new(Arc::new(HttpPageFetcher::new(&fetch_config)?), &fetch_config),
        AnswerGenerator::new(model, Duration::from_millis(args.token_delay_ms)),
        args.limit,
    );
    let moderation = ModerationPolicy::default().with_banned_words(args.banned_words.clone());

    Ok(AppState::new(Arc::new(pipeline), moderation))
}

async fn print_feeds() -> anyhow::Result<()> {
    let fetcher = RssFeedFetcher::new(FetchConfig::default())?;
    let sources = default_sources();
    let batches = join_all(sources.iter().map(|source| fetcher.fetch(source))).await;

    for (source, articles) in sources.iter().zip(batches) {
        println!("📰 {} ({} articles)", source.name, articles.len());
        for article in articles {
            println!("  {} {} - {}", article.published_at.format("%Y-%m-%d %H:%M"), article.title, article.url);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    nq_core::logging::init_logging(&cli.log_level);

    match cli.command {
        Commands::Serve(args) => {
            let state = build_state(&args)?;
            info!("🦗 Sources: {}", default_sources().iter().map(|s| s.name.as_str()).collect::<Vec<_>>().join(", "));
            nq_web::serve(&args.bind, state).await?;
        }
        Commands::Ask { question, server } => client::ask(&server, &question).await?,
        Commands::Feeds => print_feeds().await?,
    }

    Ok(())
}

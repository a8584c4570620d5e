//! Command-line front end for the chat explorer API.
//!
//! Every command prints the server payload as pretty JSON on stdout.
//! Failures go to stderr and exit non-zero.

use std::path::PathBuf;
use std::process::ExitCode;

use chat_explorer_client::observability::{init_tracing, LogConfig, LogLevel};
use chat_explorer_client::{
    ApiPayload, ChatExplorerClient, ChatExplorerClientBuilder, ChatExplorerConfig,
    ChatExplorerError, ChatExplorerResult, ChatFile, Route, Router,
};
use clap::{Parser, Subcommand};
use serde_json::json;

#[derive(Parser, Debug)]
#[command(name = "chat-explorer", version, about, long_about = None)]
struct Cli {
    /// Server origin, e.g. `http://localhost:5002`.
    #[arg(long, global = true)]
    origin: Option<String>,

    /// Per-request timeout in milliseconds.
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upload a chat export file.
    Upload {
        /// Path to the export.
        file: PathBuf,
    },
    /// List all chats.
    Chats,
    /// List messages of a chat.
    Messages {
        /// Chat identifier.
        chat_id: String,
        /// Return at most this many messages.
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Show per-sender statistics of a chat.
    Stats {
        /// Chat identifier.
        chat_id: String,
    },
    /// Semantic search over a chat.
    Search {
        /// Chat identifier.
        chat_id: String,
        /// Free-text query to match against message embeddings.
        query: String,
        /// Maximum number of matches (server default 10).
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Show cluster coordinates of a chat.
    Clusters {
        /// Chat identifier.
        chat_id: String,
    },
    /// Generate embeddings and clusters for a chat.
    Process {
        /// Chat identifier.
        chat_id: String,
    },
    /// Check that the server is up.
    Health,
    /// Resolve a page location and load the data that page shows.
    Open {
        /// Location such as `/` or `/chat/abc123`.
        path: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut log_config = LogConfig::new().level(LogLevel::from_verbosity(cli.verbose));
    if cli.json_logs {
        log_config = log_config.json();
    }
    init_tracing(&log_config);

    match run(cli).await {
        Ok(payload) => match serde_json::to_string_pretty(&payload) {
            Ok(text) => {
                println!("{}", text);
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("error: {}", err);
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ChatExplorerResult<ApiPayload> {
    let client = build_client(&cli)?;

    match cli.command {
        Commands::Upload { file } => {
            let file = ChatFile::from_path(&file).await?;
            client.upload_chat(file).await
        }
        Commands::Chats => client.get_chats().await,
        Commands::Messages { chat_id, limit } => client.get_messages(chat_id, limit).await,
        Commands::Stats { chat_id } => client.get_chat_stats(chat_id).await,
        Commands::Search {
            chat_id,
            query,
            limit,
        } => client.search_messages(chat_id, query, limit).await,
        Commands::Clusters { chat_id } => client.get_clusters(chat_id).await,
        Commands::Process { chat_id } => client.process_chat(chat_id).await,
        Commands::Health => client.health().await,
        Commands::Open { path } => open(&client, &path).await,
    }
}

fn build_client(cli: &Cli) -> ChatExplorerResult<ChatExplorerClient> {
    let mut builder = ChatExplorerClientBuilder::from_config(ChatExplorerConfig::from_env()?);
    if let Some(origin) = &cli.origin {
        builder = builder.origin(origin.clone());
    }
    if let Some(millis) = cli.timeout_ms {
        builder = builder.timeout_ms(millis);
    }
    builder.build()
}

async fn open(client: &ChatExplorerClient, location: &str) -> ChatExplorerResult<ApiPayload> {
    let matched = Router::new()
        .resolve(location)
        .ok_or_else(|| ChatExplorerError::validation_param(format!("no page for '{}'", location), "path"))?;
    let route = Route::try_from(&matched).map_err(ChatExplorerError::validation)?;

    tracing::info!(page = %matched.page, path = %matched.path, "Opening page");

    match route {
        Route::Upload => {
            let chats = client.get_chats().await?;
            Ok(json!({
                "page": matched.page.name(),
                "hint": "upload an export with `chat-explorer upload <FILE>`",
                "chats": chats,
            }))
        }
        Route::Dashboard { id } => {
            let (messages, stats, clusters) = tokio::try_join!(
                client.get_messages(id.as_str(), None),
                client.get_chat_stats(id.as_str()),
                client.get_clusters(id.as_str()),
            )?;
            Ok(json!({
                "page": matched.page.name(),
                "chat_id": id,
                "messages": messages,
                "stats": stats,
                "clusters": clusters,
            }))
        }
    }
}

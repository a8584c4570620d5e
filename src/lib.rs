//! Chat Explorer Client Library
//!
//! An async Rust client for the chat export explorer API, plus the page
//! router the explorer front end navigates with. Upload a chat export,
//! list chats, read messages and statistics, run semantic search over
//! message embeddings, and fetch cluster coordinates for visualization.
//!
//! # Features
//!
//! - **Seven operations**: upload, chats, messages, stats, search,
//!   clusters, process (plus a health check)
//! - **Pass-through payloads**: responses are `serde_json::Value`, or any
//!   type you deserialize into through the services
//! - **Faithful errors**: timeouts, network failures and non-2xx statuses
//!   surface unchanged; nothing is retried or cached
//! - **Routing**: `/` and `/chat/:id` with history-style navigation
//! - **Observability**: `tracing` spans per operation and request metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chat_explorer_client::{ChatExplorerClient, ChatFile};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ChatExplorerClient::builder()
//!         .origin("http://localhost:5002")
//!         .build()?;
//!
//!     let file = ChatFile::from_path("WhatsApp Chat.txt").await?;
//!     let created = client.upload_chat(file).await?;
//!     println!("{}", created);
//!
//!     let hits = client.search_messages("1", "dinner plans", None).await?;
//!     println!("{}", serde_json::to_string_pretty(&hits)?);
//!     Ok(())
//! }
//! ```
//!
//! # Routing Example
//!
//! ```rust
//! use chat_explorer_client::router::{Page, Router};
//!
//! let router = Router::new();
//! let matched = router.resolve("/chat/abc123").unwrap();
//! assert_eq!(matched.page, Page::ChatDashboard);
//! assert_eq!(matched.prop("id"), Some("abc123"));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod router;
pub mod services;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::{ChatExplorerClient, ChatExplorerClientBuilder};
pub use config::ChatExplorerConfig;
pub use errors::{ChatExplorerError, ChatExplorerResult};
pub use router::{History, Page, Route, RouteMatch, Router};
pub use types::{ApiPayload, ChatFile, ChatId, SearchRequest, DEFAULT_SEARCH_LIMIT};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

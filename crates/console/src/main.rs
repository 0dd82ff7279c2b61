//! One-shot console for the dashboard API.
//!
//! Fetches a page of articles using a URL-style query string supplied on
//! the command line and prints one line per article:
//!
//! ```text
//! aci-console "severity=critical&sortBy=newest&page=2"
//! ```
//!
//! Configuration comes from the environment (see
//! [`aci_client::ClientConfig`]); a `.env` file is honored.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aci_client::{ApiClient, ClientConfig};
use aci_core::filters::ArticleFilters;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aci_console=info,aci_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let query = std::env::args().nth(1).unwrap_or_default();
    let filters = ArticleFilters::parse(&query);

    let config = ClientConfig::from_env();
    tracing::info!(base_url = %config.base_url, "Loaded client configuration");

    let client = ApiClient::new(&config).context("failed to build API client")?;
    let page = client
        .list_articles(&filters)
        .await
        .context("failed to fetch articles")?;

    tracing::info!(
        page = page.pagination.page,
        total_items = page.pagination.total_items,
        "Fetched article page"
    );

    for article in &page.data {
        println!(
            "{}  {:<20}  {}",
            article.id, article.approval_status, article.title
        );
    }

    Ok(())
}

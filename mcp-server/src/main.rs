//! Job board MCP server
//!
//! Exposes the job board client as MCP tools over stdio:
//! - Browsing and paging through the job feed
//! - Filtering by job function and by location
//! - Viewing a posting and applying to it
//! - Posting a paid job

mod server;
mod session;

use anyhow::Result;
use rmcp::ServiceExt;
use server::JobBoardServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is used for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting job board MCP server");

    let server = JobBoardServer::from_env()?;

    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let service = server.serve(transport).await?;

    service.waiting().await?;

    Ok(())
}

//! Record Bridge MCP Server
//!
//! Lets AI agents read records from an application's models without handing
//! them the query language.
//!
//! ## Tools
//!
//! - `select_records` - Rows, counts or aggregates for one model
//! - `describe_table` - Column metadata for one table
//! - `list_models` - Models found in the application's models directory
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "recordbridge": {
//!       "command": "recordbridge-mcp",
//!       "args": ["--projects-root", "/path/to/app"]
//!     }
//!   }
//! }
//! ```

use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use rmcp::transport::stdio;
use rmcp::ServiceExt;

pub mod config;
pub mod tools;

pub use config::{Args, Config};
pub use tools::RecordBridgeService;

pub async fn main_entry() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = Config::from_env().apply_args(&args);
    if !config.projects_root.is_dir() {
        log::warn!(
            "Projects root {} is not a directory; every query will fail to start",
            config.projects_root.display()
        );
    }
    log::info!(
        "Starting Record Bridge MCP server (projects root: {}, evaluator: {})",
        config.projects_root.display(),
        config.evaluator
    );

    let service = RecordBridgeService::new(config);
    let server = service
        .serve(stdio())
        .await
        .context("failed to start MCP server on stdio")?;

    server.waiting().await?;

    log::info!("Record Bridge MCP server stopped");
    Ok(())
}

fn init_logging(verbose: bool) {
    // stdout is the MCP channel; logs go to stderr only.
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();
}

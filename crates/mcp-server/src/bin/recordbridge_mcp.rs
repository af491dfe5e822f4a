use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    recordbridge_mcp::main_entry().await
}

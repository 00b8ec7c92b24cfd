//! freeland - provision and launch the tunnel
//!
//! Proves the local identity is entitled, resolves its egress node, writes
//! the engine profile and runs the engine until interrupted.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    freeland_cli::run().await
}

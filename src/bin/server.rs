//! Shopping assistant HTTP server.
//! Run with: cargo run --bin shopping-agent-server

use std::process::ExitCode;

use shopping_agent::start_shopping_agent;

fn main() -> ExitCode {
    start_shopping_agent::run()
}

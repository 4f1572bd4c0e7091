//! Curio Server CLI
//!
//! Starts the HTTP server for RFP upload and clause extraction.

use curio_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using default test configuration");
        eprintln!("Usage: curio-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default_test_config()
    };

    start_server(config).await
}

fn print_help() {
    println!("Curio Server - RFP clause extraction API");
    println!();
    println!("USAGE:");
    println!("    curio-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file should contain:");
    println!("    - bind_address: IP address to bind (e.g., '127.0.0.1')");
    println!("    - bind_port: Port number (e.g., 8000)");
    println!("    - database_path: SQLite file (default: curio.db)");
    println!("    - storage_dir: Upload directory root (default: local_storage)");
    println!("    - [extractor]: min_clause_chars, strict_formats, attach_page_numbers,");
    println!("      section_prefix, max_document_bytes, fetch_timeout_secs");
    println!();
    println!("LOGGING:");
    println!("    Set RUST_LOG (e.g., RUST_LOG=curio_extractor=debug) to adjust verbosity.");
    println!();
}

//! cookieforge - forge, decode and crack HMAC-signed session cookies.
//!
//! Copyright (C) 2026 Maverick
//! SPDX-License-Identifier: AGPL-3.0-only
//!
//! Sets up logging, parses the command line, and dispatches to the
//! subcommand runners. Results print to stdout; everything else goes to
//! stderr.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cookieforge::Result;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    dotenvy::dotenv().ok();

    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);

    if log_format.eq_ignore_ascii_case("json") {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("[!] {err}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.signer_config();
    match &cli.command {
        Commands::Encode(args) => commands::encode::run(args, config),
        Commands::Decode(args) => commands::decode::run(args, config),
        Commands::Guess(args) => commands::guess::run(args, config),
        Commands::Bruteforce(args) => commands::bruteforce::run(args, config),
    }
}

mod autocomplete;
mod cli;
mod config;
mod handlers;
mod http;
mod importer;
mod init;
mod models;

use std::{path::PathBuf, sync::Arc};

use clap::Parser;

use autocomplete::Autocomplete;
use cli::Commands;
use handlers::{Consts, Ctx};

#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() {
    init::init_logger();

    let cli = cli::Cli::parse();

    // Handle CLI flags.
    if let Some(cmd) = cli.command {
        match cmd {
            // Generate a new config file.
            Commands::NewConfig { path } => {
                match init::generate_config(&path) {
                    Ok(_) => {
                        log::info!("config file generated: {}", path.display());
                    }
                    Err(e) => {
                        log::error!("error generating config: {}", e);
                        std::process::exit(1);
                    }
                }
                return;
            }

            // Load the vocabulary and print suggestions.
            Commands::Query {
                prefix,
                file,
                scores,
            } => {
                let config = init::init_config(&cli.config);
                let files = if file.is_empty() {
                    to_paths(&config.autocomplete.files)
                } else {
                    file
                };

                let ac = init::init_autocomplete(&config.autocomplete, &files);
                let prefix = if config.autocomplete.normalize {
                    autocomplete::normalize_word(&prefix)
                } else {
                    prefix
                };
                print_suggestions(&ac, &prefix, scores);
                return;
            }

            // Built-in vocabulary.
            Commands::Demo { prefix } => {
                let ac = init::init_demo();
                println!("top suggestions for '{}':", prefix);
                print_suggestions(&ac, &prefix, true);
                return;
            }
        }
    }

    // Load config.
    let config = init::init_config(&cli.config);

    // Build the index from the configured vocabulary files.
    let ac = init::init_autocomplete(
        &config.autocomplete,
        &to_paths(&config.autocomplete.files),
    );

    if config.app.admin_username.is_empty() || config.app.admin_password.is_empty() {
        log::warn!("admin credentials not set, write API is disabled");
    }

    // Setup the global app context used in HTTP handlers.
    let ctx = Arc::new(Ctx::new(
        ac,
        Consts {
            normalize: config.autocomplete.normalize,
            admin_username: config.app.admin_username,
            admin_password: config.app.admin_password,
        },
    ));

    // Start the HTTP server.
    let routes = http::init_handlers(ctx);
    let addr = if config.app.address.is_empty() {
        "127.0.0.1:9000".to_string()
    } else {
        config.app.address
    };

    log::info!("starting server on {}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("error listening on {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, routes).await {
        log::error!("server error: {}", e);
        std::process::exit(1);
    }
}

fn to_paths(files: &[String]) -> Vec<PathBuf> {
    files.iter().map(PathBuf::from).collect()
}

/// Print suggestions one per line, optionally with their frequencies.
fn print_suggestions(ac: &Autocomplete, prefix: &str, scores: bool) {
    for (term, freq) in ac.top_matches(prefix) {
        if scores {
            println!("{}\t{}", term, freq);
        } else {
            println!("{}", term);
        }
    }
}

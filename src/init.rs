use std::path::{Path, PathBuf};

use crate::{
    autocomplete::{Autocomplete, Freq},
    config::{self, ConfigError},
    importer,
    models::{AutocompleteConfig, Config},
};

/// Vocabulary used by the `demo` command.
pub const DEMO_WORDS: &[(&str, Freq)] = &[
    ("apple", 10),
    ("app", 15),
    ("ape", 7),
    ("apex", 12),
    ("apply", 9),
    ("application", 8),
    ("apt", 6),
];

/// Initialize logger.
pub fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .format(|buf, record| {
            use std::io::Write;
            let level = if record.level() != log::Level::Info {
                format!("[{}] ", record.level())
            } else {
                String::new()
            };
            writeln!(
                buf,
                "{} {}:{} {}{}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                level,
                record.args()
            )
        })
        .init();
}

/// Load and merge one or more config files. Exits on error.
pub fn init_config(paths: &[PathBuf]) -> Config {
    match config::load_all(paths) {
        Ok(c) => c,
        Err(e) => {
            log::error!("error loading config: {}", e);
            std::process::exit(1);
        }
    }
}

/// Write the sample config file to the given path.
pub fn generate_config(path: &Path) -> Result<(), ConfigError> {
    config::generate_sample(path)
}

/// Build the index from the given CSV files. Exits on error.
pub fn init_autocomplete(cfg: &AutocompleteConfig, files: &[PathBuf]) -> Autocomplete {
    let mut ac = Autocomplete::with_top_k(cfg.top_k);

    for f in files {
        if let Err(e) = importer::import_csv(f, &mut ac, cfg.normalize) {
            log::error!("error importing {}: {}", f.display(), e);
            std::process::exit(1);
        }
    }

    if ac.is_empty() {
        log::warn!("no terms loaded, starting with an empty index");
    }

    log::info!(
        "index ready: {} terms, {} nodes, top {} per prefix",
        ac.len(),
        ac.num_nodes(),
        ac.top_k()
    );
    ac
}

/// Build the index from the built-in demo vocabulary.
pub fn init_demo() -> Autocomplete {
    let mut ac = Autocomplete::new();
    for (w, f) in DEMO_WORDS {
        ac.insert(w, *f);
    }
    ac
}

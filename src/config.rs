use std::path::{Path, PathBuf};

use crate::models::Config;

const SAMPLE_CONFIG: &str = include_str!("../config.sample.toml");

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("config file already exists")]
    Exists,
    #[error("no config files specified")]
    Empty,
}

/// Load and merge one or more config files.
pub fn load_all(paths: &[PathBuf]) -> Result<Config, ConfigError> {
    let mut config: Option<Config> = None;

    for path in paths {
        log::info!("loading config: {}", path.display());
        let c = read_file(path)?;
        if let Some(ref mut existing) = config {
            // Merge configs.
            merge(existing, c);
        } else {
            config = Some(c);
        }
    }

    config.ok_or(ConfigError::Empty)
}

/// Generate sample config file.
pub fn generate_sample(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::Exists);
    }
    std::fs::write(path, SAMPLE_CONFIG)?;
    Ok(())
}

/// Load configuration from a given TOML file.
fn read_file(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&content)?;
    Ok(cfg)
}

/// Merge the given src config into the dest config struct.
fn merge(dest: &mut Config, src: Config) {
    // Merge app config.
    if !src.app.address.is_empty() {
        dest.app.address = src.app.address;
    }
    if !src.app.admin_username.is_empty() {
        dest.app.admin_username = src.app.admin_username;
    }
    if !src.app.admin_password.is_empty() {
        dest.app.admin_password = src.app.admin_password;
    }

    // Merge autocomplete config.
    if src.autocomplete.top_k > 0 {
        dest.autocomplete.top_k = src.autocomplete.top_k;
    }
    if !src.autocomplete.files.is_empty() {
        dest.autocomplete.files = src.autocomplete.files;
    }
    dest.autocomplete.normalize = src.autocomplete.normalize;
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_sample_config_parses() {
        let cfg: Config = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(cfg.app.address, "127.0.0.1:9000");
        assert_eq!(cfg.autocomplete.top_k, 5);
        assert!(cfg.autocomplete.normalize);
        assert_eq!(cfg.autocomplete.files, vec!["words.csv"]);
    }

    #[test]
    fn test_merge_in_order() {
        let dir = TempDir::new().unwrap();
        let a = write(
            &dir,
            "a.toml",
            r#"
            [app]
            address = ":8000"
            admin_username = "root"

            [autocomplete]
            top_k = 8
            normalize = true
            files = ["a.csv"]
            "#,
        );
        let b = write(
            &dir,
            "b.toml",
            r#"
            [app]
            address = ":9001"

            [autocomplete]
            files = ["b.csv", "c.csv"]
            "#,
        );

        let cfg = load_all(&[a, b]).unwrap();
        assert_eq!(cfg.app.address, ":9001");
        assert_eq!(cfg.app.admin_username, "root");
        assert_eq!(cfg.autocomplete.top_k, 8);
        assert!(!cfg.autocomplete.normalize);
        assert_eq!(cfg.autocomplete.files, vec!["b.csv", "c.csv"]);
    }

    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(load_all(&[]), Err(ConfigError::Empty)));
        assert!(matches!(
            load_all(&[dir.path().join("missing.toml")]),
            Err(ConfigError::Io(_))
        ));

        let bad = write(&dir, "bad.toml", "[autocomplete]\ntop_k = \"five\"\n");
        assert!(matches!(load_all(&[bad]), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_generate_sample() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        generate_sample(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SAMPLE_CONFIG);

        // Never overwrites.
        assert!(matches!(generate_sample(&path), Err(ConfigError::Exists)));
    }
}

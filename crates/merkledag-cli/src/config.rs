use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use merkledag_core::{AddConfig, FsOptions, DEFAULT_BLOCK_SIZE, DEFAULT_MAX_DEPTH};

use crate::cli::AddArgs;

/// Settings for `mdag`, read from an optional TOML file.
///
/// Command-line flags take precedence over anything set here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MdagConfig {
    pub block_size: usize,
    pub max_depth: usize,
    pub store_dir: PathBuf,
    /// Hash domain tag. Roots built with different tags never match.
    pub domain: Option<String>,
    pub skip_unsupported: bool,
}

impl Default for MdagConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            max_depth: DEFAULT_MAX_DEPTH,
            store_dir: PathBuf::from(".mdag/objects"),
            domain: None,
            skip_unsupported: false,
        }
    }
}

impl MdagConfig {
    /// Read a config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Config file (if any) with the command-line flags applied on top.
    pub fn resolve(args: &AddArgs) -> anyhow::Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(args);
        Ok(config)
    }

    fn apply(&mut self, args: &AddArgs) {
        if let Some(block_size) = args.block_size {
            self.block_size = block_size;
        }
        if let Some(max_depth) = args.max_depth {
            self.max_depth = max_depth;
        }
        if let Some(store) = &args.store {
            self.store_dir = store.clone();
        }
        if let Some(domain) = &args.domain {
            self.domain = Some(domain.clone());
        }
        self.skip_unsupported |= args.skip_unsupported;
    }

    pub fn add_config(&self) -> AddConfig {
        AddConfig {
            block_size: self.block_size,
            max_depth: self.max_depth,
        }
    }

    pub fn fs_options(&self) -> FsOptions {
        FsOptions {
            skip_unsupported: self.skip_unsupported,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use clap::Parser;

    fn add_args(argv: &[&str]) -> AddArgs {
        let mut full = vec!["mdag", "add"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Add(args) => args,
        }
    }

    #[test]
    fn default_config() {
        let c = MdagConfig::default();
        assert_eq!(c.block_size, 262_144);
        assert_eq!(c.max_depth, 1024);
        assert_eq!(c.store_dir, PathBuf::from(".mdag/objects"));
        assert!(c.domain.is_none());
        assert!(!c.skip_unsupported);
        assert_eq!(c.add_config(), AddConfig::default());
    }

    #[test]
    fn parse_partial_toml() {
        let c = MdagConfig::parse("block_size = 4096\ndomain = \"backup\"\n").unwrap();
        assert_eq!(c.block_size, 4096);
        assert_eq!(c.domain.as_deref(), Some("backup"));
        assert_eq!(c.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(MdagConfig::parse("blocksize = 1").is_err());
    }

    #[test]
    fn flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdag.toml");
        fs::write(&path, "block_size = 4096\nmax_depth = 3\nstore_dir = \"/srv/objects\"\n").unwrap();

        let args = add_args(&[
            ".",
            "--config",
            path.to_str().unwrap(),
            "--block-size",
            "64",
            "--skip-unsupported",
        ]);
        let c = MdagConfig::resolve(&args).unwrap();
        assert_eq!(c.block_size, 64);
        assert_eq!(c.max_depth, 3);
        assert_eq!(c.store_dir, PathBuf::from("/srv/objects"));
        assert!(c.fs_options().skip_unsupported);
    }

    #[test]
    fn missing_config_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let args = add_args(&[".", "--config", path.to_str().unwrap()]);
        let err = MdagConfig::resolve(&args).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}

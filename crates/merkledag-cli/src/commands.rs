use std::path::{Path, PathBuf};

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;

use merkledag_core::{AddStats, DagBuilder, FsNode};
use merkledag_crypto::Blake3Hasher;
use merkledag_store::{FileKvStore, InMemoryKvStore, KvStore};
use merkledag_types::Hash;

use crate::cli::*;
use crate::config::MdagConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Add(args) => cmd_add(args, &cli.format),
    }
}

/// What `mdag add` reports.
#[derive(Debug, Serialize)]
pub struct AddReport {
    pub root: Hash,
    pub stats: AddStats,
    /// Store directory written to; `None` for a dry run.
    pub store: Option<PathBuf>,
}

fn cmd_add(args: AddArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = MdagConfig::resolve(&args)?;
    let report = add_path(&args.path, &config, args.dry_run)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            println!("{}", report.root.to_string().yellow().bold());
            let stats = &report.stats;
            let target = match &report.store {
                Some(dir) => dir.display().to_string().bold(),
                None => "memory (dry run)".dimmed(),
            };
            eprintln!(
                "{} {} objects ({} blobs, {} chunk lists, {} trees), {} bytes → {}",
                "✓".green().bold(),
                stats.objects(),
                stats.blobs,
                stats.chunk_lists,
                stats.trees,
                stats.bytes_stored,
                target
            );
        }
    }
    Ok(())
}

/// Add `path` using `config`, writing to the configured store unless
/// `dry_run` is set.
pub fn add_path(path: &Path, config: &MdagConfig, dry_run: bool) -> anyhow::Result<AddReport> {
    let node = FsNode::open(path, config.fs_options())
        .with_context(|| format!("cannot open {}", path.display()))?;
    let hasher = match &config.domain {
        Some(domain) => Blake3Hasher::with_domain(domain.as_str()),
        None => Blake3Hasher::new(),
    };

    let (root, stats, store) = if dry_run {
        let (root, stats) = build(InMemoryKvStore::new(), hasher, config, &node)?;
        (root, stats, None)
    } else {
        let store = FileKvStore::open(&config.store_dir)
            .with_context(|| format!("cannot open store {}", config.store_dir.display()))?;
        let (root, stats) = build(store, hasher, config, &node)?;
        (root, stats, Some(config.store_dir.clone()))
    };
    tracing::debug!(root = %root, dry_run, "added {}", path.display());

    Ok(AddReport { root, stats, store })
}

fn build<S: KvStore>(
    store: S,
    hasher: Blake3Hasher,
    config: &MdagConfig,
    node: &merkledag_core::Node,
) -> anyhow::Result<(Hash, AddStats)> {
    let mut builder = DagBuilder::new(store, hasher, config.add_config())?;
    let root = builder
        .add(node)
        .with_context(|| format!("failed to add {}", node.name()))?;
    Ok((root, builder.stats()))
}

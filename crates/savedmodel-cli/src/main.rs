mod cli;
mod show;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use savedmodel_core::{Error, TagSet};
use savedmodel_loader::read_meta_graphs;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Show {
            dir,
            tag_set,
            signature_def,
            log,
        } => {
            init_tracing(&log)?;
            let tags = tag_set.map(TagSet::from_iter);
            let text = show(&dir, tags.as_ref(), signature_def.as_deref()).await?;
            print!("{text}");
            Ok(())
        }
    }
}

fn init_tracing(log: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log).with_context(|| format!("invalid log filter {log:?}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

async fn show(dir: &Path, tags: Option<&TagSet>, signature: Option<&str>) -> Result<String> {
    let catalog = read_meta_graphs(dir)
        .await
        .with_context(|| format!("failed to inspect {}", dir.display()))?;
    tracing::debug!(meta_graphs = catalog.len(), "catalog loaded");

    let text = match (tags, signature) {
        (None, _) => show::render_catalog(&catalog),
        (Some(tags), None) => {
            let meta_graph = catalog
                .meta_graph(tags)
                .ok_or_else(|| Error::TagsNotFound { tags: tags.clone() })?;
            show::render_meta_graph(meta_graph)
        }
        (Some(tags), Some(name)) => show::render_signature(name, catalog.resolve(tags, name)?),
    };
    Ok(text)
}

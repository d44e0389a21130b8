//! Standalone page generators: the examples index and the README page.

use tracing::{info, instrument};

use victory_discovery::{IndexOptions, list_matching_files};
use victory_markdown::PageOptions;
use victory_shared::{Result, read_source, write_artifact};

use crate::context::BuildContext;
use crate::step::StepOutcome;

/// Write `<examples_dir>/<index_file>` linking every example page.
#[instrument(skip_all)]
pub fn generate_examples(ctx: &BuildContext) -> Result<StepOutcome> {
    let config = &ctx.config().examples;
    let dir = ctx.resolve(&config.dir);

    let entries = list_matching_files(&dir, &IndexOptions::from(config))?;
    let page = victory_artifacts::examples_index_page(&ctx.config().project_title, &entries);

    let meta = write_artifact(&dir.join(&config.index_file), &page)?;
    info!(file = %meta.filename, entries = entries.len(), "examples index written");
    Ok(StepOutcome::Written(vec![meta]))
}

/// Render the README Markdown into a standalone HTML page.
#[instrument(skip_all)]
pub fn generate_readme(ctx: &BuildContext) -> Result<StepOutcome> {
    let config = &ctx.config().readme;
    let markdown = read_source(&ctx.resolve(&config.source))?;

    let opts = PageOptions {
        title: format!("README - {}", ctx.config().project_title),
    };
    let html = victory_markdown::render_page(&markdown, &opts);

    let meta = write_artifact(&ctx.resolve(&config.output), &html)?;
    info!(file = %meta.filename, size = meta.size_bytes, "readme rendered");
    Ok(StepOutcome::Written(vec![meta]))
}

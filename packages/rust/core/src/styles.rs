//! Stylesheet steps: Sass compilation, vendor prefixing, minification.

use std::path::Path;

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Features, Targets};
use tracing::{error, info, instrument};

use victory_artifacts::prepend;
use victory_shared::{Result, Variant, VictoryError, read_source, write_artifact};

use crate::context::BuildContext;
use crate::step::StepOutcome;

/// Compile the variant's Sass entry point to `dist/{basename}.css`.
///
/// A Sass error is fatal only with `strict_styles`; otherwise it is logged and
/// the step reports [`StepOutcome::Skipped`], leaving any previous artifact in place.
#[instrument(skip_all, fields(%variant))]
pub fn compile_styles(ctx: &BuildContext, variant: Variant) -> Result<StepOutcome> {
    let vc = ctx.config().variant(variant);
    let entry = ctx.resolve(&vc.style_entry);
    std::fs::metadata(&entry).map_err(|e| VictoryError::io(&entry, e))?;

    let css = match compile_sass(&entry) {
        Ok(css) => css,
        Err(err) if !ctx.config().strict_styles => {
            error!(error = %err, "style compilation failed, continuing");
            return Ok(StepOutcome::Skipped {
                reason: err.to_string(),
            });
        }
        Err(err) => return Err(err),
    };

    let meta = write_artifact(&ctx.dist_path(&vc.css_file()), &css)?;
    info!(file = %meta.filename, size = meta.size_bytes, sha256 = %meta.sha256, "styles compiled");
    Ok(StepOutcome::Written(vec![meta]))
}

/// Add vendor prefixes to `dist/{basename}.css` and stamp the block header.
///
/// The artifact is overwritten. Plain comments, including a previously stamped
/// header, are dropped by the parser, so re-running does not stack headers.
#[instrument(skip_all, fields(%variant))]
pub fn vendor_prefix(ctx: &BuildContext, variant: Variant) -> Result<StepOutcome> {
    let vc = ctx.config().variant(variant);
    let path = ctx.dist_path(&vc.css_file());
    let css = read_source(&path)?;

    let targets = browser_targets(&ctx.config().styles.prefix_browsers)?;
    let prefixed = transform_css(&css, &path, targets, false)?;
    let header = ctx.stamper()?.block_comment();

    let meta = write_artifact(&path, &prepend(&header, &prefixed))?;
    info!(file = %meta.filename, size = meta.size_bytes, sha256 = %meta.sha256, "styles prefixed");
    Ok(StepOutcome::Written(vec![meta]))
}

/// Minify `dist/{basename}.css` into `dist/{basename}.min.css` with the inline header.
#[instrument(skip_all, fields(%variant))]
pub fn minify_styles(ctx: &BuildContext, variant: Variant) -> Result<StepOutcome> {
    let vc = ctx.config().variant(variant);
    let source = ctx.dist_path(&vc.css_file());
    let css = read_source(&source)?;

    let targets = browser_targets(&ctx.config().styles.minify_browsers)?;
    let minified = transform_css(&css, &source, targets, true)?;
    let header = ctx.stamper()?.inline_comment();

    let meta = write_artifact(&ctx.dist_path(&vc.min_css_file()), &prepend(&header, &minified))?;
    info!(file = %meta.filename, size = meta.size_bytes, sha256 = %meta.sha256, "styles minified");
    Ok(StepOutcome::Written(vec![meta]))
}

/// Compile a Sass file, resolving imports relative to its directory.
pub fn compile_sass(entry: &Path) -> Result<String> {
    let mut options = grass::Options::default().style(grass::OutputStyle::Expanded);
    if let Some(dir) = entry.parent() {
        options = options.load_path(dir);
    }

    grass::from_path(entry, &options).map_err(|e| VictoryError::compile(entry, e.to_string()))
}

/// Resolve browserslist queries into lightningcss targets.
///
/// Media queries always print in the `min-`/`max-` form so authored
/// breakpoints are not rewritten into range syntax.
fn browser_targets(queries: &[String]) -> Result<Targets> {
    let browsers = Browsers::from_browserslist(queries.iter().map(String::as_str))
        .map_err(|e| VictoryError::tool("browserslist", e.to_string()))?;

    Ok(Targets {
        browsers,
        include: Features::MediaRangeSyntax,
        exclude: Features::empty(),
    })
}

/// Parse, lower for `targets`, and print a stylesheet.
fn transform_css(css: &str, path: &Path, targets: Targets, minify: bool) -> Result<String> {
    let parser_options = ParserOptions {
        filename: path.display().to_string(),
        ..ParserOptions::default()
    };

    let mut sheet = StyleSheet::parse(css, parser_options)
        .map_err(|e| VictoryError::tool("lightningcss", e.to_string()))?;

    sheet
        .minify(MinifyOptions {
            targets,
            ..MinifyOptions::default()
        })
        .map_err(|e| VictoryError::tool("lightningcss", e.to_string()))?;

    let output = sheet
        .to_css(PrinterOptions {
            minify,
            targets,
            ..PrinterOptions::default()
        })
        .map_err(|e| VictoryError::tool("lightningcss", e.to_string()))?;

    Ok(output.code)
}

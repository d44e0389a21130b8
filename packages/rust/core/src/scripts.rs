//! Script steps: fragment concatenation and minification.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions};
use oxc_minifier::{Minifier, MinifierOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;
use tracing::{debug, info, instrument};

use victory_artifacts::prepend;
use victory_shared::{
    ArtifactMeta, Result, Variant, VariantConfig, VictoryError, read_source, write_artifact,
};

use crate::context::BuildContext;
use crate::step::StepOutcome;

/// Separator placed between concatenated fragments.
const FRAGMENT_SEPARATOR: &str = "\n";

/// Concatenate the variant's script fragments, in declared order, into
/// `dist/{basename}.js` with the block header.
#[instrument(skip_all, fields(%variant))]
pub fn concatenate_scripts(ctx: &BuildContext, variant: Variant) -> Result<StepOutcome> {
    let vc = ctx.config().variant(variant);

    let fragments = vc
        .scripts
        .iter()
        .map(|rel| read_source(&ctx.resolve(rel)))
        .collect::<Result<Vec<_>>>()?;
    debug!(count = fragments.len(), "script fragments read");

    let header = ctx.stamper()?.block_comment();
    let bundle = prepend(&header, &fragments.join(FRAGMENT_SEPARATOR));

    let meta = write_artifact(&ctx.dist_path(&vc.js_file()), &bundle)?;
    info!(file = %meta.filename, size = meta.size_bytes, sha256 = %meta.sha256, "scripts concatenated");
    Ok(StepOutcome::Written(vec![meta]))
}

/// Minify `dist/{basename}.js` into `dist/{basename}.min.js`, then stamp the
/// inline header onto the minified file.
#[instrument(skip_all, fields(%variant))]
pub fn minify_scripts(ctx: &BuildContext, variant: Variant) -> Result<StepOutcome> {
    let vc = ctx.config().variant(variant);

    let unstamped = write_minified(ctx, vc)?;
    debug!(file = %unstamped.filename, size = unstamped.size_bytes, "scripts minified");

    let meta = stamp_minified(ctx, vc)?;
    info!(file = %meta.filename, size = meta.size_bytes, sha256 = %meta.sha256, "minified scripts stamped");
    Ok(StepOutcome::Written(vec![meta]))
}

fn write_minified(ctx: &BuildContext, vc: &VariantConfig) -> Result<ArtifactMeta> {
    let path = ctx.dist_path(&vc.js_file());
    let source = read_source(&path)?;
    let minified = minify_js(&source, &path)?;
    write_artifact(&ctx.dist_path(&vc.min_js_file()), &minified)
}

/// Parse `source` as a classic script, compress and mangle it, and print it
/// back without whitespace. Statement boundaries inferred from newlines are
/// resolved by the parser, so the output keeps the source's meaning.
pub fn minify_js(source: &str, path: &Path) -> Result<String> {
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, source, SourceType::cjs()).parse();
    if parsed.panicked || !parsed.errors.is_empty() {
        let message = parsed
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(VictoryError::compile(path, message));
    }

    let mut program = parsed.program;
    let minified = Minifier::new(MinifierOptions::default()).build(&allocator, &mut program);

    let code = Codegen::new()
        .with_options(CodegenOptions::minify())
        .with_scoping(minified.scoping)
        .build(&program)
        .code;

    Ok(code)
}

fn stamp_minified(ctx: &BuildContext, vc: &VariantConfig) -> Result<ArtifactMeta> {
    let path = ctx.dist_path(&vc.min_js_file());
    let minified = read_source(&path)?;
    let header = ctx.stamper()?.inline_comment();
    write_artifact(&path, &prepend(&header, &minified))
}

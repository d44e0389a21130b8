//! Leaf pipeline steps.

use victory_shared::{ArtifactMeta, Result, Variant};

use crate::context::BuildContext;
use crate::{generators, scripts, styles};

/// A single action the runner can execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Sass entry point → `dist/{basename}.css`.
    CompileStyles(Variant),
    /// Vendor-prefix `dist/{basename}.css` in place and stamp the block header.
    VendorPrefix(Variant),
    /// `dist/{basename}.css` → `dist/{basename}.min.css` with the inline header.
    MinifyStyles(Variant),
    /// Script fragments → `dist/{basename}.js` with the block header.
    ConcatenateScripts(Variant),
    /// `dist/{basename}.js` → `dist/{basename}.min.js` with the inline header.
    MinifyScripts(Variant),
    /// Regenerate the examples index page.
    Examples,
    /// Render the README to HTML.
    Readme,
}

impl Step {
    /// Execute this step against `ctx`.
    pub fn run(self, ctx: &BuildContext) -> Result<StepOutcome> {
        match self {
            Self::CompileStyles(variant) => styles::compile_styles(ctx, variant),
            Self::VendorPrefix(variant) => styles::vendor_prefix(ctx, variant),
            Self::MinifyStyles(variant) => styles::minify_styles(ctx, variant),
            Self::ConcatenateScripts(variant) => scripts::concatenate_scripts(ctx, variant),
            Self::MinifyScripts(variant) => scripts::minify_scripts(ctx, variant),
            Self::Examples => generators::generate_examples(ctx),
            Self::Readme => generators::generate_readme(ctx),
        }
    }

    pub fn variant(self) -> Option<Variant> {
        match self {
            Self::CompileStyles(v)
            | Self::VendorPrefix(v)
            | Self::MinifyStyles(v)
            | Self::ConcatenateScripts(v)
            | Self::MinifyScripts(v) => Some(v),
            Self::Examples | Self::Readme => None,
        }
    }

    fn action(self) -> &'static str {
        match self {
            Self::CompileStyles(_) => "compile styles",
            Self::VendorPrefix(_) => "vendor prefix",
            Self::MinifyStyles(_) => "minify styles",
            Self::ConcatenateScripts(_) => "concatenate scripts",
            Self::MinifyScripts(_) => "minify scripts",
            Self::Examples => "generate examples index",
            Self::Readme => "render readme",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.variant() {
            Some(variant) => write!(f, "{} ({variant})", self.action()),
            None => f.write_str(self.action()),
        }
    }
}

/// What a step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Artifacts written, in write order.
    Written(Vec<ArtifactMeta>),
    /// The step logged a non-fatal failure and wrote nothing.
    Skipped { reason: String },
}

impl StepOutcome {
    pub fn artifacts(&self) -> &[ArtifactMeta] {
        match self {
            Self::Written(artifacts) => artifacts,
            Self::Skipped { .. } => &[],
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

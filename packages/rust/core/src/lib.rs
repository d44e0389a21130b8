//! Build orchestration for Victory.css.
//!
//! This crate ties the asset toolchain (Sass, prefixing, minification, script
//! concatenation) and the page generators into named tasks that run strictly
//! in sequence against a single [`BuildContext`].

pub mod context;
pub mod generators;
pub mod runner;
pub mod scripts;
pub mod step;
pub mod styles;

pub use context::BuildContext;
pub use runner::{
    DEFAULT_TASK, PipelineRunner, ProgressReporter, RunReport, SilentProgress, StepReport,
    TaskDef, TaskKind, TaskRegistry,
};
pub use step::{Step, StepOutcome};

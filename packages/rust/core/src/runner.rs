//! Named tasks and their sequential execution.
//!
//! A task is either a leaf [`Step`] or a series of other tasks. Running a set
//! of task names first expands them, depth first, into a flat plan of steps;
//! unknown names and cycles are rejected before anything executes. Steps then
//! run one at a time, and the first error aborts the rest of the plan.

use std::time::{Duration, Instant};

use tracing::{error, info, instrument, warn};

use victory_shared::{Result, Variant, VictoryError};

use crate::context::BuildContext;
use crate::step::{Step, StepOutcome};

/// Name run when no task is given.
pub const DEFAULT_TASK: &str = "default";

// ---------------------------------------------------------------------------
// Task registry
// ---------------------------------------------------------------------------

/// How a named task executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    Leaf(Step),
    /// Run the named tasks in order.
    Series(Vec<String>),
}

/// A named, documented task.
#[derive(Debug, Clone)]
pub struct TaskDef {
    pub name: String,
    pub description: String,
    pub kind: TaskKind,
}

impl TaskDef {
    pub fn leaf(name: &str, description: &str, step: Step) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind: TaskKind::Leaf(step),
        }
    }

    pub fn series(name: &str, description: &str, tasks: &[&str]) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind: TaskKind::Series(tasks.iter().map(|t| (*t).to_string()).collect()),
        }
    }
}

/// Task definitions in registration order.
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    tasks: Vec<TaskDef>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The Victory.css task set.
    pub fn builtin() -> Self {
        use Variant::{Basic, Standard};

        let defs = [
            TaskDef::leaf(
                "mergecss",
                "Compile the standard stylesheet",
                Step::CompileStyles(Standard),
            ),
            TaskDef::leaf(
                "prefix",
                "Vendor-prefix and stamp the standard stylesheet",
                Step::VendorPrefix(Standard),
            ),
            TaskDef::leaf("mincss", "Minify the standard stylesheet", Step::MinifyStyles(Standard)),
            TaskDef::leaf(
                "mergejs",
                "Concatenate the standard scripts",
                Step::ConcatenateScripts(Standard),
            ),
            TaskDef::leaf(
                "minjs",
                "Minify the standard script bundle",
                Step::MinifyScripts(Standard),
            ),
            TaskDef::leaf(
                "basic:compile",
                "Compile the basic stylesheet",
                Step::CompileStyles(Basic),
            ),
            TaskDef::leaf(
                "basic:prefix",
                "Vendor-prefix and stamp the basic stylesheet",
                Step::VendorPrefix(Basic),
            ),
            TaskDef::series(
                "basic:mergecss",
                "Compile, prefix and stamp the basic stylesheet",
                &["basic:compile", "basic:prefix"],
            ),
            TaskDef::leaf("basic:mincss", "Minify the basic stylesheet", Step::MinifyStyles(Basic)),
            TaskDef::leaf(
                "basic:mergejs",
                "Concatenate the basic scripts",
                Step::ConcatenateScripts(Basic),
            ),
            TaskDef::leaf(
                "basic:minjs",
                "Minify the basic script bundle",
                Step::MinifyScripts(Basic),
            ),
            TaskDef::leaf("examples", "Regenerate the examples index page", Step::Examples),
            TaskDef::leaf("readme", "Render README.md to README.html", Step::Readme),
            TaskDef::series(
                "standard",
                "Build every standard artifact",
                &["mergecss", "prefix", "mincss", "mergejs", "minjs"],
            ),
            TaskDef::series(
                "basic",
                "Build every basic artifact",
                &["basic:mergecss", "basic:mincss", "basic:mergejs", "basic:minjs"],
            ),
            TaskDef::series(
                DEFAULT_TASK,
                "Build the standard then the basic variant",
                &["standard", "basic"],
            ),
        ];

        Self {
            tasks: Vec::from(defs),
        }
    }

    /// Add a task. Names must be unique.
    pub fn register(&mut self, def: TaskDef) -> Result<()> {
        if self.get(&def.name).is_some() {
            return Err(VictoryError::task(format!(
                "task '{}' is already registered",
                def.name
            )));
        }
        self.tasks.push(def);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TaskDef> {
        self.tasks.iter().find(|t| t.name == name)
    }

    pub fn tasks(&self) -> impl Iterator<Item = &TaskDef> {
        self.tasks.iter()
    }

    /// Expand task names into the ordered list of steps they run.
    pub fn plan<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<Step>> {
        let mut steps = Vec::new();
        let mut stack = Vec::new();
        for name in names {
            self.expand(name.as_ref(), &mut stack, &mut steps)?;
        }
        Ok(steps)
    }

    fn expand<'a>(
        &'a self,
        name: &'a str,
        stack: &mut Vec<&'a str>,
        steps: &mut Vec<Step>,
    ) -> Result<()> {
        if stack.contains(&name) {
            stack.push(name);
            return Err(VictoryError::task(format!(
                "task cycle: {}",
                stack.join(" -> ")
            )));
        }

        let def = self.get(name).ok_or_else(|| match stack.last() {
            Some(parent) => {
                VictoryError::task(format!("unknown task '{name}' (referenced by '{parent}')"))
            }
            None => VictoryError::task(format!("unknown task '{name}'")),
        })?;

        match &def.kind {
            TaskKind::Leaf(step) => steps.push(*step),
            TaskKind::Series(children) => {
                stack.push(name);
                for child in children {
                    self.expand(child, stack, steps)?;
                }
                stack.pop();
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

/// Outcome of one executed step.
#[derive(Debug, Clone)]
pub struct StepReport {
    pub step: Step,
    pub outcome: StepOutcome,
    pub elapsed: Duration,
}

/// Outcome of a whole run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub tasks: Vec<String>,
    pub steps: Vec<StepReport>,
    pub elapsed: Duration,
}

impl RunReport {
    /// Steps that logged a non-fatal failure.
    pub fn skipped(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(|s| s.outcome.is_skipped())
    }
}

/// Progress callback for reporting run status.
pub trait ProgressReporter: Send + Sync {
    /// Called before a step runs. `index` is 1-based.
    fn step_started(&self, step: Step, index: usize, total: usize);
    /// Called after a step completes.
    fn step_finished(&self, report: &StepReport);
    /// Called when a step fails; no further steps run.
    fn step_failed(&self, step: Step, error: &VictoryError);
    /// Called when every step has completed.
    fn done(&self, report: &RunReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn step_started(&self, _step: Step, _index: usize, _total: usize) {}
    fn step_finished(&self, _report: &StepReport) {}
    fn step_failed(&self, _step: Step, _error: &VictoryError) {}
    fn done(&self, _report: &RunReport) {}
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Executes named tasks against a build context, one step at a time.
#[derive(Debug)]
pub struct PipelineRunner<'a> {
    ctx: &'a BuildContext,
    registry: TaskRegistry,
}

impl<'a> PipelineRunner<'a> {
    /// Runner over the builtin task set.
    pub fn new(ctx: &'a BuildContext) -> Self {
        Self::with_registry(ctx, TaskRegistry::builtin())
    }

    pub fn with_registry(ctx: &'a BuildContext, registry: TaskRegistry) -> Self {
        Self { ctx, registry }
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// Run `tasks` in order.
    #[instrument(skip(self, progress))]
    pub fn run<S: AsRef<str> + std::fmt::Debug>(
        &self,
        tasks: &[S],
        progress: &dyn ProgressReporter,
    ) -> Result<RunReport> {
        let start = Instant::now();
        let plan = self.registry.plan(tasks)?;
        let total = plan.len();

        info!(steps = total, root = %self.ctx.root().display(), "starting build");

        let mut steps = Vec::with_capacity(total);
        for (i, step) in plan.into_iter().enumerate() {
            progress.step_started(step, i + 1, total);
            let step_start = Instant::now();

            let outcome = match step.run(self.ctx) {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(%step, error = %e, "step failed, aborting");
                    progress.step_failed(step, &e);
                    return Err(e);
                }
            };

            if let StepOutcome::Skipped { reason } = &outcome {
                warn!(%step, %reason, "step skipped");
            }

            let report = StepReport {
                step,
                outcome,
                elapsed: step_start.elapsed(),
            };
            progress.step_finished(&report);
            steps.push(report);
        }

        let report = RunReport {
            tasks: tasks.iter().map(|t| t.as_ref().to_string()).collect(),
            steps,
            elapsed: start.elapsed(),
        };

        progress.done(&report);

        info!(
            steps = report.steps.len(),
            skipped = report.skipped().count(),
            elapsed_ms = report.elapsed.as_millis(),
            "build complete"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;

    use victory_shared::BuildConfig;

    use Variant::{Basic, Standard};

    fn standard_chain() -> Vec<Step> {
        vec![
            Step::CompileStyles(Standard),
            Step::VendorPrefix(Standard),
            Step::MinifyStyles(Standard),
            Step::ConcatenateScripts(Standard),
            Step::MinifyScripts(Standard),
        ]
    }

    fn basic_chain() -> Vec<Step> {
        vec![
            Step::CompileStyles(Basic),
            Step::VendorPrefix(Basic),
            Step::MinifyStyles(Basic),
            Step::ConcatenateScripts(Basic),
            Step::MinifyScripts(Basic),
        ]
    }

    #[test]
    fn aggregate_tasks_expand_in_order() {
        let registry = TaskRegistry::builtin();

        assert_eq!(registry.plan(&["standard"]).unwrap(), standard_chain());
        assert_eq!(registry.plan(&["basic"]).unwrap(), basic_chain());

        let mut both = standard_chain();
        both.extend(basic_chain());
        assert_eq!(registry.plan(&["default"]).unwrap(), both);
    }

    #[test]
    fn generators_are_not_part_of_default() {
        let plan = TaskRegistry::builtin().plan(&["default"]).unwrap();
        assert!(!plan.contains(&Step::Examples));
        assert!(!plan.contains(&Step::Readme));
    }

    #[test]
    fn basic_mergecss_compiles_then_prefixes() {
        let plan = TaskRegistry::builtin().plan(&["basic:mergecss"]).unwrap();
        assert_eq!(plan, vec![Step::CompileStyles(Basic), Step::VendorPrefix(Basic)]);
    }

    #[test]
    fn every_documented_task_is_registered() {
        let registry = TaskRegistry::builtin();
        for name in [
            "mergecss", "prefix", "mincss", "mergejs", "minjs", "basic:mergecss",
            "basic:mincss", "basic:mergejs", "basic:minjs", "examples", "readme", "default",
            "basic", "standard",
        ] {
            assert!(registry.get(name).is_some(), "missing task {name}");
        }
    }

    #[test]
    fn unknown_task_is_rejected() {
        let err = TaskRegistry::builtin().plan(&["deploy"]).unwrap_err();
        assert!(err.to_string().contains("unknown task 'deploy'"));
    }

    #[test]
    fn cycles_are_rejected() {
        let mut registry = TaskRegistry::new();
        registry.register(TaskDef::series("a", "", &["b"])).unwrap();
        registry.register(TaskDef::series("b", "", &["a"])).unwrap();

        let err = registry.plan(&["a"]).unwrap_err();
        assert!(err.to_string().contains("task cycle: a -> b -> a"));
    }

    #[test]
    fn dangling_reference_names_parent() {
        let mut registry = TaskRegistry::new();
        registry.register(TaskDef::series("all", "", &["missing"])).unwrap();
        let err = registry.plan(&["all"]).unwrap_err();
        assert!(err.to_string().contains("referenced by 'all'"));
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = TaskRegistry::builtin();
        let err = registry
            .register(TaskDef::leaf("readme", "", Step::Readme))
            .unwrap_err();
        assert!(matches!(err, VictoryError::Task { .. }));
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl ProgressReporter for Recorder {
        fn step_started(&self, step: Step, index: usize, total: usize) {
            self.events.lock().unwrap().push(format!("start {index}/{total} {step}"));
        }
        fn step_finished(&self, report: &StepReport) {
            self.events.lock().unwrap().push(format!("finish {}", report.step));
        }
        fn step_failed(&self, step: Step, _error: &VictoryError) {
            self.events.lock().unwrap().push(format!("fail {step}"));
        }
        fn done(&self, _report: &RunReport) {
            self.events.lock().unwrap().push("done".into());
        }
    }

    #[test]
    fn failing_step_aborts_remaining_plan() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("README.md"), "# Hi").unwrap();
        let ctx = BuildContext::new(tmp.path(), BuildConfig::default());
        let runner = PipelineRunner::new(&ctx);
        let recorder = Recorder::default();

        // `examples` fails: there is no examples directory.
        let err = runner.run(&["examples", "readme"], &recorder).unwrap_err();
        assert!(matches!(err, VictoryError::Io { .. }));
        assert!(!tmp.path().join("README.html").exists());

        let events = recorder.events.lock().unwrap();
        assert_eq!(
            *events,
            vec!["start 1/2 generate examples index", "fail generate examples index"]
        );
    }

    #[test]
    fn run_reports_each_step() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("README.md"), "# Hi").unwrap();
        fs::create_dir_all(tmp.path().join("examples")).unwrap();
        fs::write(tmp.path().join("examples/grid.html"), "").unwrap();

        let ctx = BuildContext::new(tmp.path(), BuildConfig::default());
        let report = PipelineRunner::new(&ctx)
            .run(&["examples", "readme"], &SilentProgress)
            .unwrap();

        assert_eq!(report.tasks, vec!["examples", "readme"]);
        assert_eq!(report.steps.len(), 2);
        assert_eq!(report.steps[0].outcome.artifacts()[0].filename, "index.html");
        assert_eq!(report.steps[1].outcome.artifacts()[0].filename, "README.html");
        assert_eq!(report.skipped().count(), 0);
    }

    #[test]
    fn default_task_builds_both_variants() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("src/scss")).unwrap();
        fs::create_dir_all(root.join("src/js")).unwrap();
        fs::write(root.join("src/scss/victory.scss"), ".btn { padding: 4px; }\n").unwrap();
        fs::write(root.join("src/scss/basic.scss"), "p { margin: 0; }\n").unwrap();
        for name in ["victory", "_polyfill", "_toggle", "_navbar", "_slide"] {
            fs::write(
                root.join(format!("src/js/{name}.js")),
                format!("var {} = true;\n", name.trim_start_matches('_')),
            )
            .unwrap();
        }
        fs::write(
            root.join("package.json"),
            r#"{"name":"victory.css","version":"1.0.0","author":"A","email":"a@b.c",
                "license":"MIT","homepage":"https://example.com"}"#,
        )
        .unwrap();

        let ctx = BuildContext::new(root, BuildConfig::default());
        let report = PipelineRunner::new(&ctx).run(&[DEFAULT_TASK], &SilentProgress).unwrap();
        assert_eq!(report.steps.len(), 10);

        for file in [
            "victory.css",
            "victory.min.css",
            "victory.js",
            "victory.min.js",
            "victory-basic.css",
            "victory-basic.min.css",
            "victory-basic.js",
            "victory-basic.min.js",
        ] {
            assert!(root.join("dist").join(file).exists(), "missing dist/{file}");
        }

        let basic_js = fs::read_to_string(root.join("dist/victory-basic.js")).unwrap();
        assert!(basic_js.contains("var polyfill = true;"));
        assert!(!basic_js.contains("var slide = true;"));
    }
}

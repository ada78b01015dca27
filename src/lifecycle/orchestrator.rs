use anyhow::Result;

use crate::config::{Config, Workflow};
use crate::docker::{CommandOutput, RunSpec};
use crate::runtime::ContainerRuntime;

use super::checks;
use super::resolver;
use super::types::{Report, Step, StepRecord};
use super::version;

/// Drives one container through stop → build/pull → run → prune.
///
/// Every step is best effort: a failure is logged, recorded in the
/// [`Report`], and the next step runs anyway. Paths in `config` are used
/// as-is, so callers should pass a [`Config::resolve`]d config.
pub struct Orchestrator<'a, R: ContainerRuntime> {
    runtime: &'a R,
    config: &'a Config,
    report: Report,
}

impl<'a, R: ContainerRuntime> Orchestrator<'a, R> {
    pub fn new(runtime: &'a R, config: &'a Config) -> Self {
        let report = Report {
            container: config.container_name.clone(),
            image: config.image_ref(),
            ..Report::default()
        };
        Self {
            runtime,
            config,
            report,
        }
    }

    /// Run the whole workflow and hand back what happened.
    pub fn run(mut self, workflow: Workflow) -> Report {
        self.report.workflow = workflow.as_str().to_string();

        // ── Ensure stopped ───────────────────────────────────────────────
        self.stop_and_remove();

        match workflow {
            Workflow::Build => {
                self.build_image();
                self.write_resolver_override();
                self.run_container();
                self.record_update_time();
                self.report_version();
            }
            Workflow::Pull => self.pull_and_start(),
        }

        // ── Cleanup, unconditionally ─────────────────────────────────────
        self.prune_images();
        self.report
    }

    /// Stop and remove the managed container if it exists.
    pub fn stop_and_remove(&mut self) {
        let config = self.config;
        let name = config.container_name.as_str();
        tracing::info!("Stopping and removing the container: {name}...");

        if !self.container_exists() {
            tracing::info!("Container {name} does not exist. Skipping removal.");
            return;
        }

        let stopped = self.runtime.stop(name);
        self.record_command(Step::Stop, stopped, CommandOutput::success);
        let removed = self.runtime.remove(name);
        self.record_command(Step::Remove, removed, CommandOutput::success);
        tracing::info!("Container {name} stopped and removed.");
    }

    /// Build the image from the local build definition.
    pub fn build_image(&mut self) -> bool {
        tracing::info!("Building image from local build definition...");
        let image = self.config.image_ref();
        let result = self.runtime.build(&image, &self.config.build_context);

        match self.record_command(Step::Build, result, checks::build_succeeded) {
            Some(_) => {
                tracing::info!("Image {image} built successfully.");
                true
            }
            None => {
                tracing::error!("Failed to build image {image}.");
                false
            }
        }
    }

    /// Pull `<image>:<tag>`. Returns the output when the pull exited cleanly.
    pub fn pull_image(&mut self) -> Option<CommandOutput> {
        let image = self.config.image_ref();
        tracing::info!("Pulling the latest image {image}...");
        let result = self.runtime.pull(&image);
        let out = self.record_command(Step::Pull, result, CommandOutput::success)?;
        if !out.stdout.is_empty() {
            tracing::info!("{}", out.stdout);
        }
        Some(out)
    }

    /// Write the resolver override that gets mounted into the container.
    pub fn write_resolver_override(&mut self) -> bool {
        let config = self.config;
        let resolver = &config.resolver;
        match resolver::write_resolver_override(&resolver.path, &resolver.nameservers) {
            Ok(()) => {
                tracing::debug!(path = %resolver.path.display(), "resolver override written");
                let detail = resolver.path.display().to_string();
                self.record(Step::WriteOverride, true, detail);
                true
            }
            Err(e) => {
                tracing::error!("Failed to write resolver override: {e:#}");
                self.record(Step::WriteOverride, false, format!("{e:#}"));
                false
            }
        }
    }

    /// Start a fresh instance of the managed container.
    pub fn run_container(&mut self) -> bool {
        tracing::info!("Starting a new container from {}...", self.config.image_ref());
        let spec = self.run_spec();
        let result = self.runtime.run(&spec);

        match self.record_command(Step::Run, result, checks::run_succeeded) {
            Some(out) => {
                tracing::info!(id = %out.stdout, "New container started.");
                true
            }
            None => {
                tracing::error!("Error starting new container.");
                false
            }
        }
    }

    /// Inspect the image and log its version label.
    pub fn report_version(&mut self) -> Option<String> {
        tracing::info!("Retrieving image version...");
        let out = match self.runtime.inspect(&self.config.image_ref()) {
            Ok(out) => out,
            Err(e) => {
                tracing::error!("Error retrieving image information: {e:#}");
                self.record(Step::ReportVersion, false, format!("{e:#}"));
                return None;
            }
        };

        if out.stdout.is_empty() {
            tracing::error!("Error retrieving image information.");
            self.record(Step::ReportVersion, false, failure_detail(&out));
            return None;
        }

        match version::extract_version(&out.stdout) {
            Ok(v) => {
                tracing::info!("Version: {v}");
                self.record(Step::ReportVersion, true, v.clone());
                self.report.version = Some(v.clone());
                Some(v)
            }
            Err(e) => {
                tracing::error!("Error extracting version: {e}");
                self.record(Step::ReportVersion, false, e.to_string());
                None
            }
        }
    }

    /// Remove dangling images.
    pub fn prune_images(&mut self) {
        tracing::info!("Cleaning up unused images...");
        let result = self.runtime.prune();
        if self
            .record_command(Step::Prune, result, CommandOutput::success)
            .is_some()
        {
            tracing::info!("Unused images cleaned up.");
        }
    }

    fn pull_and_start(&mut self) {
        let up_to_date = self
            .pull_image()
            .is_some_and(|out| checks::is_image_up_to_date(&out.stdout));
        self.report.up_to_date = Some(up_to_date);

        if up_to_date {
            let name = &self.config.container_name;
            tracing::info!("{name} is already up to date. No further actions required.");
            if !self.container_exists() {
                tracing::info!("Container does not exist. Starting a new container...");
                self.write_resolver_override();
                self.run_container();
            }
            return;
        }

        tracing::info!("Detected image update.");
        self.write_resolver_override();
        self.run_container();
        self.record_update_time();
        self.report_version();
    }

    fn record_update_time(&mut self) {
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        tracing::info!("Update time: {now}");
        self.report.updated_at = Some(now);
    }

    fn container_exists(&mut self) -> bool {
        let config = self.config;
        let name = config.container_name.as_str();
        match self.runtime.exists(name) {
            Ok(present) => {
                let detail = if present { "present" } else { "absent" };
                self.record(Step::ExistsCheck, true, detail.to_string());
                present
            }
            Err(e) => {
                tracing::error!("Failed to query container {name}: {e:#}");
                self.record(Step::ExistsCheck, false, format!("{e:#}"));
                false
            }
        }
    }

    fn run_spec(&self) -> RunSpec {
        let cfg = self.config;
        RunSpec {
            name: cfg.container_name.clone(),
            image: cfg.image_ref(),
            port: cfg.port.clone(),
            env_file: cfg.env_file.clone(),
            restart: cfg.restart.clone(),
            dns: cfg.resolver.nameservers.clone(),
            mounts: vec![(cfg.resolver.path.clone(), cfg.resolver.mount_target.clone())],
        }
    }

    /// Record a command step. Returns the output only if `succeeded` accepts it.
    fn record_command(
        &mut self,
        step: Step,
        result: Result<CommandOutput>,
        succeeded: fn(&CommandOutput) -> bool,
    ) -> Option<CommandOutput> {
        match result {
            Ok(out) if succeeded(&out) => {
                self.record(step, true, String::new());
                Some(out)
            }
            Ok(out) => {
                if !out.stdout.is_empty() {
                    tracing::error!(step = step.as_str(), "{}", out.stdout);
                }
                self.record(step, false, failure_detail(&out));
                None
            }
            Err(e) => {
                tracing::error!(step = step.as_str(), "{e:#}");
                self.record(step, false, format!("{e:#}"));
                None
            }
        }
    }

    fn record(&mut self, step: Step, success: bool, detail: String) {
        self.report.steps.push(StepRecord {
            step,
            success,
            detail,
        });
    }
}

fn failure_detail(out: &CommandOutput) -> String {
    if out.timed_out {
        return "timed out".to_string();
    }
    let stderr = out.stderr.trim();
    match out.exit_code {
        Some(code) if !stderr.is_empty() => format!("exit {code}: {stderr}"),
        Some(code) => format!("exit {code}"),
        None if !stderr.is_empty() => stderr.to_string(),
        None => "terminated without exit code".to_string(),
    }
}

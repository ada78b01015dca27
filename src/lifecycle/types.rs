use serde::Serialize;

/// One externally visible step of a lifecycle run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    ExistsCheck,
    Stop,
    Remove,
    Build,
    Pull,
    WriteOverride,
    Run,
    ReportVersion,
    Prune,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::ExistsCheck => "exists-check",
            Step::Stop => "stop",
            Step::Remove => "remove",
            Step::Build => "build",
            Step::Pull => "pull",
            Step::WriteOverride => "write-override",
            Step::Run => "run",
            Step::ReportVersion => "report-version",
            Step::Prune => "prune",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: Step,
    pub success: bool,
    pub detail: String,
}

/// What happened during a run, in invocation order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub container: String,
    pub image: String,
    pub workflow: String,
    pub steps: Vec<StepRecord>,
    pub version: Option<String>,
    /// Pull workflow only.
    pub up_to_date: Option<bool>,
    /// Set whenever a new container was started from a new image.
    pub updated_at: Option<String>,
}

impl Report {
    pub fn sequence(&self) -> Vec<Step> {
        self.steps.iter().map(|r| r.step).collect()
    }

    pub fn failed(&self) -> usize {
        self.steps.iter().filter(|r| !r.success).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_serializes_kebab_case() {
        let json = serde_json::to_string(&Step::WriteOverride).unwrap();
        assert_eq!(json, "\"write-override\"");
        assert_eq!(Step::ExistsCheck.as_str(), "exists-check");
    }

    #[test]
    fn report_counts_failures() {
        let report = Report {
            steps: vec![
                StepRecord {
                    step: Step::Build,
                    success: false,
                    detail: "exit 1".into(),
                },
                StepRecord {
                    step: Step::Prune,
                    success: true,
                    detail: String::new(),
                },
            ],
            ..Report::default()
        };
        assert_eq!(report.failed(), 1);
        assert_eq!(report.sequence(), [Step::Build, Step::Prune]);
    }
}

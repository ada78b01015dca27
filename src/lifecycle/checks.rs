//! Decisions made from runtime output.
//!
//! Exit codes are authoritative. The text markers below date from older
//! runtime versions and only decide the outcome when no exit code exists.

use crate::docker::CommandOutput;

const BUILD_MARKER: &str = "Successfully built";
const UP_TO_DATE_MARKER: &str = "Image is up to date";
const ERROR_MARKER: &str = "Error";

/// `ps -q` prints one id per match; anything at all means the name is taken.
pub fn container_listed(query_output: &str) -> bool {
    !query_output.trim().is_empty()
}

pub fn is_image_up_to_date(pull_output: &str) -> bool {
    pull_output.contains(UP_TO_DATE_MARKER)
}

pub fn build_output_reports_success(build_output: &str) -> bool {
    build_output.contains(BUILD_MARKER)
}

pub fn run_output_reports_error(run_output: &str) -> bool {
    run_output.contains(ERROR_MARKER)
}

pub fn build_succeeded(out: &CommandOutput) -> bool {
    match out.exit_code {
        Some(code) => code == 0,
        None if out.timed_out => false,
        None => build_output_reports_success(&out.stdout),
    }
}

pub fn run_succeeded(out: &CommandOutput) -> bool {
    match out.exit_code {
        Some(code) => code == 0,
        None if out.timed_out => false,
        None => !out.stdout.is_empty() && !run_output_reports_error(&out.stdout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_exit_code(stdout: &str) -> CommandOutput {
        CommandOutput {
            stdout: stdout.into(),
            ..CommandOutput::default()
        }
    }

    #[test]
    fn empty_query_output_means_absent() {
        assert!(!container_listed(""));
        assert!(!container_listed("  \n"));
    }

    #[test]
    fn any_query_output_means_present() {
        assert!(container_listed("3f2a9c1b"));
        assert!(container_listed("3f2a9c1b\n77de01aa"));
    }

    #[test]
    fn up_to_date_needs_exact_phrase() {
        assert!(is_image_up_to_date(
            "Status: Image is up to date for lobehub/lobe-chat:latest"
        ));
        assert!(!is_image_up_to_date(
            "Status: Downloaded newer image for lobehub/lobe-chat:latest"
        ));
        assert!(!is_image_up_to_date("image is up to date"));
        assert!(!is_image_up_to_date(""));
    }

    #[test]
    fn build_marker_detection() {
        assert!(build_output_reports_success("Step 5/5\nSuccessfully built 1a2b3c4d"));
        assert!(!build_output_reports_success(""));
        assert!(!build_output_reports_success("#8 writing image sha256:abc done"));
    }

    #[test]
    fn exit_code_decides_build_regardless_of_wording() {
        assert!(build_succeeded(&CommandOutput::ok("#8 naming to docker.io/x done")));
        let mut failed = CommandOutput::failed(1, "no Dockerfile");
        failed.stdout = "Successfully built 1a2b3c4d".into();
        assert!(!build_succeeded(&failed));
    }

    #[test]
    fn build_falls_back_to_marker_without_exit_code() {
        assert!(build_succeeded(&no_exit_code("Successfully built 1a2b3c4d")));
        assert!(!build_succeeded(&no_exit_code("something else")));
    }

    #[test]
    fn timed_out_build_never_succeeds() {
        let mut out = no_exit_code("Successfully built 1a2b3c4d");
        out.timed_out = true;
        assert!(!build_succeeded(&out));
    }

    #[test]
    fn run_success_ignores_error_text_when_exit_code_is_zero() {
        assert!(run_succeeded(&CommandOutput::ok("ErrorPageService-4f1e")));
        assert!(!run_succeeded(&CommandOutput::failed(125, "Conflict")));
    }

    #[test]
    fn run_falls_back_to_error_marker_without_exit_code() {
        assert!(run_succeeded(&no_exit_code("9c1e0f2d8a")));
        assert!(!run_succeeded(&no_exit_code("Error response from daemon")));
        assert!(!run_succeeded(&no_exit_code("")));
    }
}

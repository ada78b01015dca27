//! Integration tests against a real runtime.
//!
//! These require a running Docker daemon and are marked `#[ignore]`.
//! Run with: `cargo test -- --ignored`

use std::time::Duration;

use relaunch::ContainerRuntime;
use relaunch::config::{Config, Workflow};
use relaunch::docker::DockerCli;
use relaunch::lifecycle::{Orchestrator, Step};

fn docker() -> DockerCli {
    DockerCli::new("docker", Duration::from_secs(300))
}

#[test]
#[ignore]
fn unknown_container_does_not_exist() {
    let exists = docker()
        .exists("relaunch-test-no-such-container")
        .expect("docker should be invocable");
    assert!(!exists);
}

#[test]
#[ignore]
fn inspect_of_missing_image_fails() {
    let out = docker()
        .inspect("relaunch-test/no-such-image:latest")
        .expect("docker should be invocable");
    assert!(!out.success());
}

#[test]
#[ignore]
fn pull_workflow_round_trip() {
    let dir = tempfile::tempdir().expect("failed to create tempdir");
    std::fs::write(dir.path().join("lobe.env"), "GREETING=hello\n").unwrap();

    let cfg = Config {
        container_name: "relaunch-test-nginx".into(),
        image: "nginx".into(),
        tag: "alpine".into(),
        port: "18080:80".into(),
        restart: "no".into(),
        ..Config::default()
    }
    .resolve(dir.path());

    let runtime = docker();
    let report = Orchestrator::new(&runtime, &cfg).run(Workflow::Pull);

    let run = report
        .steps
        .iter()
        .find(|r| r.step == Step::Run)
        .expect("run step should be recorded");
    assert!(run.success, "run failed: {}", run.detail);
    assert!(runtime.exists(&cfg.container_name).unwrap());

    let _ = runtime.stop(&cfg.container_name);
    let _ = runtime.remove(&cfg.container_name);
}

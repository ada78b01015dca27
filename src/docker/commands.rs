use std::path::Path;

use super::types::RunSpec;

/// `ps -a -q` filtered to an exact container name, stopped ones included.
pub fn exists_args(name: &str) -> Vec<String> {
    vec![
        "ps".into(),
        "-a".into(),
        "-q".into(),
        "-f".into(),
        format!("name=^/?{name}$"),
    ]
}

pub fn stop_args(name: &str) -> Vec<String> {
    vec!["stop".into(), name.into()]
}

pub fn remove_args(name: &str) -> Vec<String> {
    vec!["rm".into(), name.into()]
}

/// Build the local definition in `context`, tagged as `image_ref`.
pub fn build_args(image_ref: &str, context: &Path) -> Vec<String> {
    vec![
        "build".into(),
        "-t".into(),
        image_ref.into(),
        context.display().to_string(),
    ]
}

pub fn pull_args(image_ref: &str) -> Vec<String> {
    vec!["pull".into(), image_ref.into()]
}

/// Build a detached `run` for the managed container.
pub fn run_args(spec: &RunSpec) -> Vec<String> {
    let mut args = vec![
        "run".into(),
        "-d".into(),
        "-p".into(),
        spec.port.clone(),
        "--env-file".into(),
        spec.env_file.display().to_string(),
        "--name".into(),
        spec.name.clone(),
        "--restart".into(),
        spec.restart.clone(),
    ];
    for server in &spec.dns {
        args.extend(["--dns".into(), server.clone()]);
    }
    for (host, target) in &spec.mounts {
        args.extend(["-v".into(), format!("{}:{target}", host.display())]);
    }
    args.push(spec.image.clone());
    args
}

pub fn inspect_args(image_ref: &str) -> Vec<String> {
    vec!["inspect".into(), image_ref.into()]
}

/// Remove dangling images without prompting.
pub fn prune_args() -> Vec<String> {
    vec!["image".into(), "prune".into(), "-f".into()]
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn test_spec() -> RunSpec {
        RunSpec {
            name: "lobe-chat".into(),
            image: "lobehub/lobe-chat:latest".into(),
            port: "3210:3210".into(),
            env_file: PathBuf::from("/srv/lobe.env"),
            restart: "always".into(),
            dns: vec!["8.8.8.8".into(), "8.8.4.4".into()],
            mounts: vec![(
                PathBuf::from("/srv/custom_resolv.conf"),
                "/etc/resolv.conf".into(),
            )],
        }
    }

    #[test]
    fn exists_filter_is_anchored() {
        let args = exists_args("lobe-chat");
        assert_eq!(args, ["ps", "-a", "-q", "-f", "name=^/?lobe-chat$"]);
    }

    #[test]
    fn build_command_tags_and_uses_context() {
        let args = build_args("lobehub/lobe-chat:latest", Path::new("/srv"));
        assert_eq!(args, ["build", "-t", "lobehub/lobe-chat:latest", "/srv"]);
    }

    #[test]
    fn run_command_builds_correct_args() {
        let args = run_args(&test_spec());
        assert_eq!(
            args,
            [
                "run",
                "-d",
                "-p",
                "3210:3210",
                "--env-file",
                "/srv/lobe.env",
                "--name",
                "lobe-chat",
                "--restart",
                "always",
                "--dns",
                "8.8.8.8",
                "--dns",
                "8.8.4.4",
                "-v",
                "/srv/custom_resolv.conf:/etc/resolv.conf",
                "lobehub/lobe-chat:latest",
            ]
        );
    }

    #[test]
    fn run_command_image_comes_last() {
        let mut spec = test_spec();
        spec.dns.clear();
        spec.mounts.clear();
        let args = run_args(&spec);
        assert_eq!(args.last(), Some(&spec.image));
        assert!(!args.contains(&"--dns".into()));
        assert!(!args.contains(&"-v".into()));
    }

    #[test]
    fn prune_is_forced() {
        assert_eq!(prune_args(), ["image", "prune", "-f"]);
    }

    #[test]
    fn single_target_commands() {
        assert_eq!(stop_args("web"), ["stop", "web"]);
        assert_eq!(remove_args("web"), ["rm", "web"]);
        assert_eq!(pull_args("nginx:latest"), ["pull", "nginx:latest"]);
        assert_eq!(inspect_args("nginx:latest"), ["inspect", "nginx:latest"]);
    }
}

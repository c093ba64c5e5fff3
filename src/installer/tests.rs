use std::fs;
use std::path::Path;

use tempfile::TempDir;

use super::*;
use crate::platform::detection::fake::FakeProbe;
use crate::prompt::fake::ScriptedPrompter;
use crate::runner::fake::FakeRunner;

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

struct Fixture {
    _source: TempDir,
    home: TempDir,
    config: InstallerConfig,
}

impl Fixture {
    fn new() -> Self {
        let source = TempDir::new().unwrap();
        let s = source.path();
        write(&s.join("templates/invoke.sh.in"), "#!/bin/bash\n");
        write(&s.join("templates/update.sh.in"), "#!/bin/bash\n");
        write(&s.join("templates/rootdir/configs/models.yaml"), "{}\n");
        let reqs = s.join("environments-and-requirements");
        write(&reqs.join("requirements-lin-cuda.txt"), "torch\n-e .\nnumpy\n");
        write(&reqs.join("requirements-lin-amd.txt"), "torch-rocm\n");
        write(&reqs.join("requirements-mac-mps-cpu.txt"), "torch-mps\n");

        let config = InstallerConfig::with_source_dir(s);
        Self {
            _source: source,
            home: TempDir::new().unwrap(),
            config,
        }
    }

    fn root(&self) -> std::path::PathBuf {
        self.home.path().join("invokeai")
    }

    /// Answers: start pause, root path, confirm location
    fn prompter(&self) -> ScriptedPrompter {
        ScriptedPrompter::new([
            String::new(),
            self.root().display().to_string(),
            "y".to_string(),
        ])
    }
}

fn python_runner() -> FakeRunner {
    FakeRunner::new().with_interpreter("python3.10", "Python 3.10.12")
}

#[test]
fn test_full_install_sequence() {
    let fx = Fixture::new();
    let runner = python_runner();
    let prompter = fx.prompter();
    let probe = FakeProbe::linux();

    let report = Installer::new(&fx.config, &runner, &prompter, &probe)
        .run()
        .unwrap();

    let root = dunce::canonicalize(fx.root()).unwrap();
    assert_eq!(report.root.path, root);
    assert!(!report.root.resumed);
    assert_eq!(report.manifest, Manifest::LinuxCuda);

    let lines = runner.executed_lines();
    assert_eq!(lines.len(), 5, "{lines:#?}");
    assert!(lines[0].starts_with("python3.10 -m venv"));
    assert!(lines[1].ends_with("-m pip install --upgrade pip"));
    assert!(lines[2].contains("-m pip install --prefer-binary -r"));
    assert!(lines[2].ends_with("requirements.txt"));
    assert!(lines[3].ends_with(&fx.config.archive_url));
    assert!(lines[4].contains("configure_invokeai.py --root="));

    assert_eq!(
        fs::read_to_string(root.join("requirements.txt")).unwrap(),
        "torch\nnumpy\n"
    );
    assert!(root.join("invoke.sh").is_file());
    assert!(root.join("update.sh").is_file());
    assert!(root.join("configs/models.yaml").is_file());
    assert!(root.join("environments-and-requirements").is_dir());
}

#[cfg(unix)]
#[test]
fn test_steps_after_venv_use_venv_interpreter_and_activation() {
    let fx = Fixture::new();
    let runner = python_runner();
    let prompter = fx.prompter();
    let probe = FakeProbe::linux();

    Installer::new(&fx.config, &runner, &prompter, &probe)
        .run()
        .unwrap();

    let root = dunce::canonicalize(fx.root()).unwrap();
    let venv = root.join(".venv");
    let executed = runner.executed.borrow();

    assert_eq!(executed[0].program, Path::new("python3.10"));
    assert!(executed[0].env.is_empty());
    for invocation in &executed[1..4] {
        assert_eq!(invocation.program, venv.join("bin/python"));
    }
    assert_eq!(executed[4].program, venv.join("bin/configure_invokeai.py"));
    for invocation in &executed[1..] {
        assert!(
            invocation
                .env
                .iter()
                .any(|(k, v)| k == "VIRTUAL_ENV" && Path::new(v) == venv)
        );
    }
}

#[test]
fn test_failed_dependency_install_stops_everything_after() {
    let fx = Fixture::new();
    let runner = python_runner().failing_on("--prefer-binary", 1);
    let prompter = fx.prompter();
    let probe = FakeProbe::linux();

    let err = Installer::new(&fx.config, &runner, &prompter, &probe)
        .run()
        .unwrap_err();

    match err {
        InstallerError::StepFailed { step, status, hint } => {
            assert_eq!(step, "Dependency installation");
            assert_eq!(status, "exit status 1");
            assert!(hint.contains("python3-venv"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let lines = runner.executed_lines();
    assert_eq!(lines.len(), 3);
    assert!(!lines.iter().any(|l| l.contains(&fx.config.archive_url)));
    assert!(!fx.root().join("invoke.sh").exists());
}

#[test]
fn test_failed_venv_creation_stops_immediately() {
    let fx = Fixture::new();
    let runner = python_runner().failing_on("-m venv", 2);
    let prompter = fx.prompter();
    let probe = FakeProbe::linux();

    let err = Installer::new(&fx.config, &runner, &prompter, &probe)
        .run()
        .unwrap_err();

    assert!(matches!(err, InstallerError::StepFailed { .. }));
    assert_eq!(runner.executed_lines().len(), 1);
    assert!(!fx.root().join("requirements.txt").exists());
}

#[test]
fn test_unsupported_platform_rejected_before_any_mutation() {
    let fx = Fixture::new();
    let runner = python_runner();
    let prompter = fx.prompter();
    let probe = FakeProbe {
        os: "FreeBSD",
        ..FakeProbe::linux()
    };

    let err = Installer::new(&fx.config, &runner, &prompter, &probe)
        .run()
        .unwrap_err();

    assert!(matches!(err, InstallerError::UnsupportedOs { .. }));
    assert!(prompter.asked.borrow().is_empty());
    assert!(runner.executed_lines().is_empty());
    assert!(!fx.root().exists());
}

#[test]
fn test_unsupported_arch_rejected_before_any_mutation() {
    let fx = Fixture::new();
    let runner = python_runner();
    let prompter = fx.prompter();
    let probe = FakeProbe {
        machine: "aarch64",
        ..FakeProbe::linux()
    };

    let err = Installer::new(&fx.config, &runner, &prompter, &probe)
        .run()
        .unwrap_err();

    assert!(matches!(err, InstallerError::UnsupportedArch { .. }));
    assert!(prompter.asked.borrow().is_empty());
    assert!(runner.executed_lines().is_empty());
    assert!(!fx.root().exists());
}

#[test]
fn test_missing_templates_detected_before_any_step() {
    let fx = Fixture::new();
    fs::remove_dir_all(fx.config.source_dir.join("templates")).unwrap();
    let runner = python_runner();
    let prompter = fx.prompter();
    let probe = FakeProbe::linux();

    let err = Installer::new(&fx.config, &runner, &prompter, &probe)
        .run()
        .unwrap_err();

    match err {
        InstallerError::AssetsNotFound { source_dir, missing } => {
            assert_eq!(source_dir, fx.config.source_dir.display().to_string());
            assert!(missing.contains("invoke.sh.in"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(prompter.asked.borrow().is_empty());
    assert!(runner.executed_lines().is_empty());
    assert!(!fx.root().exists());
}

#[test]
fn test_missing_python_is_fatal() {
    let fx = Fixture::new();
    let runner = FakeRunner::new().with_interpreter("python", "Python 3.8.10");
    let prompter = fx.prompter();
    let probe = FakeProbe::linux();

    let err = Installer::new(&fx.config, &runner, &prompter, &probe)
        .run()
        .unwrap_err();

    match err {
        InstallerError::NoSuitablePython { minimum, .. } => assert_eq!(minimum, "3.9.0"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(runner.executed_lines().is_empty());
    assert!(!fx.root().exists());
}

#[test]
fn test_amd_and_mac_manifests() {
    for (probe, manifest, expected) in [
        (FakeProbe::linux_amd(), Manifest::LinuxAmd, "torch-rocm\n"),
        (FakeProbe::mac(), Manifest::Mac, "torch-mps\n"),
    ] {
        let fx = Fixture::new();
        let runner = python_runner();
        let prompter = fx.prompter();

        let report = Installer::new(&fx.config, &runner, &prompter, &probe)
            .run()
            .unwrap();

        assert_eq!(report.manifest, manifest);
        assert_eq!(
            fs::read_to_string(report.root.path.join("requirements.txt")).unwrap(),
            expected
        );
    }
}

#[cfg(unix)]
#[test]
fn test_resume_reuses_existing_environment() {
    let fx = Fixture::new();
    let root = fx.root();
    write(&root.join(".venv/bin/python"), "");
    write(&root.join("invokeai.init"), "--outdir=outputs\n");

    let runner = python_runner();
    let prompter = ScriptedPrompter::new([
        String::new(),
        root.display().to_string(),
        "y".to_string(),
        "y".to_string(),
    ]);
    let probe = FakeProbe::linux();

    let report = Installer::new(&fx.config, &runner, &prompter, &probe)
        .run()
        .unwrap();

    assert!(report.root.resumed);
    let lines = runner.executed_lines();
    assert_eq!(lines.len(), 4);
    assert!(!lines.iter().any(|l| l.contains("-m venv")));
    assert_eq!(
        fs::read_to_string(root.join("invokeai.init")).unwrap(),
        "--outdir=outputs\n"
    );
}

#[test]
fn test_start_pause_is_first_prompt() {
    let fx = Fixture::new();
    let runner = python_runner();
    let prompter = fx.prompter();
    let probe = FakeProbe::linux();

    Installer::new(&fx.config, &runner, &prompter, &probe)
        .run()
        .unwrap();

    let asked = prompter.asked.borrow();
    assert!(asked[0].contains("Press any key"));
    assert!(asked[1].contains("root directory"));
}

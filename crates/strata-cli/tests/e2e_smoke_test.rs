use std::{fs, io, path::PathBuf};

use miette::Diagnostic;
use tempfile::tempdir;

use strata::StrataError;
use strata_cli::{Args, error_adapter::to_reportable, run};

fn demos_dir() -> PathBuf {
    // Demos are at workspace root, relative to workspace not the crate
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all .toml files from a directory
fn collect_toml_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args(input: Option<String>, preset: Option<&str>, output: PathBuf) -> Args {
    Args {
        input,
        preset: preset.map(str::to_string),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let valid_demos = collect_toml_files(demos_dir());

    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let output_filename = format!(
            "{}.json",
            demo_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);
        let args = args(
            Some(demo_path.to_string_lossy().to_string()),
            None,
            output_path.clone(),
        );

        match run(&args) {
            Ok(()) => {
                let json = fs::read_to_string(&output_path).expect("Output was written");
                let value: serde_json::Value =
                    serde_json::from_str(&json).expect("Output is valid JSON");
                assert!(value["layers"].is_array(), "{}", demo_path.display());
            }
            Err(e) => failed_demos.push((demo_path.clone(), e)),
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }

    println!("✅ All {} valid demos passed", valid_demos.len());
}

/// Checks the error a demo under `demos/errors/` must fail with, returning
/// the expected diagnostic code when the variant matches.
fn expected_failure(demo: &str, err: &StrataError) -> Result<&'static str, String> {
    let matches = match demo {
        "empty_network" => matches!(err, StrataError::EmptyNetwork),
        "zero_size" => matches!(err, StrataError::InvalidSpec { index: 1, size: 0 }),
        "negative_size" => matches!(err, StrataError::InvalidSpec { index: 1, size: -3 }),
        "missing_kind" => {
            matches!(err, StrataError::Io(e) if e.kind() == io::ErrorKind::InvalidData)
        }
        other => return Err(format!("no expected error recorded for `{other}`")),
    };
    if !matches {
        return Err(format!("unexpected error variant: {err:?}"));
    }

    Ok(match err {
        StrataError::EmptyNetwork => "strata::empty_network",
        StrataError::InvalidSpec { .. } => "strata::invalid_spec",
        _ => "strata::io",
    })
}

#[test]
fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let error_demos = collect_toml_files(demos_dir().join("errors"));

    assert!(
        !error_demos.is_empty(),
        "No error demos found in demos/errors/"
    );

    let mut mismatches = Vec::new();

    for demo_path in &error_demos {
        let stem = demo_path.file_stem().unwrap().to_string_lossy().to_string();
        let output_path = temp_dir.path().join(format!("error_{stem}.json"));
        let args = args(
            Some(demo_path.to_string_lossy().to_string()),
            None,
            output_path,
        );

        let err = match run(&args) {
            Ok(()) => {
                mismatches.push((demo_path.clone(), "succeeded unexpectedly".to_string()));
                continue;
            }
            Err(err) => err,
        };

        match expected_failure(&stem, &err) {
            Ok(expected_code) => {
                let code = to_reportable(&err).code().map(|c| c.to_string());
                if code.as_deref() != Some(expected_code) {
                    mismatches.push((
                        demo_path.clone(),
                        format!("expected code {expected_code}, got {code:?}"),
                    ));
                }
            }
            Err(reason) => mismatches.push((demo_path.clone(), reason)),
        }
    }

    if !mismatches.is_empty() {
        eprintln!("\nError demos that did not fail as expected:");
        for (path, reason) in &mismatches {
            eprintln!("  - {}: {}", path.display(), reason);
        }
        panic!("{} error demo(s) misbehaved", mismatches.len());
    }

    println!(
        "✅ All {} error demos failed as expected",
        error_demos.len()
    );
}

#[test]
fn e2e_preset_matches_demo_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let from_preset = temp_dir.path().join("preset.json");
    let from_file = temp_dir.path().join("file.json");

    run(&args(None, Some("mobilenet-v1"), from_preset.clone())).expect("Preset runs");
    let demo = demos_dir().join("mobilenet_v1.toml");
    run(&args(
        Some(demo.to_string_lossy().to_string()),
        None,
        from_file.clone(),
    ))
    .expect("Demo runs");

    let preset_json = fs::read_to_string(from_preset).expect("Preset output written");
    let file_json = fs::read_to_string(from_file).expect("File output written");
    assert_eq!(preset_json, file_json);
}

#[test]
fn e2e_unknown_preset_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("out.json");
    assert!(run(&args(None, Some("resnet-50"), output)).is_err());
}

#[test]
fn e2e_explicit_config_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("out.json");
    let demo = demos_dir().join("wide_classifier.toml");

    let mut args = args(Some(demo.to_string_lossy().to_string()), None, output.clone());
    args.config = Some(
        demos_dir()
            .join("config")
            .join("compact.toml")
            .to_string_lossy()
            .to_string(),
    );
    run(&args).expect("Demo runs with config");

    let json = fs::read_to_string(output).expect("Output written");
    let value: serde_json::Value = serde_json::from_str(&json).expect("Output is valid JSON");
    assert_eq!(value["layout"]["max_shown_nodes"], 8);
    assert_eq!(value["captions"].as_array().map(Vec::len), Some(0));
}

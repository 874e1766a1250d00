//! Integration tests for fire-params-cli.
//!
//! These tests verify end-to-end functionality of the CLI tool: config
//! loading, generation through the file writer, freshness checks and the
//! binary's exit codes.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

use fire_params::{ParameterDocument, Target};
use fire_params_cli::{
    config::{Config, ConfigManager, VariantConfig},
    error::{CliError, ConfigError},
    generator::ParamsGenerator,
    writer::{FileWriter, WriteResult},
};

/// Path to the vehicle fixture.
fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/vehicle.yaml")
}

fn config_in(dir: &Path) -> Config {
    let mut config = Config::default();
    config.output.dir = dir.to_path_buf();
    config
}

fn fire_params(dir: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_fire-params"))
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

// =============================================================================
// Config Integration Tests
// =============================================================================

#[test]
fn test_config_loading_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fire-params.toml");
    fs::write(
        &path,
        r#"
[output]
dir = "./out"
self_check = true

[[variant]]
name = "vehicle_params"
target = "cpp"
case = "lower_snake"
scope = "reexport"
"#,
    )
    .unwrap();

    let config = ConfigManager::load(Some(path.as_path())).unwrap();
    assert_eq!(config.output.dir, PathBuf::from("./out"));
    assert!(config.output.self_check);
    assert_eq!(config.variants.len(), 1);
    assert_eq!(config.variants[0].target, Target::Cpp);
}

#[test]
fn test_config_missing_explicit_file() {
    let dir = TempDir::new().unwrap();
    let err = ConfigManager::load(Some(dir.path().join("absent.toml").as_path())).unwrap_err();
    assert!(matches!(err, CliError::Config(ConfigError::NotFound { .. })));
}

#[test]
fn test_config_invalid_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fire-params.toml");
    fs::write(&path, "[[variant]]\nname = \"x\"\ntarget = \"fortran\"\n").unwrap();

    let err = ConfigManager::load(Some(path.as_path())).unwrap_err();
    assert!(matches!(
        err,
        CliError::Config(ConfigError::InvalidToml { .. })
    ));
}

#[test]
fn test_config_rejects_duplicate_variant_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fire-params.toml");
    fs::write(
        &path,
        "[[variant]]\nname = \"a\"\ntarget = \"rust\"\n\n[[variant]]\nname = \"a\"\ntarget = \"cpp\"\n",
    )
    .unwrap();

    let err = ConfigManager::load(Some(path.as_path())).unwrap_err();
    assert!(matches!(
        err,
        CliError::Config(ConfigError::InvalidValue { .. })
    ));
}

// =============================================================================
// Generation Integration Tests
// =============================================================================

#[test]
fn test_end_to_end_generation() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    let generator = ParamsGenerator::load(&fixture(), None).unwrap();
    let writer = FileWriter::new(dir.path(), false);
    let run = generator.write(&config, &writer).unwrap();
    assert!(run.is_complete());

    let module = fs::read_to_string(dir.path().join("params.rs")).unwrap();
    assert!(module.contains("pub const MAXIMUM_VEHICLE_VELOCITY: f64 = 55.0;"));
    assert!(module.contains("pub const BRAKING_DISTANCE_TABLE_SIZE: usize = 6;"));

    let header = fs::read_to_string(dir.path().join("params.h")).unwrap();
    assert!(header.contains("namespace vehicle {\nnamespace dynamics {"));
    assert!(header.contains("constexpr double maximum_vehicle_velocity = 55.0;"));

    let results = writer.take_results();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(WriteResult::was_written));
}

#[test]
fn test_second_generation_leaves_files_unchanged() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let generator = ParamsGenerator::load(&fixture(), None).unwrap();

    let writer = FileWriter::new(dir.path(), false);
    generator.write(&config, &writer).unwrap();
    writer.take_results();

    generator.write(&config, &writer).unwrap();
    let results = writer.take_results();
    assert!(results
        .iter()
        .all(|result| matches!(result, WriteResult::Unchanged { .. })));
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir.path().join("generated"));
    let generator = ParamsGenerator::load(&fixture(), None).unwrap();

    let writer = FileWriter::new(&config.output.dir, true);
    generator.write(&config, &writer).unwrap();

    assert!(!dir.path().join("generated").exists());
    assert_eq!(writer.take_results().len(), 2);
}

#[test]
fn test_self_check_adds_companion_file() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(dir.path());
    config.output.self_check = true;

    let generator = ParamsGenerator::load(&fixture(), None).unwrap();
    let writer = FileWriter::new(dir.path(), false);
    generator.write(&config, &writer).unwrap();

    let module = fs::read_to_string(dir.path().join("params.rs")).unwrap();
    assert!(module.contains("mod generated_value_checks"));

    let check = fs::read_to_string(dir.path().join("params_check.cc")).unwrap();
    assert!(check.contains("#include \"params.h\""));
    assert!(check.contains("int main()"));
}

#[test]
fn test_naming_failure_isolated_to_variant() {
    let document = ParameterDocument::from_yaml_str(
        r#"
schema_version: "1.0"
namespace: legacy
parameters:
  - name: register
    type: integer
    value: 7
"#,
    )
    .unwrap();
    let generator = ParamsGenerator::from_document(document).unwrap();

    let mut config = Config::default();
    let err = generator.generate(&config).unwrap_err();
    assert!(matches!(err, CliError::Generate(_)));

    config.output.isolate_naming_failures = true;
    let run = generator.generate(&config).unwrap();
    assert_eq!(run.outputs.len(), 1);
    assert_eq!(run.skipped.len(), 1);
    assert_eq!(run.skipped[0].variant, "cpp_nested");
    assert!(run.output("params.rs").is_some());
}

#[test]
fn test_row_arity_error_names_table_and_row() {
    let source = fs::read_to_string(fixture())
        .unwrap()
        .replace("[25.0, 0.5, 63.7]", "[25.0, 0.5]");
    let generator =
        ParamsGenerator::from_document(ParameterDocument::from_yaml_str(&source).unwrap())
            .unwrap();

    let err = generator.validate().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("braking_distance_table"), "{message}");
    assert!(message.contains("row 3 has 2 columns"), "{message}");
}

#[test]
fn test_custom_variant_files() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(dir.path());
    config.variants = vec![VariantConfig {
        file: Some(PathBuf::from("include/vehicle/params.hpp")),
        ..VariantConfig::new("header", Target::Cpp)
    }];

    let generator = ParamsGenerator::load(&fixture(), None).unwrap();
    generator
        .write(&config, &FileWriter::new(dir.path(), false))
        .unwrap();

    assert!(dir.path().join("include/vehicle/params.hpp").exists());
}

// =============================================================================
// Binary Tests
// =============================================================================

#[test]
fn test_init_creates_config_file() {
    let dir = TempDir::new().unwrap();

    let output = fire_params(dir.path(), &["init"]);
    assert!(output.status.success());

    let content = fs::read_to_string(dir.path().join("fire-params.toml")).unwrap();
    assert_eq!(content, ConfigManager::default_config_content());
}

#[test]
fn test_init_does_not_overwrite_existing_without_force() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fire-params.toml");
    fs::write(&path, "# custom\n").unwrap();

    let output = fire_params(dir.path(), &["init"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(fs::read_to_string(&path).unwrap(), "# custom\n");

    let output = fire_params(dir.path(), &["init", "--force"]);
    assert!(output.status.success());
    assert_ne!(fs::read_to_string(&path).unwrap(), "# custom\n");
}

#[test]
fn test_check_exit_codes() {
    let dir = TempDir::new().unwrap();
    let input = fixture();
    let input = input.to_str().unwrap();

    let output = fire_params(dir.path(), &["check", input, "-o", "out"]);
    assert_eq!(output.status.code(), Some(2));

    let output = fire_params(dir.path(), &["generate", input, "-o", "out"]);
    assert!(output.status.success());
    assert!(dir.path().join("out/params.rs").exists());

    let output = fire_params(dir.path(), &["check", input, "-o", "out"]);
    assert!(output.status.success());

    fs::write(dir.path().join("out/params.h"), "// stale\n").unwrap();
    let output = fire_params(dir.path(), &["check", input, "-o", "out"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_check_invalid_document_exits_two() {
    let dir = TempDir::new().unwrap();
    let source = fs::read_to_string(fixture())
        .unwrap()
        .replace("[25.0, 0.5, 63.7]", "[25.0, 0.5]");
    fs::write(dir.path().join("vehicle.yaml"), source).unwrap();

    let output = fire_params(dir.path(), &["check", "vehicle.yaml", "-o", "out"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("row 3 has 2 columns"));

    let output = fire_params(dir.path(), &["validate", "vehicle.yaml"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_isolate_naming_failures_flag() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("legacy.yaml"),
        "schema_version: \"1.0\"\nnamespace: legacy\nparameters:\n  - name: register\n    type: integer\n    value: 7\n",
    )
    .unwrap();

    let output = fire_params(dir.path(), &["generate", "legacy.yaml", "-o", "out"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("out").exists());

    let output = fire_params(
        dir.path(),
        &["generate", "legacy.yaml", "-o", "out", "--isolate-naming-failures"],
    );
    assert!(output.status.success());
    assert!(dir.path().join("out/params.rs").exists());
    assert!(!dir.path().join("out/params.h").exists());
}

#[test]
fn test_validate_emits_canonical_json() {
    let dir = TempDir::new().unwrap();
    let input = fixture();

    let output = fire_params(
        dir.path(),
        &[
            "validate",
            input.to_str().unwrap(),
            "--emit-json",
            "vehicle.params",
        ],
    );
    assert!(output.status.success());

    let json = dir.path().join("vehicle.params");
    let reloaded = ParamsGenerator::load(&json, None).unwrap();
    let original = ParamsGenerator::load(&input, None).unwrap();
    assert_eq!(reloaded.set(), original.set());
}

#[test]
fn test_generate_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("vehicle.ini"), "x = 1\n").unwrap();

    let output = fire_params(dir.path(), &["generate", "vehicle.ini"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("generated").exists());
}

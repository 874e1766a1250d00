//! Snapshot tests for rendered artifacts.
//!
//! These tests use insta to capture the exact output of each emitter.
//! Run `cargo insta review` to review and accept snapshot changes.

use fire_params::{
    load_parameter_set, render, DriverOptions, GeneratorDriver, NamingConvention, ParameterSet,
    ScopeStyle, Target, Variant,
};

fn vehicle_set() -> ParameterSet {
    load_parameter_set(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/vehicle.yaml"
    ))
    .unwrap()
}

fn nested() -> NamingConvention {
    NamingConvention::lower_snake().with_scope_path(["vehicle", "dynamics"])
}

#[test]
fn snapshot_cpp_nested_header() {
    let artifact = render(&vehicle_set(), &nested(), Target::Cpp).unwrap();
    insta::assert_snapshot!("vehicle_cpp_nested", artifact.content);
}

#[test]
fn snapshot_cpp_flat_upper_header() {
    let artifact = render(&vehicle_set(), &NamingConvention::upper_snake(), Target::Cpp).unwrap();
    insta::assert_snapshot!("vehicle_cpp_flat_upper", artifact.content);
}

#[test]
fn snapshot_rust_nested_module() {
    let artifact = render(&vehicle_set(), &nested(), Target::Rust).unwrap();
    insta::assert_snapshot!("vehicle_rust_nested", artifact.content);
}

#[test]
fn snapshot_cpp_self_check() {
    let driver = GeneratorDriver::with_options(DriverOptions {
        self_check: true,
        ..DriverOptions::default()
    });
    let variant = Variant::new(
        "vehicle_params",
        Target::Cpp,
        nested().with_scope_style(ScopeStyle::Reexport),
    );
    let run = driver.generate(&vehicle_set(), &[variant]).unwrap();

    let check = &run.output("vehicle_params_check.cc").unwrap().content;
    insta::assert_snapshot!("vehicle_cpp_reexport_check", check);
}

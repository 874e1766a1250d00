//! # fire-params
//!
//! Generate compile-time parameter constants for Rust and C++ from one
//! typed parameter set.
//!
//! A parameter set holds named scalars (float, integer, string, boolean) and
//! tables (ordered rows over typed columns). The crate validates the set once,
//! then renders it under any number of naming conventions. Every rendering
//! exposes the same values; only identifier spelling and scoping differ.
//!
//! ## Quick Start
//!
//! ```rust
//! use fire_params::{
//!     render, validate, Column, NamingConvention, ParamType, ParameterSet, ScalarParameter,
//!     TableParameter, Target,
//! };
//!
//! let mut set = ParameterSet::with_namespace("vehicle.dynamics").unwrap();
//! set.push(ScalarParameter::new("maximum_vehicle_velocity", ParamType::Float64, 55.0))
//!     .unwrap();
//! set.push(
//!     TableParameter::new("gear_ratios", vec![Column::new("ratio", ParamType::Float64)])
//!         .with_row(vec![3.5.into()]),
//! )
//! .unwrap();
//! validate(&set).unwrap();
//!
//! let flat = render(&set, &NamingConvention::upper_snake(), Target::Rust).unwrap();
//! assert!(flat.content.contains("pub const MAXIMUM_VEHICLE_VELOCITY: f64 = 55.0;"));
//!
//! let nested = NamingConvention::lower_snake().with_scope_path(["vehicle", "dynamics"]);
//! let header = render(&set, &nested, Target::Cpp).unwrap();
//! assert!(header.content.contains("constexpr std::size_t gear_ratios_size = 1;"));
//! ```
//!
//! ## Architecture
//!
//! - [`model`] - Parameter set, parameters and values
//! - [`validator`] - Type, shape and uniqueness checks
//! - [`naming`] - Naming conventions and identifier resolution
//! - [`emitter`] - Rust and C++ source rendering
//! - [`driver`] - Multi-variant generation and artifact writing
//! - [`document`] - YAML/JSON parameter documents
//! - [`error`] - Error types
//!
//! ## Features
//!
//! | Feature | Description | Default |
//! |---------|-------------|---------|
//! | `parallel` | Emit variants in parallel with `rayon` | ✅ |

pub mod document;
pub mod driver;
pub mod emitter;
pub mod error;
pub mod model;
pub mod naming;
pub mod validator;

// Re-export main types for convenience
pub use document::{load_parameter_set, ParameterDocument};
pub use driver::{
    ArtifactSink, DriverOptions, GenerationRun, GeneratorDriver, OutputFile, SkippedVariant,
    Variant,
};
pub use emitter::{emit, render, CppEmitter, Emitter, RustEmitter, SourceArtifact, Target};
pub use error::{
    DocumentError, EmissionError, GenerateError, NamingError, SchemaError, ValidationError,
};
pub use model::{
    Column, ParamType, Parameter, ParameterSet, ScalarParameter, TableParameter, Value,
};
pub use naming::{
    resolve, CaseStyle, NameResolver, NamingConvention, ResolvedNames, RowTypeRule, ScopeStyle,
};
pub use validator::validate;

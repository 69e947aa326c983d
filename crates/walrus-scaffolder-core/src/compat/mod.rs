//! Compatibility matrix and validation
//!
//! Rejections are values, never errors: an incompatible combination is a
//! user-recoverable outcome the caller decides how to present.

pub mod matrix;
pub mod validator;

pub use matrix::{row, MatrixRow};
pub use validator::{
    is_stable, validate, Axis, Incompatibility, IncompatibilityKind, Validation, PRIMARY_SDK,
    UI_FRAMEWORK,
};

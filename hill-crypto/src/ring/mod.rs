//! # Ring Module
//!
//! Provides the [`Ring`] struct for representing finite rings Z_m and performing modular arithmetic,
//! plus the small-matrix operations the Hill cipher is built on.

pub mod helper;
pub mod math;
pub mod matrix_ops;

/// Represents a mathematical vector using a `Vec<i64>`.
pub type Vector = Vec<i64>;
/// Represents a mathematical matrix using a `Vec<Vec<i64>>`.
pub type Matrix = Vec<Vec<i64>>;

pub use helper::{gcd, is_coprime, mod_inverse};
pub use math::Ring;

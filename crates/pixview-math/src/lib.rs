//! Affine/homogeneous matrix math for the **pixview** image viewer.
//!
//! This crate is intentionally dependency-free so transform math can be
//! consumed and tested without pulling in any GPU or windowing code.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`matrix`] | `Matrix` value type and transform constructors |
//! | [`error`] | `DimensionMismatch` |
//!
//! # Quick start
//!
//! ```rust
//! use pixview_math::Matrix;
//!
//! let view = Matrix::multiply_array(&[
//!     Matrix::scaling(2.0),
//!     Matrix::translation(0.5, -0.25, 0.0),
//!     Matrix::rotation_around_z(std::f64::consts::FRAC_PI_2),
//! ])
//! .unwrap();
//! assert_eq!(view.shape(), (4, 4));
//! ```

pub mod error;
pub mod matrix;

pub use error::DimensionMismatch;
pub use matrix::Matrix;

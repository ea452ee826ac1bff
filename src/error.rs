//! Errors surfaced at the spline's mutation boundary.

use thiserror::Error;

/// An error raised while mutating a [Spline](crate::Spline).
///
/// Geometric queries never return errors; they clamp their inputs or
/// degrade to a sentinel value instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplineError {
    /// The coordinate slices passed to `set_data` differ in length.
    #[error("coordinate slices differ in length: {xs} x-values, {ys} y-values")]
    MismatchedData { xs: usize, ys: usize },
}

pub use cgmath;
pub use error::SplineError;
pub use spline::{Spline, SplineConfig};
pub use util::Interval;

mod error;
pub mod math;
mod spline;
mod util;

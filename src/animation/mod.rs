//! # Animation
//!
//! Time sources and the closed Catmull-Rom curves that drive animated
//! translations.

pub mod clock;
pub mod spline;

pub use clock::{Clock, FrameTime, ManualClock, SystemClock};
pub use spline::{CatmullRom, CurveSample, SplineError};

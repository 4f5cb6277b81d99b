//! Frame timing helpers.
//!
//! - [`Timer`]: per-frame delta and elapsed time
//! - [`FpsCounter`]: frame rate measurement, reported once per second

pub mod fps_counter;
pub mod time;

pub use fps_counter::FpsCounter;
pub use time::Timer;

//! # Effect Traits
//!
//! Environment capabilities that stores depend on, injected rather than read
//! from globals:
//!
//! - [`PhysicalClock`]: wall-clock milliseconds for record timestamps
//! - [`IdGenerator`]: fresh identifiers for records
//!
//! Production handlers live next to the traits. Deterministic handlers for
//! tests live in `lumen-testkit`.

mod id;
mod time;

pub use id::{IdGenerator, RandomIds};
pub use time::{MonotonicClock, PhysicalClock, SystemClock};

//! Estimates π by integrating 4/(1+x²) over [0, 1] with the midpoint rule,
//! splitting the subintervals across parallel workers.

pub mod config;
pub mod error;
pub mod estimate;
pub mod partition;
pub mod reduce;

pub use config::Config;
pub use error::{PiError, Result};
pub use estimate::{estimate_pi, sequential_estimate, Estimate};
pub use partition::{partition, WorkRange};
pub use reduce::Backend;

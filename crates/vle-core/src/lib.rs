//! vle-core: stable foundation for the VLE correlation workspace.
//!
//! Contains:
//! - units (uom SI types + constructors, gas constant)
//! - numeric (finiteness and mole-fraction checks, grids, xlogy)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{VleError, VleResult};
pub use numeric::*;
pub use units::*;

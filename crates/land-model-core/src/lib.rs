pub mod break_even;
pub mod costs;
pub mod error;
pub mod financing;
pub mod plot;
pub mod rates;
pub mod returns;
pub mod types;

#[cfg(feature = "sensitivity")]
pub mod alternatives;

#[cfg(feature = "sensitivity")]
pub mod sensitivity;

#[cfg(feature = "scoring")]
pub mod scoring;

#[cfg(feature = "analysis")]
pub mod analysis;

pub use error::LandModelError;
pub use types::*;

/// Standard result type for all land-model operations
pub type LandModelResult<T> = Result<T, LandModelError>;

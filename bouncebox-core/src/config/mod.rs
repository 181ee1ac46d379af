//! Configuration types
//!
//! All configuration is compiled in. There is no runtime configuration
//! surface: the firmware builds its pipeline from the `DEFAULT` constants.

pub mod animation;
pub mod display;

pub use animation::*;
pub use display::*;

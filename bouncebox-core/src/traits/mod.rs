//! Hardware abstraction traits
//!
//! These traits define the interface between the frame pipeline and
//! board-specific implementations.

pub mod clock;
pub mod display;

pub use clock::Clock;
pub use display::BlockWriter;

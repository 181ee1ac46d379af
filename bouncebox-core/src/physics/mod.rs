//! Box physics and population

pub mod bouncer;
pub mod spawn;

pub use bouncer::{Bounds, BouncingBox, Vec2};
pub use spawn::spawn_boxes;

//! Initial box population

use heapless::Vec;
use rand::{Rng, RngCore};

use super::{Bounds, BouncingBox};
use crate::color::random_color;
use crate::config::{AnimationConfig, MAX_BOXES};

/// Build the animation's boxes, all starting at the playfield center
///
/// `box_count` is capped at `MAX_BOXES`. Sizes larger than the playfield
/// are clamped so every box fits.
pub fn spawn_boxes<R: RngCore + ?Sized>(
    config: &AnimationConfig,
    bounds: Bounds,
    rng: &mut R,
) -> Vec<BouncingBox, MAX_BOXES> {
    let mut boxes = Vec::new();
    let max_size = bounds.width.min(bounds.height);

    for _ in 0..config.box_count.min(MAX_BOXES) {
        let size = rng.gen_range(config.size_range.clone()).clamp(1, max_size);
        let color = random_color(rng, config.channel_range.clone());
        let b = BouncingBox::random(bounds, size, color, config.speed, rng);
        // Capacity checked by the loop bound
        let _ = boxes.push(b);
    }

    boxes
}

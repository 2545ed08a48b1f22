use raylib::prelude::*;

use crate::constants::*;

/// Logical size of the area being drawn into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Cubic ease-out over the entrance window, saturating at 1.
pub fn entrance_progress(elapsed_ms: f32) -> f32 {
    let t = (elapsed_ms / ENTRANCE_DURATION_MS).clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Cover-fit scale reduced by 15%: the image overflows left and right but stays centred.
pub fn cover_scale(viewport: Viewport, image_width: f32, image_height: f32) -> f32 {
    (viewport.width / image_width).max(viewport.height / image_height) * COVER_REDUCTION
}

pub fn float_offset(time_ms: f64) -> f32 {
    FLOAT_AMPLITUDE * (time_ms * FLOAT_SPEED).sin() as f32
}

/// Destination rectangle of the floating image for one frame.
///
/// `elapsed_ms` is measured from the start of the render loop and drives the
/// fly-in; `time_ms` is the frame timestamp and drives the float.
pub fn place_image(
    viewport: Viewport,
    image_width: f32,
    image_height: f32,
    elapsed_ms: f32,
    time_ms: f64,
) -> Rectangle {
    let progress = entrance_progress(elapsed_ms);
    let scale = cover_scale(viewport, image_width, image_height);

    let scaled_width = image_width * scale;
    let scaled_height = image_height * scale;

    // Off-screen right -> centred, linear in the already eased progress
    let start_x = viewport.width + OFFSCREEN_MARGIN;
    let end_x = (viewport.width - scaled_width) / 2.0;
    let x = start_x + (end_x - start_x) * progress;

    let y = (viewport.height - scaled_height) / 2.0 + float_offset(time_ms);

    Rectangle::new(x, y, scaled_width, scaled_height)
}

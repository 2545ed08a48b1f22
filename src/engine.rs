use raylib::prelude::*;

/// A full-window animated scene driven by the main loop.
pub trait Scene {
    /// Starts asset loading; `now_ms` is the mount time.
    fn mount(&mut self, now_ms: f64);

    /// Advances the scene and draws one frame to the window.
    fn render_frame(&mut self, now_ms: f64, rl: &mut RaylibHandle, thread: &RaylibThread);

    /// Pixels of the last composed frame, bottom row first.
    fn frame_image(&self) -> Option<Image>;

    /// Cancels everything the scene scheduled and releases its GPU resources.
    fn unmount(&mut self, rl: &mut RaylibHandle);
}

use raylib::prelude::*;
use tracing::debug;

use crate::error::LandingError;
use crate::motion::Viewport;

/// Physical pixel size of the drawing surface for a viewport at a given pixel density.
pub fn target_size(viewport: Viewport, dpr: f32) -> (u32, u32) {
    let dpr = if dpr > 0.0 { dpr } else { 1.0 };
    let width = (viewport.width * dpr).round().max(1.0) as u32;
    let height = (viewport.height * dpr).round().max(1.0) as u32;
    (width, height)
}

/// Tracks the current surface dimensions so unchanged frames skip reallocation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    current: Option<(u32, u32)>,
}

impl SurfaceSize {
    /// Returns the new size when it differs from the current one.
    pub fn resize_if_changed(&mut self, viewport: Viewport, dpr: f32) -> Option<(u32, u32)> {
        let wanted = target_size(viewport, dpr);
        if self.current == Some(wanted) {
            return None;
        }
        self.current = Some(wanted);
        Some(wanted)
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}

/// Off-screen render texture the scene draws into, sized in physical pixels.
pub struct Surface {
    size: SurfaceSize,
    texture: Option<RenderTexture2D>,
}

impl Surface {
    pub fn new() -> Self {
        Self { size: SurfaceSize::default(), texture: None }
    }

    /// Reallocates the render texture when the viewport or pixel density changed.
    pub fn fit(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        viewport: Viewport,
        dpr: f32,
    ) -> Result<(), LandingError> {
        if let Some((width, height)) = self.size.resize_if_changed(viewport, dpr) {
            // Release the old texture before asking for a new one
            self.texture = None;
            match rl.load_render_texture(thread, width, height) {
                Ok(texture) => {
                    debug!(width, height, "drawing surface resized");
                    self.texture = Some(texture);
                }
                Err(e) => {
                    self.size.reset();
                    return Err(LandingError::Surface(e.to_string()));
                }
            }
        }
        Ok(())
    }

    pub fn texture(&self) -> Option<&RenderTexture2D> {
        self.texture.as_ref()
    }

    pub fn texture_mut(&mut self) -> Option<&mut RenderTexture2D> {
        self.texture.as_mut()
    }

    pub fn release(&mut self) {
        self.texture = None;
        self.size.reset();
    }
}

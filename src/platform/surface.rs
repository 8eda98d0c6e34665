//=========================================================================
// Pixel Surface
//=========================================================================
//
// Presents the logical raster in the window through `pixels`.
//
// The pixel buffer stays at the logical resolution; `pixels` scales it
// to the window by the largest integer factor that fits, sampling
// nearest-neighbor, and letterboxes the rest.
//
// The raster is premultiplied. Presentation ignores alpha, so stored
// bytes read as the image composited over black.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use log::{debug, warn};
use pixels::{Pixels, SurfaceTexture};
use winit::window::Window;

//=== Internal Dependencies ===============================================

use crate::core::canvas::Canvas;
use crate::core::platform_bridge::PlatformError;

//=== PixelSurface ========================================================

pub(crate) struct PixelSurface {
    pixels: Pixels<'static>,
}

impl PixelSurface {
    /// Creates a surface for `window` with a `width`×`height` buffer.
    pub(crate) fn new(window: Arc<Window>, width: u32, height: u32) -> Result<Self, PlatformError> {
        let size = window.inner_size();
        let texture = SurfaceTexture::new(size.width, size.height, window);
        let pixels = Pixels::new(width, height, texture)
            .map_err(|e| PlatformError::Surface(e.to_string()))?;

        debug!(
            target: "platform",
            "Pixel surface {}x{} on {}x{} window",
            width,
            height,
            size.width,
            size.height
        );
        Ok(Self { pixels })
    }

    /// Follows a window resize. Zero sizes (minimized) are ignored.
    pub(crate) fn resize(&mut self, width: u32, height: u32) -> Result<(), PlatformError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels
            .resize_surface(width, height)
            .map_err(|e| PlatformError::Surface(e.to_string()))
    }

    /// Uploads `canvas` and presents it.
    pub(crate) fn present(&mut self, canvas: &Canvas) -> Result<(), PlatformError> {
        if !canvas.copy_into(self.pixels.frame_mut()) {
            warn!(target: "platform", "Raster size does not match pixel buffer, frame skipped");
            return Ok(());
        }
        self.pixels
            .render()
            .map_err(|e| PlatformError::Surface(e.to_string()))
    }
}

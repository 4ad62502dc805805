//! 2D frame-description layer for the client GUI.
//!
//! The GUI builds each frame as a `FrameContent`, a flat list of draw
//! commands and modifiers, through the `Canvas2` recorder, then hands it to
//! a `Renderer` for presentation. The GPU/windowing backend lives with the
//! host; this crate defines the interface it must satisfy plus a headless
//! recording implementation used by tests.

use crate::frame_content::FrameContent;
use anyhow::Result;
use image::RgbaImage;
use tracing::trace;
use vek::*;


pub mod frame_content;
pub mod modifier;

pub mod prelude {
    pub use crate::{
        ImageHandle,
        RecordingRenderer,
        Renderer,
        frame_content::{
            Canvas2,
            DrawImage,
            DrawObj2,
            FrameContent,
            FrameItem,
            HAlign,
            TextBlock,
            VAlign,
        },
        modifier::{
            Clip2,
            Modifier2,
            Transform2,
        },
    };
}


/// Handle to an image the renderer has accepted for drawing.
///
/// Cheap to clone; carries the pixel size so layout code can measure images
/// without consulting the backend. Handles compare equal iff they came from
/// the same upload.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ImageHandle {
    id: u64,
    size: Extent2<u32>,
}

impl ImageHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn size(&self) -> Extent2<u32> {
        self.size
    }
}


/// Presentation backend the GUI draws through.
///
/// One instance owns the render target for one window. All calls are made
/// from the UI thread.
pub trait Renderer {
    /// Accept image pixels for later drawing, returning a handle usable in
    /// `DrawImage` items.
    fn upload_image(&mut self, image: &RgbaImage) -> ImageHandle;

    /// Present a frame described by `content`.
    fn draw_frame(&mut self, content: &FrameContent) -> Result<()>;

    /// The render target changed size.
    fn resize(&mut self, size: Extent2<u32>);

    /// Current render target size in pixels.
    fn size(&self) -> Extent2<u32>;
}


/// Headless `Renderer` that retains the last submitted frame instead of
/// presenting it. Backs unit tests and any host that runs without a window.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    size: Extent2<u32>,
    next_image_id: u64,
    last_frame: Option<FrameContent>,
    frames_drawn: u64,
}

impl RecordingRenderer {
    pub fn new(size: Extent2<u32>) -> Self {
        RecordingRenderer {
            size,
            next_image_id: 0,
            last_frame: None,
            frames_drawn: 0,
        }
    }

    pub fn last_frame(&self) -> Option<&FrameContent> {
        self.last_frame.as_ref()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }
}

impl Renderer for RecordingRenderer {
    fn upload_image(&mut self, image: &RgbaImage) -> ImageHandle {
        let (w, h) = image.dimensions();
        let id = self.next_image_id;
        self.next_image_id += 1;
        ImageHandle {
            id,
            size: Extent2 { w, h },
        }
    }

    fn draw_frame(&mut self, content: &FrameContent) -> Result<()> {
        trace!(items = content.items().len(), "recording frame");
        self.last_frame = Some(content.clone());
        self.frames_drawn += 1;
        Ok(())
    }

    fn resize(&mut self, size: Extent2<u32>) {
        self.size = size;
    }

    fn size(&self) -> Extent2<u32> {
        self.size
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_mints_distinct_handles() {
        let mut renderer = RecordingRenderer::new(Extent2 { w: 640, h: 480 });
        let image = RgbaImage::new(4, 2);
        let a = renderer.upload_image(&image);
        let b = renderer.upload_image(&image);
        assert_ne!(a, b);
        assert_eq!(a.size(), Extent2 { w: 4, h: 2 });
    }

    #[test]
    fn draw_frame_is_retained() {
        let mut renderer = RecordingRenderer::new(Extent2 { w: 640, h: 480 });
        let mut content = FrameContent::new();
        content.canvas()
            .color(Rgba::new(1.0, 0.0, 0.0, 1.0))
            .draw_solid([10.0, 10.0]);
        renderer.draw_frame(&content).unwrap();
        assert_eq!(renderer.last_frame(), Some(&content));
        assert_eq!(renderer.frames_drawn(), 1);
    }
}

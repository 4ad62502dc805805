//! The description of a frame to draw, and the canvas API for building one.
//!
//! A `FrameContent` is a flat list of (stack length, item) pairs. Pushing a
//! modifier extends the stack; every item is affected by exactly the
//! modifiers below its stack length. This keeps the frame description a
//! plain, inspectable value. Nothing here touches the backend.

use crate::{
    ImageHandle,
    modifier::{
        Modifier2,
        Transform2,
        Clip2,
    },
};
use std::fmt::Write as _;
use vek::*;


#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameContent(pub Vec<(usize, FrameItem)>);

#[derive(Debug, Clone, PartialEq)]
pub enum FrameItem {
    PushModifier(Modifier2),
    Draw(DrawObj2),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawObj2 {
    /// The unit square, colored by the modifier stack.
    Solid,
    Image(DrawImage),
    Text(TextBlock),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawImage {
    pub image: ImageHandle,
    /// Texture-space start of the sampled region, in [0, 1] coordinates.
    pub tex_start: Vec2<f32>,
    /// Texture-space extent of the sampled region, in [0, 1] coordinates.
    pub tex_extent: Extent2<f32>,
}

/// A block of text, carried as data. Layout and rasterization belong to the
/// backend consuming the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub text: String,
    pub logical_size: f32,
    pub color: Rgba<f32>,
    pub h_align: HAlign,
    pub v_align: VAlign,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

impl From<DrawImage> for DrawObj2 {
    fn from(inner: DrawImage) -> Self {
        DrawObj2::Image(inner)
    }
}

impl From<TextBlock> for DrawObj2 {
    fn from(inner: TextBlock) -> Self {
        DrawObj2::Text(inner)
    }
}


impl FrameContent {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn canvas(&mut self) -> Canvas2 {
        Canvas2 {
            target: self,
            stack_len: 0,
        }
    }

    pub fn items(&self) -> &[(usize, FrameItem)] {
        &self.0
    }

    /// Debug dump of the frame structure with modifier nesting rendered as
    /// tags.
    pub fn to_pseudo_xml(&self) -> String {
        let mut buf = String::new();
        let mut tag_stack: Vec<&'static str> = Vec::new();
        for &(stack_len, ref item) in &self.0 {
            while tag_stack.len() > stack_len {
                let tag = tag_stack.pop().unwrap();
                for _ in 0..tag_stack.len() {
                    buf.push_str("    ");
                }
                let _ = writeln!(&mut buf, "</{}>", tag);
            }
            for _ in 0..tag_stack.len() {
                buf.push_str("    ");
            }
            match item {
                &FrameItem::PushModifier(m) => match m {
                    Modifier2::Transform(Transform2(mat)) => {
                        let _ = writeln!(&mut buf, "<transform mat=\"{:?}\">", mat);
                        tag_stack.push("transform");
                    }
                    Modifier2::Color(Rgba { r, g, b, a }) => {
                        let _ = writeln!(
                            &mut buf,
                            "<color rgba=\"{:.2},{:.2},{:.2},{:.2}\">",
                            r, g, b, a,
                        );
                        tag_stack.push("color");
                    }
                    Modifier2::Clip(Clip2(Vec3 { x, y, z })) => {
                        let _ = writeln!(
                            &mut buf,
                            "<clip vec=\"{:.2},{:.2},{:.2}\">",
                            x, y, z,
                        );
                        tag_stack.push("clip");
                    }
                }
                &FrameItem::Draw(ref o) => match o {
                    DrawObj2::Solid => {
                        buf.push_str("<solid/>\n");
                    }
                    DrawObj2::Image(i) => {
                        let _ = writeln!(
                            &mut buf,
                            "<image id={} texstart=\"{:.2},{:.2}\" texextent=\"{:.2},{:.2}\"/>",
                            i.image.id(),
                            i.tex_start.x,
                            i.tex_start.y,
                            i.tex_extent.w,
                            i.tex_extent.h,
                        );
                    }
                    DrawObj2::Text(t) => {
                        let _ = writeln!(&mut buf, "<text str={:?}/>", t.text);
                    }
                }
            }
        }
        while let Some(tag) = tag_stack.pop() {
            for _ in 0..tag_stack.len() {
                buf.push_str("    ");
            }
            let _ = writeln!(&mut buf, "</{}>", tag);
        }
        buf
    }
}


/// Recorder for drawing into a `FrameContent`.
///
/// Modifier methods consume and return the canvas one level deeper;
/// `reborrow` forks the current level so siblings are unaffected by each
/// other's modifiers.
#[derive(Debug)]
pub struct Canvas2<'a> {
    target: &'a mut FrameContent,
    stack_len: usize,
}

impl<'a> Canvas2<'a> {
    pub fn reborrow(&mut self) -> Canvas2 {
        Canvas2 {
            target: &mut *self.target,
            stack_len: self.stack_len,
        }
    }

    fn push(&mut self, item: FrameItem) {
        self.target.0.push((self.stack_len, item));
    }

    pub fn modify<I: Into<Modifier2>>(mut self, modifier: I) -> Self {
        self.push(FrameItem::PushModifier(modifier.into()));
        self.stack_len += 1;
        self
    }

    pub fn translate<V: Into<Vec2<f32>>>(self, v: V) -> Self {
        self.modify(Transform2::translate(v))
    }

    pub fn scale<V: Into<Vec2<f32>>>(self, v: V) -> Self {
        self.modify(Transform2::scale(v))
    }

    pub fn rotate(self, r: f32) -> Self {
        self.modify(Transform2::rotate(r))
    }

    pub fn color<C: Into<Rgba<f32>>>(self, c: C) -> Self {
        self.modify(c.into())
    }

    pub fn min_x(self, f: f32) -> Self {
        self.modify(Clip2::min_x(f))
    }

    pub fn max_x(self, f: f32) -> Self {
        self.modify(Clip2::max_x(f))
    }

    pub fn min_y(self, f: f32) -> Self {
        self.modify(Clip2::min_y(f))
    }

    pub fn max_y(self, f: f32) -> Self {
        self.modify(Clip2::max_y(f))
    }

    pub fn draw<I: Into<DrawObj2>>(mut self, obj: I) -> Self {
        self.push(FrameItem::Draw(obj.into()));
        self
    }

    /// Draw an axis-aligned solid rectangle of the given size at the current
    /// origin, colored by the modifier stack.
    pub fn draw_solid<V: Into<Extent2<f32>>>(mut self, size: V) -> Self {
        let size = size.into();
        self.reborrow()
            .scale([size.w, size.h])
            .draw(DrawObj2::Solid);
        self
    }

    pub fn draw_image<V: Into<Extent2<f32>>>(
        self,
        image: &ImageHandle,
        size: V,
    ) -> Self {
        self.draw_image_uv(image, size, [0.0, 0.0], [1.0, 1.0])
    }

    pub fn draw_image_uv<V1, V2, V3>(
        mut self,
        image: &ImageHandle,
        size: V1,
        tex_start: V2,
        tex_extent: V3,
    ) -> Self
    where
        V1: Into<Extent2<f32>>,
        V2: Into<Vec2<f32>>,
        V3: Into<Extent2<f32>>,
    {
        let size = size.into();
        self.reborrow()
            .scale([size.w, size.h])
            .draw(DrawObj2::Image(DrawImage {
                image: image.clone(),
                tex_start: tex_start.into(),
                tex_extent: tex_extent.into(),
            }));
        self
    }

    pub fn draw_text(self, text: TextBlock) -> Self {
        self.draw(DrawObj2::Text(text))
    }
}

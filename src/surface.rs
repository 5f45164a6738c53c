use image::{Rgba, RgbaImage};
#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};
use tiny_skia::{Paint, Pixmap, PixmapPaint, Transform};

use crate::{
    color::Color,
    math::{Raw, Size, Vector},
    Error, Result,
};

/// Options used to create a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SurfaceOptions {
    /// The size of the surface in pixels.
    pub size: Size<u32, Raw>,
    /// The color both buffers start with and that [`Surface::clear`] paints.
    pub clear_color: Color,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            size: Size::new(800, 600),
            clear_color: Color::WHITE,
        }
    }
}

impl SurfaceOptions {
    /// Returns options for a surface of `width × height` pixels.
    #[must_use]
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            ..Self::default()
        }
    }

    /// Sets the clear color.
    #[must_use]
    pub const fn with_clear_color(mut self, clear_color: Color) -> Self {
        self.clear_color = clear_color;
        self
    }
}

/// One of the two buffers of a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Buffer {
    /// The displayed buffer.
    Front,
    /// The buffer drawing operations paint into.
    Back,
}

/// A double-buffered RGBA render target.
///
/// Drawing always targets the back buffer, addressed top-down. Readback
/// through [`Surface::read_pixels`] follows the GL convention instead: rows
/// are numbered from the bottom of the surface.
#[derive(Debug, Clone)]
pub struct Surface {
    front: Pixmap,
    back: Pixmap,
    read_buffer: Buffer,
    clear_color: Color,
    translation: Vector<f32, Raw>,
    matrix_stack: Vec<Vector<f32, Raw>>,
}

impl Surface {
    /// Returns a new surface with both buffers cleared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSurfaceSize`] if either axis is zero or the
    /// buffers cannot be allocated.
    pub fn new(options: SurfaceOptions) -> Result<Self> {
        let Size { width, height, .. } = options.size;
        let mut cleared =
            Pixmap::new(width, height).ok_or(Error::InvalidSurfaceSize { width, height })?;
        cleared.fill(options.clear_color.into());
        Ok(Self {
            front: cleared.clone(),
            back: cleared,
            read_buffer: Buffer::Back,
            clear_color: options.clear_color,
            translation: Vector::zero(),
            matrix_stack: Vec::new(),
        })
    }

    /// Returns the size of the surface in pixels.
    #[must_use]
    pub fn size(&self) -> Size<u32, Raw> {
        Size::new(self.back.width(), self.back.height())
    }

    /// Returns the width of the surface in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.back.width()
    }

    /// Returns the height of the surface in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.back.height()
    }

    /// Returns the color [`Surface::clear`] paints.
    #[must_use]
    pub const fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Sets the color [`Surface::clear`] paints.
    pub fn set_clear_color(&mut self, clear_color: Color) {
        self.clear_color = clear_color;
    }

    /// Fills the back buffer with the clear color.
    pub fn clear(&mut self) {
        self.back.fill(self.clear_color.into());
    }

    /// Exchanges the front and back buffers.
    pub fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Returns the buffer [`Surface::read_pixels`] reads from.
    #[must_use]
    pub const fn read_buffer(&self) -> Buffer {
        self.read_buffer
    }

    /// Selects the buffer [`Surface::read_pixels`] reads from.
    pub fn set_read_buffer(&mut self, buffer: Buffer) {
        self.read_buffer = buffer;
    }

    const fn buffer(&self, buffer: Buffer) -> &Pixmap {
        match buffer {
            Buffer::Front => &self.front,
            Buffer::Back => &self.back,
        }
    }

    /// Returns a copy of `buffer`, top row first, with straight alpha.
    #[must_use]
    pub fn image(&self, buffer: Buffer) -> RgbaImage {
        let source = self.buffer(buffer);
        RgbaImage::from_fn(source.width(), source.height(), |x, y| {
            Rgba(straight_rgba(source, x, y))
        })
    }

    /// Returns the back buffer's color at (`x`, `y`), counting rows from the
    /// top.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.back
            .pixel(x, y)
            .map(|pixel| Color::from(pixel.demultiply()))
    }

    /// Reads a `width × height` block of RGBA bytes from the read buffer.
    ///
    /// `y` counts rows from the bottom of the surface, and the returned rows
    /// are ordered bottom to top. A pixel at top-down row `r` is read at
    /// `y = height - 1 - r`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadOutOfBounds`] if any part of the block lies
    /// outside of the surface.
    pub fn read_pixels(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Vec<u8>> {
        let out_of_bounds = Error::ReadOutOfBounds {
            x,
            y,
            width,
            height,
        };
        let right = x.checked_add(width).ok_or_else(|| out_of_bounds.clone())?;
        let top = y.checked_add(height).ok_or_else(|| out_of_bounds.clone())?;
        if right > self.width() || top > self.height() {
            return Err(out_of_bounds);
        }

        let source = self.buffer(self.read_buffer);
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for row in y..top {
            let image_row = self.height() - 1 - row;
            for column in x..right {
                data.extend_from_slice(&straight_rgba(source, column, image_row));
            }
        }
        Ok(data)
    }

    /// Saves the current translation.
    pub fn push_matrix(&mut self) {
        self.matrix_stack.push(self.translation);
    }

    /// Restores the most recently saved translation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MatrixStackUnderflow`] if nothing was pushed.
    pub fn pop_matrix(&mut self) -> Result<()> {
        self.translation = self
            .matrix_stack
            .pop()
            .ok_or(Error::MatrixStackUnderflow)?;
        Ok(())
    }

    /// Offsets everything painted afterwards by (`x`, `y`).
    ///
    /// Painting snaps the translation to whole pixels.
    pub fn translate(&mut self, x: f32, y: f32) {
        self.translation += Vector::new(x, y);
    }

    /// Returns the current translation.
    #[must_use]
    pub const fn translation(&self) -> Vector<f32, Raw> {
        self.translation
    }

    fn pixel_offset(&self) -> (i32, i32) {
        let offset = self.translation.round();
        (offset.x as i32, offset.y as i32)
    }

    /// Draws `layer` over the back buffer with its top-left corner at the
    /// current translation.
    pub fn composite(&mut self, layer: &Pixmap) {
        let (x, y) = self.pixel_offset();
        self.back.draw_pixmap(
            x,
            y,
            layer.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    /// Strokes `path` into the back buffer. `transform` maps the path to
    /// device pixels, and the current translation is applied after it.
    pub fn stroke_path(
        &mut self,
        path: &tiny_skia::Path,
        paint: &Paint<'_>,
        stroke: &tiny_skia::Stroke,
        transform: Transform,
    ) {
        let (x, y) = self.pixel_offset();
        self.back.stroke_path(
            path,
            paint,
            stroke,
            transform.post_translate(x as f32, y as f32),
            None,
        );
    }
}

fn straight_rgba(source: &Pixmap, x: u32, y: u32) -> [u8; 4] {
    source.pixel(x, y).map_or([0; 4], |pixel| {
        let pixel = pixel.demultiply();
        [pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()]
    })
}

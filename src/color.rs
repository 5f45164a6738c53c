use approx::relative_eq;
use image::Rgba;
use palette::{rgb::Srgba, Component, Mix, Srgb};
#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// A RGBA color with f32 components in the sRGB color space.
#[derive(Default, Clone, Debug, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl<U: Component> From<Srgba<U>> for Color {
    fn from(color: Srgba<U>) -> Self {
        let color = color.into_format::<_, f32>();
        Self::new(
            color.color.red,
            color.color.green,
            color.color.blue,
            color.alpha,
        )
    }
}

impl<U: Component> From<Srgb<U>> for Color {
    fn from(color: Srgb<U>) -> Self {
        let color = color.into_format::<f32>();
        Self::new(color.red, color.green, color.blue, 1.)
    }
}

impl From<Color> for Srgba {
    fn from(color: Color) -> Self {
        Self::new(color.r, color.g, color.b, color.a)
    }
}

impl From<Rgba<u8>> for Color {
    fn from(pixel: Rgba<u8>) -> Self {
        let [r, g, b, a] = pixel.0;
        Srgba::<u8>::new(r, g, b, a).into()
    }
}

impl From<Color> for Rgba<u8> {
    fn from(color: Color) -> Self {
        Self(color.rgba8())
    }
}

impl From<Color> for tiny_skia::Color {
    fn from(color: Color) -> Self {
        let [r, g, b, a] = color.rgba8();
        Self::from_rgba8(r, g, b, a)
    }
}

impl From<tiny_skia::ColorU8> for Color {
    fn from(pixel: tiny_skia::ColorU8) -> Self {
        Self::from_rgba8(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha())
    }
}

impl Color {
    /// Returns a color from its red, green, blue and alpha components, each
    /// ranging from 0.0 to 1.0.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Returns a color from 8-bit components.
    #[must_use]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from(Rgba([r, g, b, a]))
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> f32 {
        self.r
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> f32 {
        self.g
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> f32 {
        self.b
    }

    /// Returns the alpha component.
    #[must_use]
    pub const fn alpha(&self) -> f32 {
        self.a
    }

    /// Returns the color as an f32 array.
    #[must_use]
    pub const fn rgba(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Returns the color quantized to 8-bit components.
    #[must_use]
    pub fn rgba8(&self) -> [u8; 4] {
        let quantize = |component: f32| (component.max(0.).min(1.) * 255.).round() as u8;
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }

    /// Returns if the color has a non-zero alpha value.
    #[must_use]
    pub fn visible(&self) -> bool {
        !relative_eq!(self.a, 0.)
    }

    /// Returns a new color using red, green, and blue from `self` and the
    /// parameter `alpha`.
    #[must_use]
    pub const fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Mixes `other` over `self` by `factor` in linear light.
    #[must_use]
    pub fn mix(self, other: Self, factor: f32) -> Self {
        let below: Srgba = self.into();
        let above: Srgba = other.into();
        Srgba::from_linear(below.into_linear().mix(&above.into_linear(), factor)).into()
    }
}

/// Equivalent to the [CSS color keywords](https://developer.mozilla.org/en-US/docs/Web/CSS/color_value) of the same name.
impl Color {
    /// Opaque black, `#000000`.
    pub const BLACK: Self = Self::new(0., 0., 0., 1.);
    /// Opaque blue, `#0000FF`.
    pub const BLUE: Self = Self::new(0., 0., 1., 1.);
    /// Opaque cyan, `#00FFFF`.
    pub const CYAN: Self = Self::new(0., 1., 1., 1.);
    /// Opaque gray, `#808080`.
    pub const GRAY: Self = Self::new(128. / 255., 128. / 255., 128. / 255., 1.);
    /// Opaque green, `#008000`. Full-intensity green is [`Color::LIME`].
    pub const GREEN: Self = Self::new(0., 128. / 255., 0., 1.);
    /// Opaque lime, `#00FF00`.
    pub const LIME: Self = Self::new(0., 1., 0., 1.);
    /// Opaque magenta, `#FF00FF`.
    pub const MAGENTA: Self = Self::new(1., 0., 1., 1.);
    /// Opaque red, `#FF0000`.
    pub const RED: Self = Self::new(1., 0., 0., 1.);
    /// Opaque white, `#FFFFFF`.
    pub const WHITE: Self = Self::new(1., 1., 1., 1.);
    /// Opaque yellow, `#FFFF00`.
    pub const YELLOW: Self = Self::new(1., 1., 0., 1.);

    /// A fully transparent black.
    pub const CLEAR_BLACK: Self = Self::new(0., 0., 0., 0.);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rgba8_round_trip() {
        assert_eq!(Color::RED.rgba8(), [255, 0, 0, 255]);
        assert_eq!(Color::LIME.rgba8(), [0, 255, 0, 255]);
        assert_eq!(Color::GRAY.rgba8(), [128, 128, 128, 255]);
        assert_eq!(Color::from_rgba8(12, 34, 56, 78).rgba8(), [12, 34, 56, 78]);
        assert_eq!(Rgba::<u8>::from(Color::BLUE), Rgba([0, 0, 255, 255]));
        assert_eq!(
            tiny_skia::Color::from(Color::YELLOW).to_color_u8(),
            tiny_skia::ColorU8::from_rgba(255, 255, 0, 255)
        );
        assert_eq!(
            Color::from(tiny_skia::ColorU8::from_rgba(128, 128, 128, 255)).rgba8(),
            Color::GRAY.rgba8()
        );
    }

    #[test]
    fn out_of_range_components_clamp() {
        let [red, green, _, alpha] = Color::new(2., -1., 0.5, 1.5).rgba8();
        assert_eq!((red, green, alpha), (255, 0, 255));
    }

    #[test]
    fn mix_endpoints() {
        let mixed = Color::WHITE.mix(Color::BLACK, 0.);
        assert_relative_eq!(mixed.red(), 1., epsilon = 0.0001);
        let mixed = Color::WHITE.mix(Color::BLACK, 1.);
        assert_relative_eq!(mixed.red(), 0., epsilon = 0.0001);
        let halfway = Color::WHITE.mix(Color::BLACK, 0.5);
        assert!(halfway.red() > 0.5, "linear mixing is brighter in sRGB");
        assert!(!Color::CLEAR_BLACK.visible());
        assert!(Color::RED.visible());
    }
}

use lyon_tessellation::FillOptions;
pub use lyon_tessellation::FillRule;

use crate::color::Color;

/// Shape fill options.
#[derive(Clone, Debug)]
pub struct Fill {
    /// The color to fill.
    pub color: Color,
    /// The fill rule and flattening tolerance to use while filling.
    pub options: FillOptions,
}

impl Default for Fill {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}

impl Fill {
    /// Returns a solid fill of `color` with default options.
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            options: FillOptions::default(),
        }
    }

    /// Sets the fill rule.
    #[must_use]
    pub fn with_fill_rule(mut self, fill_rule: FillRule) -> Self {
        self.options.fill_rule = fill_rule;
        self
    }
}

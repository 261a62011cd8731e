// src/config.rs
//! Generation defaults: page geometry and synthesis metrics.

use crate::backend::{Orientation, Unit};
use crate::model::{Padding, Size};

/// Geometry and typography defaults for one generation pipeline.
///
/// All lengths are in the configured [`Unit`] (millimeters by default),
/// except font sizes which are always in points.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub page_size: Size,
    pub margins: Padding,
    pub orientation: Orientation,
    pub unit: Unit,
    /// Height of one synthesized text line, in document units.
    pub line_height: f32,
    /// Body font size in points.
    pub font_size: f32,
    /// Document title font size in points.
    pub title_font_size: f32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            page_size: Size::a4(),
            margins: Padding::uniform(20.0),
            orientation: Orientation::Portrait,
            unit: Unit::Mm,
            line_height: 8.0,
            font_size: 12.0,
            title_font_size: 24.0,
        }
    }
}

impl GeneratorConfig {
    /// Width of the printable area between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.page_size.width - self.margins.left - self.margins.right
    }

    /// Height of the printable area between the top and bottom margins.
    pub fn page_body_height(&self) -> f32 {
        self.page_size.height - self.margins.top - self.margins.bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_a4_with_uniform_margins() {
        let config = GeneratorConfig::default();
        assert_eq!(config.page_size, Size::a4());
        assert_eq!(config.content_width(), 170.0);
        assert_eq!(config.page_body_height(), 257.0);
    }
}

//! Pixel rectangles inside the marker texture atlas and their texture-space equivalents.

use std::{fmt::Display, str::FromStr};

use nalgebra::Vector2;

use crate::parse::{components, ParseError};

/// Pixel-space rectangle, edges measured from the top-left corner of the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectOffset {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

/// Texture-space rectangle with the origin in the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectOffset {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn size(&self) -> Vector2<f32> {
        //! pixel width and height. Inverted edges give a zero size rather than wrapping.
        Vector2::new(
            lossy_f32(self.right.saturating_sub(self.left)),
            lossy_f32(self.bottom.saturating_sub(self.top)),
        )
    }

    pub fn tex_coords(&self, atlas_width: u32, atlas_height: u32) -> UvRect {
        //! converts to texture coordinates for an atlas of the given pixel size.
        let sx = 1.0 / lossy_f32(atlas_width);
        let sy = 1.0 / lossy_f32(atlas_height);
        let size = self.size();
        UvRect {
            x: lossy_f32(self.left) * sx,
            y: 1.0 - lossy_f32(self.bottom) * sy,
            width: size.x * sx,
            height: size.y * sy,
        }
    }
}

fn lossy_f32(px: u32) -> f32 {
    px as f32 // (MR A.2a) atlas dimensions are far below 2^24, where u32 -> f32 is exact.
}

impl FromStr for RectOffset {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        //! parses "left,right,top,bottom".
        let values = components(s)
            .map(str::parse::<u32>)
            .collect::<Result<Vec<_>, _>>()?;
        match values.as_slice() {
            &[left, right, top, bottom] => Ok(Self::new(left, right, top, bottom)),
            _ => Err(ParseError::ComponentCount {
                expected: "4",
                found: values.len(),
                input: s.to_owned(),
            }),
        }
    }
}

impl Display for RectOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{},{}", self.left, self.right, self.top, self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn parses_with_whitespace() {
        assert_eq!(
            "0, 64 ,64,128".parse::<RectOffset>(),
            Ok(RectOffset::new(0, 64, 64, 128))
        );
    }

    #[test]
    fn rejects_wrong_count_and_garbage() {
        assert!(matches!(
            "1,2,3".parse::<RectOffset>(),
            Err(ParseError::ComponentCount { found: 3, .. })
        ));
        assert!(matches!(
            "1,2,x,4".parse::<RectOffset>(),
            Err(ParseError::Int(_))
        ));
        assert!(matches!(
            "1,2,-3,4".parse::<RectOffset>(),
            Err(ParseError::Int(_))
        ));
    }

    #[test]
    fn display_matches_the_parsed_form() {
        let rect = RectOffset::new(412, 508, 28, 124);
        assert_eq!(rect.to_string(), "412,508,28,124");
    }

    #[test]
    fn tex_coords_flip_the_vertical_axis() {
        // heading marker in a 512x128 atlas.
        let uv = RectOffset::new(0, 64, 64, 128).tex_coords(512, 128);
        assert_relative_eq!(uv.x, 0.0);
        assert_relative_eq!(uv.y, 0.0);
        assert_relative_eq!(uv.width, 0.125);
        assert_relative_eq!(uv.height, 0.5);

        // horizon strip near the top.
        let uv = RectOffset::new(0, 512, 12, 20).tex_coords(512, 128);
        assert_relative_eq!(uv.y, 1.0 - 20.0 / 128.0);
        assert_relative_eq!(uv.height, 8.0 / 128.0);
    }

    #[test]
    fn inverted_rect_has_zero_size() {
        assert_eq!(RectOffset::new(10, 5, 8, 2).size(), Vector2::zeros());
    }
}

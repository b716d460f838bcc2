//! RGBA colours as they appear in the settings files: "r,g,b" or "r,g,b,a" with components in 0..=1.

use std::{fmt::Display, str::FromStr};

use crate::parse::{components, ParseError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha_scaled(self, factor: f32) -> Self {
        //! multiplies the alpha channel, leaving the colour untouched.
        Self {
            a: self.a * factor,
            ..self
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::GREEN
    }
}

impl FromStr for Rgba {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = components(s)
            .map(str::parse::<f32>)
            .collect::<Result<Vec<_>, _>>()?;
        match values.as_slice() {
            &[r, g, b] => Ok(Self::new(r, g, b, 1.0)),
            &[r, g, b, a] => Ok(Self::new(r, g, b, a)),
            _ => Err(ParseError::ComponentCount {
                expected: "3 or 4",
                found: values.len(),
                input: s.to_owned(),
            }),
        }
    }
}

impl Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{},{}", self.r, self.g, self.b, self.a)
    }
}

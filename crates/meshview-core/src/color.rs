//! CSS colors for node fills, strokes and text.
//!
//! [`Color`] wraps `DynamicColor` from the color crate. Its `Display` output is
//! a CSS color string that can go straight into SVG `fill` and `stroke`
//! attributes.

use std::str::FromStr;

use color::DynamicColor;

/// A parsed CSS color.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS color string such as `"#ff0000"`, `"rgb(255, 0, 0)"` or
    /// `"darkblue"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use meshview_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates an opaque color from 8-bit sRGB components.
    ///
    /// # Examples
    ///
    /// ```
    /// use meshview_core::color::Color;
    ///
    /// let tomato = Color::rgb(255, 99, 71);
    /// assert_eq!(tomato.alpha(), 1.0);
    /// ```
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(&format!("rgb({red}, {green}, {blue})"))
            .expect("8-bit rgb components always form a valid CSS color")
    }

    /// Creates a color from 8-bit sRGB components and an 8-bit alpha channel.
    ///
    /// The alpha channel is mapped from `0..=255` onto `0.0..=1.0`.
    pub fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self::rgb(red, green, blue).with_alpha(f32::from(alpha) / 255.0)
    }

    /// Same color with alpha replaced, `0.0` transparent to `1.0` opaque.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_color_new() {
        let red = Color::new("#ff0000");
        assert!(red.is_ok());

        let invalid = Color::new("not-a-color");
        assert!(invalid.is_err());
    }

    #[test]
    fn test_color_default() {
        let color = Color::default();
        assert_eq!(color.to_string(), "black");
    }

    #[test]
    fn test_color_rgb_is_opaque() {
        let gold = Color::rgb(255, 215, 0);
        assert_approx_eq!(f32, gold.alpha(), 1.0);
        assert_eq!(gold, Color::rgb(255, 215, 0));
        assert_ne!(gold, Color::rgb(255, 99, 71));
    }

    #[test]
    fn test_color_rgba_maps_alpha() {
        let legend = Color::rgba(240, 240, 240, 220);
        assert_approx_eq!(f32, legend.alpha(), 220.0 / 255.0, epsilon = 0.001);

        let clear = Color::rgba(0, 0, 0, 0);
        assert_approx_eq!(f32, clear.alpha(), 0.0);
    }

    #[test]
    fn test_color_with_alpha() {
        let busy = Color::new("crimson").unwrap().with_alpha(0.5);
        assert_approx_eq!(f32, busy.alpha(), 0.5, epsilon = 0.001);
        assert_eq!(busy, Color::new("crimson").unwrap().with_alpha(0.5));
    }
}

//! Configuration types for Meshview rendering.
//!
//! All types implement [`serde::Deserialize`] and every field is optional:
//! a missing section or key falls back to its default.
//!
//! - [`AppConfig`] - Top-level configuration root.
//! - [`WindowConfig`] - Title and logical size of the output document.
//! - [`ViewConfig`] - Margin and extra zoom applied when fitting the view.
//! - [`StyleConfig`] - Visual styling such as the background color.
//!
//! # Example
//!
//! ```
//! # use meshview::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.window().width(), 1200.0);
//! assert_eq!(config.view().zoom(), 1.0);
//! assert!(config.style().background_color().unwrap().is_none());
//! ```

use serde::Deserialize;

use meshview_core::color::Color;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    window: WindowConfig,

    #[serde(default)]
    view: ViewConfig,

    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(window: WindowConfig, view: ViewConfig, style: StyleConfig) -> Self {
        Self {
            window,
            view,
            style,
        }
    }

    pub fn window(&self) -> &WindowConfig {
        &self.window
    }

    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Title and logical size of the rendered document.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    title: String,
    width: f32,
    height: f32,
}

impl WindowConfig {
    pub fn new(title: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Optimized Bus Topology Visualization".to_string(),
            width: 1200.0,
            height: 900.0,
        }
    }
}

/// Controls how the content is fitted into the window.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Space kept between the content and the window border, in content units.
    margin: f32,
    /// Extra scale applied around the center after fitting.
    zoom: f32,
}

impl ViewConfig {
    pub fn new(margin: f32, zoom: f32) -> Self {
        Self { margin, zoom }
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            margin: 20.0,
            zoom: 1.0,
        }
    }
}

/// Visual styling configuration for rendered diagrams.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] for the whole document, as a color string.
    #[serde(default)]
    background_color: Option<String>,
}

impl StyleConfig {
    pub fn new(background_color: Option<String>) -> Self {
        Self { background_color }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.window().title(), "Optimized Bus Topology Visualization");
        assert_eq!(config.window().height(), 900.0);
        assert_eq!(config.view().margin(), 20.0);
    }

    #[test]
    fn test_invalid_background_color() {
        let style = StyleConfig::new(Some("not-a-color".to_string()));
        assert!(style.background_color().is_err());
    }

    #[test]
    fn test_valid_background_color() {
        let style = StyleConfig::new(Some("white".to_string()));
        assert_eq!(style.background_color().unwrap(), Some(Color::new("white").unwrap()));
    }
}

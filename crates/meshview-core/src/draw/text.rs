//! Text styling, measurement and rendering.
//!
//! - [`TextDefinition`] - Reusable text style (font, size, weight, color, anchor)
//! - [`Text`] - A renderable text element combining [`RichText`] content with a
//!   [`TextDefinition`]
//!
//! Text is measured with cosmic-text so that annotation bounds can be computed
//! analytically before the view is fitted.
//!
//! ```
//! # use meshview_core::draw::{Text, TextAnchor, TextDefinition};
//! let mut style = TextDefinition::new();
//! style.set_font_size(8);
//! style.set_anchor(TextAnchor::TopLeft);
//!
//! let text = Text::new(&style, "Instructions: 31189\nCycles: 85339");
//! assert_eq!(text.content().line_count(), 2);
//! assert!(text.calculate_size().height() > 0.0);
//! ```

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Weight};
use log::info;
use svg::{self, node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, LayeredOutput, RenderLayer, RichText},
    geometry::{Bounds, Insets, Point, Size},
};

/// Point-to-pixel factor used for measurement.
const PX_PER_PT: f32 = 1.33;

/// Line height relative to the pixel font size.
const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// Where the render position sits relative to the text box.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// Position is the top-left corner of the padded text box.
    #[default]
    TopLeft,
    /// Position is the center of the text box.
    Center,
}

/// Visual style for text elements.
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"Arial"` |
/// | Font size | `10` |
/// | Bold | `false` |
/// | Color | `None` (SVG default, black) |
/// | Padding | 4px on all sides |
/// | Anchor | [`TextAnchor::TopLeft`] |
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    bold: bool,
    color: Option<Color>,
    padding: Insets,
    anchor: TextAnchor,
}

impl TextDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Renders every span in bold regardless of markup.
    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn set_padding(&mut self, padding: Insets) {
        self.padding = padding;
    }

    pub fn set_anchor(&mut self, anchor: TextAnchor) {
        self.anchor = anchor;
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn is_bold(&self) -> bool {
        self.bold
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn padding(&self) -> Insets {
        self.padding
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 10,
            bold: false,
            color: None,
            padding: Insets::uniform(4.0),
            anchor: TextAnchor::default(),
        }
    }
}

/// A renderable text element.
///
/// Plain content keeps its `\n` line breaks; rich content is parsed with
/// [`RichText::parse`].
#[derive(Debug, Clone)]
pub struct Text<'a> {
    definition: &'a TextDefinition,
    content: RichText,
}

impl<'a> Text<'a> {
    /// Creates a text element from plain content.
    pub fn new(definition: &'a TextDefinition, content: &str) -> Self {
        Self {
            definition,
            content: RichText::plain(content),
        }
    }

    /// Creates a text element from already parsed rich content.
    pub fn rich(definition: &'a TextDefinition, content: RichText) -> Self {
        Self {
            definition,
            content,
        }
    }

    pub fn content(&self) -> &RichText {
        &self.content
    }

    /// Total size of the text including padding.
    pub fn calculate_size(&self) -> Size {
        self.calculate_size_without_padding()
            .add_padding(self.definition.padding())
    }

    /// Bounds of the text box when rendered at `position`.
    pub fn bounds_at(&self, position: Point) -> Bounds {
        let size = self.calculate_size();
        match self.definition.anchor() {
            TextAnchor::TopLeft => Bounds::new_from_top_left(position, size),
            TextAnchor::Center => Bounds::new_from_center(position, size),
        }
    }

    fn line_height(&self) -> f32 {
        f32::from(self.definition.font_size()) * PX_PER_PT * LINE_HEIGHT_FACTOR
    }

    fn calculate_size_without_padding(&self) -> Size {
        let manager = TEXT_MANAGER.get_or_init(TextManager::new);
        let line_height = self.line_height();

        self.content
            .lines()
            .iter()
            .map(|line| {
                let bold = self.definition.is_bold() || line.iter().any(|span| span.is_bold());
                let width = manager.measure_line(&RichText::line_text(line), self.definition, bold);
                Size::new(width, line_height)
            })
            .fold(Size::default(), |acc, line| {
                Size::new(acc.width().max(line.width()), acc.height() + line.height())
            })
    }

    fn render_spans(&self, line: &[crate::draw::Span]) -> svg_element::TSpan {
        line.iter().fold(svg_element::TSpan::new(""), |tspan, span| {
            let mut run = svg_element::TSpan::new("").add(SvgText::new(span.text()));
            if span.is_bold() && !self.definition.is_bold() {
                run = run.set("font-weight", "bold");
            }
            tspan.add(run)
        })
    }
}

impl<'a> Drawable for Text<'a> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        if self.content.is_empty() {
            return output;
        }

        let padding = self.definition.padding();
        let line_height = self.line_height();

        let (x, y, text_anchor, dominant_baseline) = match self.definition.anchor() {
            TextAnchor::TopLeft => (
                position.x() + padding.left(),
                position.y() + padding.top(),
                "start",
                "hanging",
            ),
            TextAnchor::Center => {
                // First baseline sits half the block height above center.
                let total_height = line_height * self.content.line_count() as f32;
                (
                    position.x(),
                    position.y() - (total_height - line_height) / 2.0,
                    "middle",
                    "central",
                )
            }
        };

        let mut rendered_text = svg_element::Text::new("")
            .set("x", x)
            .set("y", y)
            .set("text-anchor", text_anchor)
            .set("dominant-baseline", dominant_baseline)
            .set("font-family", self.definition.font_family())
            .set("font-size", self.definition.font_size());

        if self.definition.is_bold() {
            rendered_text = rendered_text.set("font-weight", "bold");
        }

        if let Some(color) = self.definition.color() {
            rendered_text = rendered_text
                .set("fill", color.to_string())
                .set("fill-opacity", color.alpha());
        }

        for (index, line) in self.content.lines().iter().enumerate() {
            let dy = if index == 0 { 0.0 } else { line_height };
            let tspan = self.render_spans(line).set("x", x).set("dy", dy);
            rendered_text = rendered_text.add(tspan);
        }

        output.add_to_layer(RenderLayer::Text, Box::new(rendered_text));
        output
    }

    fn size(&self) -> Size {
        self.calculate_size()
    }
}

/// Owns the shared cosmic-text font system used for measurement.
struct TextManager {
    font_system: Mutex<FontSystem>,
}

impl TextManager {
    fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Measures the advance width of a single line in pixels.
    ///
    /// Falls back to an average glyph width when shaping yields no runs (no
    /// fonts installed).
    fn measure_line(&self, line: &str, text_def: &TextDefinition, bold: bool) -> f32 {
        if line.is_empty() {
            return 0.0;
        }

        let font_size_px = f32::from(text_def.font_size()) * PX_PER_PT;
        let metrics = Metrics::new(font_size_px, font_size_px * LINE_HEIGHT_FACTOR);

        let mut font_system = self.font_system.lock().expect("failed to lock FontSystem");
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let mut attrs = Attrs::new().family(Family::Name(text_def.font_family()));
        if bold {
            attrs = attrs.weight(Weight::BOLD);
        }

        buffer.set_size(None, None);
        buffer.set_text(line, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let width = buffer
            .layout_runs()
            .filter_map(|run| run.glyphs.last().map(|glyph| glyph.x + glyph.w))
            .fold(0.0f32, f32::max);

        if width > 0.0 {
            width
        } else {
            line.chars().count() as f32 * font_size_px * 0.55
        }
    }
}

static TEXT_MANAGER: OnceLock<TextManager> = OnceLock::new();

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn render(text: &Text<'_>, position: Point) -> String {
        text.render_to_layers(position)
            .render()
            .iter()
            .map(|n| n.to_string())
            .collect()
    }

    #[test]
    fn test_text_definition_defaults() {
        let def = TextDefinition::new();
        assert_eq!(def.font_family(), "Arial");
        assert_eq!(def.font_size(), 10);
        assert!(!def.is_bold());
        assert!(def.color().is_none());
        assert_eq!(def.anchor(), TextAnchor::TopLeft);
        assert_approx_eq!(f32, def.padding().top(), 4.0);
    }

    #[test]
    fn test_text_definition_setters() {
        let mut def = TextDefinition::new();
        def.set_font_family("Helvetica");
        def.set_font_size(18);
        def.set_bold(true);
        def.set_color(Some(Color::new("darkblue").unwrap()));
        def.set_anchor(TextAnchor::Center);
        def.set_padding(Insets::default());

        assert_eq!(def.font_family(), "Helvetica");
        assert_eq!(def.font_size(), 18);
        assert!(def.is_bold());
        assert!(def.color().is_some());
        assert_eq!(def.anchor(), TextAnchor::Center);
        assert_approx_eq!(f32, def.padding().left(), 0.0);
    }

    #[test]
    fn test_text_size_grows_with_lines() {
        let def = TextDefinition::new();
        let one = Text::new(&def, "L2 hit rate: 16.5%");
        let three = Text::new(&def, "a\nb\nc");

        let line_height = f32::from(def.font_size()) * PX_PER_PT * LINE_HEIGHT_FACTOR;
        assert_approx_eq!(f32, one.calculate_size().height(), line_height + 8.0, epsilon = 0.01);
        assert_approx_eq!(
            f32,
            three.calculate_size().height(),
            3.0 * line_height + 8.0,
            epsilon = 0.01
        );
        assert!(one.calculate_size().width() > 8.0);
    }

    #[test]
    fn test_empty_text_measures_only_padding() {
        let def = TextDefinition::new();
        let text = Text::new(&def, "");
        assert_eq!(text.calculate_size(), Size::new(8.0, 8.0));
        assert!(text.render_to_layers(Point::default()).is_empty());
    }

    #[test]
    fn test_bounds_follow_anchor() {
        let mut def = TextDefinition::new();
        let text = Text::new(&def, "Router0");
        let top_left = text.bounds_at(Point::new(710.0, 310.0));
        assert_approx_eq!(f32, top_left.min_x(), 710.0);
        assert_approx_eq!(f32, top_left.min_y(), 310.0);

        def.set_anchor(TextAnchor::Center);
        let text = Text::new(&def, "Router0");
        let centered = text.bounds_at(Point::new(710.0, 310.0));
        assert_approx_eq!(f32, centered.center().x(), 710.0, epsilon = 0.01);
        assert_approx_eq!(f32, centered.center().y(), 310.0, epsilon = 0.01);
    }

    #[test]
    fn test_render_top_left_applies_padding_and_style() {
        let mut def = TextDefinition::new();
        def.set_color(Some(Color::new("darkblue").unwrap()));
        let text = Text::new(&def, "Port1: L3Cache0");

        let svg = render(&text, Point::new(830.0, 310.0));
        assert!(svg.contains("data-layer=\"text\""));
        assert!(svg.contains("x=\"834\""));
        assert!(svg.contains("y=\"314\""));
        assert!(svg.contains("text-anchor=\"start\""));
        assert!(svg.contains("Port1: L3Cache0"));
        assert!(svg.contains("fill=\"darkblue\""));
    }

    #[test]
    fn test_render_rich_bold_spans() {
        let def = TextDefinition::new();
        let text = Text::rich(&def, RichText::parse("<b>CPU0 details:</b><br>• Frequency: 2.5GHz"));

        let svg = render(&text, Point::default());
        assert!(svg.contains("font-weight=\"bold\""));
        assert!(svg.contains("CPU0 details:"));
        assert!(svg.contains("• Frequency: 2.5GHz"));
    }
}

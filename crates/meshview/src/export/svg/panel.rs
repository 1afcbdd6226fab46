use svg::node::element as svg_element;

use meshview_core::{
    color::Color,
    draw::{Drawable, Text, TextAnchor, TextDefinition},
    geometry::{Bounds, Insets, Point, Size},
};

use crate::panel::{DetailPanel, MIN_PANEL_SIZE};

const PANEL_PADDING: f32 = 16.0;
const TITLE_GAP: f32 = 8.0;
const CLOSE_INSET: f32 = 14.0;

fn title_definition() -> TextDefinition {
    let mut definition = TextDefinition::new();
    definition.set_font_size(12);
    definition.set_bold(true);
    definition.set_padding(Insets::uniform(0.0));
    definition
}

fn body_definition() -> TextDefinition {
    let mut definition = TextDefinition::new();
    definition.set_padding(Insets::uniform(0.0));
    definition
}

/// Renders `panel` as a hidden group centered in `window`.
pub(super) fn render_panel(panel: &DetailPanel, window: Size) -> svg_element::Group {
    let title_def = title_definition();
    let body_def = body_definition();
    let title = Text::new(&title_def, panel.title());
    let body = Text::rich(&body_def, panel.body().clone());

    let title_size = title.calculate_size();
    let body_size = body.calculate_size();
    let content = Size::new(
        title_size.width().max(body_size.width()),
        title_size.height() + TITLE_GAP + body_size.height(),
    );
    let size = content
        .add_padding(Insets::uniform(PANEL_PADDING))
        .max(MIN_PANEL_SIZE);
    let frame = Bounds::new_from_center(Point::new(window.width() / 2.0, window.height() / 2.0), size);

    let title_origin = Point::new(frame.min_x() + PANEL_PADDING, frame.min_y() + PANEL_PADDING);
    let body_origin = title_origin.add_point(Point::new(0.0, title_size.height() + TITLE_GAP));

    let background = svg_element::Rectangle::new()
        .set("x", frame.min_x())
        .set("y", frame.min_y())
        .set("width", frame.width())
        .set("height", frame.height())
        .set("fill", Color::rgb(255, 255, 255).to_string())
        .set("stroke", Color::rgb(128, 128, 128).to_string())
        .set("stroke-width", 1);

    let mut group = svg_element::Group::new()
        .set("id", super::panel_anchor(&panel.node()))
        .set("class", "detail-panel")
        .add(svg_element::Title::new(panel.title()))
        .add(background);

    for node in title
        .render_to_layers(title_origin)
        .render()
        .into_iter()
        .chain(body.render_to_layers(body_origin).render())
    {
        group = group.add(node);
    }

    group.add(render_close_link(frame))
}

fn render_close_link(frame: Bounds) -> svg_element::Anchor {
    let mut definition = TextDefinition::new();
    definition.set_font_size(14);
    definition.set_anchor(TextAnchor::Center);
    let position = Point::new(frame.max_x() - CLOSE_INSET, frame.min_y() + CLOSE_INSET);

    Text::new(&definition, "×")
        .render_to_layers(position)
        .render()
        .into_iter()
        .fold(
            svg_element::Anchor::new()
                .set("href", "#")
                .set("class", "panel-close"),
            |link, node| link.add(node),
        )
}

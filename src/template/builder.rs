use kurbo::{Point, Rect};

use crate::{
    config::model::{AccentColors, PageConfig},
    foundation::color::Color,
    template::tree::{
        CANVAS_H, CANVAS_W, GradientStop, LinearGradient, Node, Paint, ShadowStyle, StrokeStyle,
        TextAnchor, TextNode, VisualTree,
    },
};

/// Inner content card width.
pub const CARD_W: f64 = 1100.0;
/// Inner content card height.
pub const CARD_H: f64 = 550.0;

/// Wrap column width for the description text.
const DESCRIPTION_COLUMN_W: f64 = 900.0;

const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
const NAVY_DARK: Color = Color::rgb(0x0f, 0x17, 0x2a);
const NAVY_MID: Color = Color::rgb(0x1e, 0x29, 0x3b);
const BLUE_DEEP: Color = Color::rgb(0x1e, 0x3a, 0x8a);

/// Card rectangle, centered on the canvas.
fn card_rect() -> Rect {
    let x = (f64::from(CANVAS_W) - CARD_W) / 2.0;
    let y = (f64::from(CANVAS_H) - CARD_H) / 2.0;
    Rect::new(x, y, x + CARD_W, y + CARD_H)
}

/// Build the declarative visual tree for one page.
///
/// The stack is structurally identical for every page and differs only in the
/// substituted values, bottom to top:
///
/// 1. background photo (cover semantics over the full canvas)
/// 2. diagonal dark gradient overlay for text contrast
/// 3. translucent glass card, rounded, bordered, shadowed
/// 4. glossy highlight over the top half of the card
/// 5. content column: badge pill, title, subtitle, divider, description
///
/// This function performs no IO and is fully deterministic: identical
/// `(page, background, accents)` inputs always yield an identical tree.
pub fn build_page_template(
    page: &PageConfig,
    background_data_uri: &str,
    accents: &AccentColors,
) -> VisualTree {
    VisualTree {
        layers: vec![
            background_layer(background_data_uri),
            overlay_layer(),
            card_layer(),
            gloss_layer(),
            content_layer(page, accents),
        ],
    }
}

fn background_layer(data_uri: &str) -> Node {
    Node::Image {
        href: data_uri.to_string(),
        rect: Rect::new(0.0, 0.0, f64::from(CANVAS_W), f64::from(CANVAS_H)),
    }
}

fn overlay_layer() -> Node {
    Node::Rect {
        rect: Rect::new(0.0, 0.0, f64::from(CANVAS_W), f64::from(CANVAS_H)),
        radius: 0.0,
        fill: Paint::Linear(LinearGradient {
            from: Point::new(0.0, 0.0),
            to: Point::new(1.0, 1.0),
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: NAVY_DARK,
                    opacity: 0.88,
                },
                GradientStop {
                    offset: 0.5,
                    color: NAVY_MID,
                    opacity: 0.78,
                },
                GradientStop {
                    offset: 1.0,
                    color: BLUE_DEEP,
                    opacity: 0.68,
                },
            ],
        }),
        stroke: None,
        shadow: None,
    }
}

fn card_layer() -> Node {
    Node::Rect {
        rect: card_rect(),
        radius: 24.0,
        fill: Paint::Linear(LinearGradient {
            from: Point::new(0.0, 0.0),
            to: Point::new(1.0, 1.0),
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: WHITE,
                    opacity: 0.10,
                },
                GradientStop {
                    offset: 1.0,
                    color: WHITE,
                    opacity: 0.04,
                },
            ],
        }),
        stroke: Some(StrokeStyle {
            color: WHITE,
            opacity: 0.18,
            width: 1.0,
        }),
        shadow: Some(ShadowStyle {
            dx: 0.0,
            dy: 18.0,
            blur: 36.0,
            color: Color::rgb(0, 0, 0),
            opacity: 0.35,
        }),
    }
}

fn gloss_layer() -> Node {
    let card = card_rect();
    Node::Rect {
        rect: Rect::new(card.x0, card.y0, card.x1, card.y0 + CARD_H / 2.0),
        radius: 24.0,
        fill: Paint::Linear(LinearGradient {
            from: Point::new(0.0, 0.0),
            to: Point::new(0.0, 1.0),
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: WHITE,
                    opacity: 0.12,
                },
                GradientStop {
                    offset: 1.0,
                    color: WHITE,
                    opacity: 0.0,
                },
            ],
        }),
        stroke: None,
        shadow: None,
    }
}

fn content_layer(page: &PageConfig, accents: &AccentColors) -> Node {
    let card = card_rect();
    let center_x = f64::from(CANVAS_W) / 2.0;
    let mut children = Vec::new();

    children.extend(badge_pill(&page.badge, card, center_x));

    // Title / subtitle sit just above the vertical center of the card.
    children.push(Node::Text(TextNode {
        content: page.title.clone(),
        origin: Point::new(center_x, card.y0 + 270.0),
        size: 56.0,
        weight: 700,
        fill: WHITE,
        opacity: 1.0,
        anchor: TextAnchor::Middle,
    }));
    children.push(Node::Text(TextNode {
        content: page.subtitle.clone(),
        origin: Point::new(center_x, card.y0 + 322.0),
        size: 28.0,
        weight: 500,
        fill: WHITE,
        opacity: 0.85,
        anchor: TextAnchor::Middle,
    }));

    children.push(divider_bar(accents, card, center_x));
    children.push(description_column(&page.description, card, center_x));

    Node::Group { children }
}

fn badge_pill(badge: &str, card: Rect, center_x: f64) -> Vec<Node> {
    let size = 15.0;
    // The pill hugs the text; estimated width keeps construction pure.
    let text_w = estimate_text_width(badge, size);
    let pill_w = text_w + 48.0;
    let pill_h = 36.0;
    let pill_y = card.y0 + 56.0;

    vec![
        Node::Rect {
            rect: Rect::new(
                center_x - pill_w / 2.0,
                pill_y,
                center_x + pill_w / 2.0,
                pill_y + pill_h,
            ),
            radius: pill_h / 2.0,
            fill: Paint::Solid {
                color: WHITE,
                opacity: 0.10,
            },
            stroke: Some(StrokeStyle {
                color: WHITE,
                opacity: 0.22,
                width: 1.0,
            }),
            shadow: None,
        },
        Node::Text(TextNode {
            content: badge.to_string(),
            origin: Point::new(center_x, pill_y + 24.0),
            size,
            weight: 500,
            fill: WHITE,
            opacity: 0.9,
            anchor: TextAnchor::Middle,
        }),
    ]
}

fn divider_bar(accents: &AccentColors, card: Rect, center_x: f64) -> Node {
    let w = 120.0;
    let h = 3.0;
    let y = card.y0 + 352.0;
    Node::Rect {
        rect: Rect::new(center_x - w / 2.0, y, center_x + w / 2.0, y + h),
        radius: h / 2.0,
        fill: Paint::Linear(LinearGradient {
            from: Point::new(0.0, 0.5),
            to: Point::new(1.0, 0.5),
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: accents.start,
                    opacity: 1.0,
                },
                GradientStop {
                    offset: 0.5,
                    color: accents.middle,
                    opacity: 1.0,
                },
                GradientStop {
                    offset: 1.0,
                    color: accents.end,
                    opacity: 1.0,
                },
            ],
        }),
        stroke: None,
        shadow: None,
    }
}

fn description_column(description: &str, card: Rect, center_x: f64) -> Node {
    let size = 20.0;
    let line_height = 30.0;
    let first_line_y = card.y0 + 402.0;

    let children = wrap_text(description, DESCRIPTION_COLUMN_W, size)
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            Node::Text(TextNode {
                content: line,
                origin: Point::new(center_x, first_line_y + (i as f64) * line_height),
                size,
                weight: 400,
                fill: WHITE,
                opacity: 0.7,
                anchor: TextAnchor::Middle,
            })
        })
        .collect();

    Node::Group { children }
}

/// Estimated rendered width of `text` at `size`, using an average glyph
/// advance for the template typeface.
fn estimate_text_width(text: &str, size: f64) -> f64 {
    (text.chars().count() as f64) * size * 0.55
}

/// Greedy word wrap against a pixel column width.
///
/// SVG has no automatic line breaking, so the template commits to explicit
/// lines. Words longer than a full line are emitted on their own line rather
/// than split mid-word.
pub fn wrap_text(text: &str, max_width: f64, size: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if estimate_text_width(&candidate, size) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/template/builder.rs"]
mod tests;

use kurbo::{Point, Rect};

use crate::foundation::color::Color;

/// Output canvas width in pixels, fixed for every page.
pub const CANVAS_W: u32 = 1200;
/// Output canvas height in pixels, fixed for every page.
pub const CANVAS_H: u32 = 630;

/// An immutable, purely declarative description of one rendered page.
///
/// Trees are built fresh per page, carry no identity beyond the page they
/// describe, and are consumed once by the rasterizer. Construction is pure:
/// identical inputs always yield an identical tree.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualTree {
    /// Layer stack, bottom to top.
    pub layers: Vec<Node>,
}

impl VisualTree {
    /// Distinct font weights referenced by text nodes anywhere in the tree.
    pub fn used_weights(&self) -> std::collections::BTreeSet<u16> {
        fn walk(node: &Node, out: &mut std::collections::BTreeSet<u16>) {
            match node {
                Node::Text(t) => {
                    out.insert(t.weight);
                }
                Node::Group { children, .. } => {
                    for child in children {
                        walk(child, out);
                    }
                }
                Node::Image { .. } | Node::Rect { .. } => {}
            }
        }

        let mut out = std::collections::BTreeSet::new();
        for layer in &self.layers {
            walk(layer, &mut out);
        }
        out
    }
}

/// A single node in the visual tree: kind, style record, children.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Raster image referenced by href (data URI), drawn with cover
    /// semantics: scaled to fill the rect, overflow cropped, aspect ratio
    /// preserved.
    Image {
        /// Image source (a base64 data URI).
        href: String,
        /// Target rectangle in canvas coordinates.
        rect: Rect,
    },
    /// Filled rectangle, optionally rounded, stroked, and shadowed.
    Rect {
        /// Geometry in canvas coordinates.
        rect: Rect,
        /// Corner radius in pixels.
        radius: f64,
        /// Fill paint.
        fill: Paint,
        /// Optional border stroke.
        stroke: Option<StrokeStyle>,
        /// Optional drop shadow.
        shadow: Option<ShadowStyle>,
    },
    /// One line of text.
    Text(TextNode),
    /// Ordered children composited in sequence.
    Group {
        /// Child nodes, bottom to top.
        children: Vec<Node>,
    },
}

/// Style record for a text node.
#[derive(Clone, Debug, PartialEq)]
pub struct TextNode {
    /// Text content.
    pub content: String,
    /// Anchor point in canvas coordinates (baseline).
    pub origin: Point,
    /// Font size in pixels.
    pub size: f64,
    /// Font weight (400, 500 or 700 in the fixed template).
    pub weight: u16,
    /// Fill color.
    pub fill: Color,
    /// Fill opacity in `[0, 1]`; part of the fixed visual-importance
    /// hierarchy, not page-configurable.
    pub opacity: f32,
    /// Horizontal anchoring relative to the origin.
    pub anchor: TextAnchor,
}

/// Horizontal text anchoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    /// Origin is the left edge of the text.
    Start,
    /// Origin is the horizontal center of the text.
    Middle,
}

/// Fill paint for rectangles.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    /// Solid color with separate opacity.
    Solid {
        /// Fill color.
        color: Color,
        /// Fill opacity in `[0, 1]`.
        opacity: f32,
    },
    /// Linear gradient between two points in unit space (0..1 relative to
    /// the filled rect).
    Linear(LinearGradient),
}

/// Linear gradient style record.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    /// Gradient start in unit coordinates.
    pub from: Point,
    /// Gradient end in unit coordinates.
    pub to: Point,
    /// Ordered color stops.
    pub stops: Vec<GradientStop>,
}

/// One gradient color stop.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientStop {
    /// Offset in `[0, 1]`.
    pub offset: f32,
    /// Stop color.
    pub color: Color,
    /// Stop opacity in `[0, 1]`.
    pub opacity: f32,
}

/// Border stroke style record.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke opacity in `[0, 1]`.
    pub opacity: f32,
    /// Stroke width in pixels.
    pub width: f64,
}

/// Drop shadow style record.
#[derive(Clone, Debug, PartialEq)]
pub struct ShadowStyle {
    /// Horizontal offset in pixels.
    pub dx: f64,
    /// Vertical offset in pixels.
    pub dy: f64,
    /// Blur standard deviation in pixels.
    pub blur: f64,
    /// Shadow color.
    pub color: Color,
    /// Shadow opacity in `[0, 1]`.
    pub opacity: f32,
}

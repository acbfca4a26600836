use std::fmt::Write as _;

use crate::template::tree::{
    CANVAS_H, CANVAS_W, LinearGradient, Node, Paint, TextAnchor, VisualTree,
};

/// Single typeface family referenced by every text node in the template.
pub const FONT_FAMILY: &str = "Inter";

/// Serialize a visual tree to SVG markup.
///
/// Serialization is deterministic: gradient and filter ids are assigned in
/// traversal order, so an identical tree always yields an identical string.
pub fn tree_to_svg(tree: &VisualTree) -> String {
    let mut w = SvgWriter::default();
    for layer in &tree.layers {
        w.emit(layer);
    }

    let mut out = String::with_capacity(w.body.len() + w.defs.len() + 256);
    let _ = write!(
        out,
        "<svg width=\"{CANVAS_W}\" height=\"{CANVAS_H}\" viewBox=\"0 0 {CANVAS_W} {CANVAS_H}\" \
         xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\">"
    );
    if !w.defs.is_empty() {
        let _ = write!(out, "<defs>{}</defs>", w.defs);
    }
    out.push_str(&w.body);
    out.push_str("</svg>");
    out
}

#[derive(Default)]
struct SvgWriter {
    defs: String,
    body: String,
    gradients: usize,
    filters: usize,
}

impl SvgWriter {
    fn emit(&mut self, node: &Node) {
        match node {
            Node::Image { href, rect } => {
                let _ = write!(
                    self.body,
                    "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" \
                     preserveAspectRatio=\"xMidYMid slice\" xlink:href=\"{}\"/>",
                    rect.x0,
                    rect.y0,
                    rect.width(),
                    rect.height(),
                    href
                );
            }
            Node::Rect {
                rect,
                radius,
                fill,
                stroke,
                shadow,
            } => {
                let fill_attrs = match fill {
                    Paint::Solid { color, opacity } => {
                        format!(
                            "fill=\"{}\" fill-opacity=\"{opacity}\"",
                            color.hex_rgb()
                        )
                    }
                    Paint::Linear(gradient) => {
                        let id = self.add_gradient(gradient);
                        format!("fill=\"url(#{id})\"")
                    }
                };

                let mut extra = String::new();
                if *radius > 0.0 {
                    let _ = write!(extra, " rx=\"{radius}\"");
                }
                if let Some(s) = stroke {
                    let _ = write!(
                        extra,
                        " stroke=\"{}\" stroke-opacity=\"{}\" stroke-width=\"{}\"",
                        s.color.hex_rgb(),
                        s.opacity,
                        s.width
                    );
                }
                if let Some(s) = shadow {
                    let id = self.filters;
                    self.filters += 1;
                    let _ = write!(
                        self.defs,
                        "<filter id=\"f{id}\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\">\
                         <feDropShadow dx=\"{}\" dy=\"{}\" stdDeviation=\"{}\" \
                         flood-color=\"{}\" flood-opacity=\"{}\"/></filter>",
                        s.dx,
                        s.dy,
                        s.blur,
                        s.color.hex_rgb(),
                        s.opacity
                    );
                    let _ = write!(extra, " filter=\"url(#f{id})\"");
                }

                let _ = write!(
                    self.body,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" {fill_attrs}{extra}/>",
                    rect.x0,
                    rect.y0,
                    rect.width(),
                    rect.height()
                );
            }
            Node::Text(t) => {
                let anchor = match t.anchor {
                    TextAnchor::Start => "start",
                    TextAnchor::Middle => "middle",
                };
                let _ = write!(
                    self.body,
                    "<text x=\"{}\" y=\"{}\" font-family=\"{FONT_FAMILY}\" font-size=\"{}\" \
                     font-weight=\"{}\" fill=\"{}\" fill-opacity=\"{}\" text-anchor=\"{anchor}\">{}</text>",
                    t.origin.x,
                    t.origin.y,
                    t.size,
                    t.weight,
                    t.fill.hex_rgb(),
                    t.opacity,
                    escape_xml(&t.content)
                );
            }
            Node::Group { children } => {
                self.body.push_str("<g>");
                for child in children {
                    self.emit(child);
                }
                self.body.push_str("</g>");
            }
        }
    }

    fn add_gradient(&mut self, gradient: &LinearGradient) -> String {
        let id = format!("g{}", self.gradients);
        self.gradients += 1;

        let _ = write!(
            self.defs,
            "<linearGradient id=\"{id}\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\">",
            gradient.from.x, gradient.from.y, gradient.to.x, gradient.to.y
        );
        for stop in &gradient.stops {
            let _ = write!(
                self.defs,
                "<stop offset=\"{}\" stop-color=\"{}\" stop-opacity=\"{}\"/>",
                stop.offset,
                stop.color.hex_rgb(),
                stop.opacity
            );
        }
        self.defs.push_str("</linearGradient>");
        id
    }
}

/// Escape text content for inclusion in SVG markup.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/template/svg.rs"]
mod tests;

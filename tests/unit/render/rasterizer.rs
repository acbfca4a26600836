use std::sync::Arc;

use image::GenericImageView as _;
use kurbo::{Point, Rect};

use super::*;
use crate::assets::resolver::PLACEHOLDER_DATA_URI;
use crate::foundation::color::Color;
use crate::template::tree::{Node, Paint, TextAnchor, TextNode};

fn empty_font_set() -> FontSet {
    FontSet {
        db: Arc::new(usvg::fontdb::Database::new()),
    }
}

fn solid_rect() -> Node {
    Node::Rect {
        rect: Rect::new(0.0, 0.0, 1200.0, 630.0),
        radius: 0.0,
        fill: Paint::Solid {
            color: Color::rgb(0x0f, 0x17, 0x2a),
            opacity: 1.0,
        },
        stroke: None,
        shadow: None,
    }
}

#[test]
fn text_free_tree_rasterizes_to_exact_canvas_dimensions() {
    let rasterizer = Rasterizer::new(empty_font_set());
    let tree = VisualTree {
        layers: vec![solid_rect()],
    };

    let png = rasterizer.render(&tree).unwrap();
    let img = image::load_from_memory(&png).unwrap();
    assert_eq!(img.dimensions(), (CANVAS_W, CANVAS_H));
}

#[test]
fn embedded_data_uri_background_rasterizes() {
    let rasterizer = Rasterizer::new(empty_font_set());
    let tree = VisualTree {
        layers: vec![
            Node::Image {
                href: PLACEHOLDER_DATA_URI.to_string(),
                rect: Rect::new(0.0, 0.0, 1200.0, 630.0),
            },
            solid_rect(),
        ],
    };

    let png = rasterizer.render(&tree).unwrap();
    let img = image::load_from_memory(&png).unwrap();
    assert_eq!(img.dimensions(), (CANVAS_W, CANVAS_H));
}

#[test]
fn unsatisfiable_font_weight_fails_before_rasterization() {
    let rasterizer = Rasterizer::new(empty_font_set());
    let tree = VisualTree {
        layers: vec![Node::Text(TextNode {
            content: "Title".to_string(),
            origin: Point::new(600.0, 300.0),
            size: 56.0,
            weight: 700,
            fill: Color::rgb(255, 255, 255),
            opacity: 1.0,
            anchor: TextAnchor::Middle,
        })],
    };

    let err = rasterizer.render(&tree).unwrap_err();
    assert!(matches!(err, OgweaveError::Render(_)));
    assert!(err.to_string().contains("weight 700"));
}

#[test]
fn font_set_load_fails_fatally_on_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let resolver = AssetResolver::new(
        dir.path(),
        Box::new(crate::assets::http::ReqwestTransport::new().unwrap()),
    );

    let err = FontSet::load(&resolver, "assets/fonts").unwrap_err();
    assert!(matches!(err, OgweaveError::MissingAsset(_)));
}

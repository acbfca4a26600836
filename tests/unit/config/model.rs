use super::*;

fn page(slug: &str) -> PageConfig {
    PageConfig {
        slug: slug.to_string(),
        title: "Title".to_string(),
        subtitle: "Subtitle".to_string(),
        description: "Description".to_string(),
        badge: "Badge".to_string(),
        bg_image: None,
        accent_colors: None,
    }
}

fn config(pages: Vec<PageConfig>) -> SiteConfig {
    SiteConfig {
        pages,
        fonts_dir: default_fonts_dir(),
        default_background: default_background(),
        default_background_url: None,
        output_dir: default_output_dir(),
    }
}

#[test]
fn parses_camel_case_schema_with_defaults() {
    let json = serde_json::json!({
        "pages": [{
            "slug": "home",
            "title": "Ogweave",
            "subtitle": "Preview images",
            "description": "Build-time OG images.",
            "badge": "Docs",
            "bgImage": "assets/backgrounds/home.jpg",
            "accentColors": { "start": "#8b5cf6", "middle": "#ec4899", "end": "#f59e0b" }
        }]
    });

    let config: SiteConfig = serde_json::from_value(json).unwrap();
    assert_eq!(config.fonts_dir, "assets/fonts");
    assert_eq!(config.output_dir, "public/og");
    assert_eq!(config.default_background, "assets/backgrounds/default.jpg");

    let page = &config.pages[0];
    assert_eq!(page.bg_image.as_deref(), Some("assets/backgrounds/home.jpg"));
    assert_eq!(
        page.accent_colors.unwrap().start,
        Color::rgb(0x8b, 0x5c, 0xf6)
    );
    assert_eq!(page.output_filename(), "og-home.png");
    config.validate().unwrap();
}

#[test]
fn duplicate_slugs_are_rejected() {
    let config = config(vec![page("a"), page("b"), page("a")]);
    let err = config.validate().unwrap_err();
    assert!(matches!(err, OgweaveError::Validation(_)));
    assert!(err.to_string().contains("duplicate page slug 'a'"));
}

#[test]
fn empty_slug_is_rejected() {
    let config = config(vec![page("  ")]);
    assert!(config.validate().is_err());
}

#[test]
fn rejects_absolute_and_traversal_paths() {
    let mut bad = page("a");
    bad.bg_image = Some("/etc/passwd".to_string());
    assert!(config(vec![bad]).validate().is_err());

    let mut bad = page("a");
    bad.bg_image = Some("../outside.jpg".to_string());
    assert!(config(vec![bad]).validate().is_err());

    let mut c = config(vec![page("a")]);
    c.output_dir = "/tmp/out".to_string();
    assert!(c.validate().is_err());
}

#[test]
fn output_dir_override_is_revalidated() {
    // Mirrors the CLI flow: a config that passed validation once, then had
    // its output directory replaced, must be checked again.
    let mut c = config(vec![page("a")]);
    c.validate().unwrap();

    c.output_dir = "../outside".to_string();
    let err = c.validate().unwrap_err();
    assert!(matches!(err, OgweaveError::Validation(_)));
}

#[test]
fn missing_accents_default_to_fixed_triple() {
    let accents = AccentColors::default();
    assert_eq!(accents.start, Color::rgb(0x8b, 0x5c, 0xf6));
    assert_eq!(accents.middle, Color::rgb(0xec, 0x48, 0x99));
    assert_eq!(accents.end, Color::rgb(0xf5, 0x9e, 0x0b));
}

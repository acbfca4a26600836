use super::*;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Color = serde_json::from_value(serde_json::json!("#ff0000")).unwrap();
    assert_eq!(c, Color::rgb(255, 0, 0));

    let c: Color = serde_json::from_value(serde_json::json!("#0000ff80")).unwrap();
    assert_eq!(c, Color::rgba(0, 0, 255, 0x80));

    // Leading '#' is optional, case-insensitive.
    let c: Color = serde_json::from_value(serde_json::json!("8B5CF6")).unwrap();
    assert_eq!(c, Color::rgb(0x8b, 0x5c, 0xf6));
}

#[test]
fn rejects_malformed_hex() {
    assert!(serde_json::from_value::<Color>(serde_json::json!("#fff")).is_err());
    assert!(serde_json::from_value::<Color>(serde_json::json!("#gggggg")).is_err());
    assert!(serde_json::from_value::<Color>(serde_json::json!("")).is_err());
}

#[test]
fn serializes_back_to_hex() {
    let v = serde_json::to_value(Color::rgb(0x1e, 0x3a, 0x8a)).unwrap();
    assert_eq!(v, serde_json::json!("#1e3a8a"));

    let v = serde_json::to_value(Color::rgba(0, 0, 0, 0x40)).unwrap();
    assert_eq!(v, serde_json::json!("#00000040"));
}

#[test]
fn hex_rgb_drops_alpha() {
    assert_eq!(Color::rgba(0xff, 0x00, 0x00, 0x10).hex_rgb(), "#ff0000");
    assert!((Color::rgba(0, 0, 0, 128).alpha_f32() - 128.0 / 255.0).abs() < 1e-6);
}

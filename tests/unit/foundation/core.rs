use super::*;

#[test]
fn argb_packing_roundtrips_default_blue() {
    let c = Color::rgb(0, 116, 193);
    assert_eq!(c.to_argb_u32(), 0xFF00_74C1);
    assert_eq!(Color::from_argb_u32(0xFF00_74C1), c);
}

#[test]
fn hex_form_drops_opaque_alpha() {
    assert_eq!(Color::rgb(255, 0, 16).to_hex(), "#FF0010");
    assert_eq!(Color::argb(0x80, 0, 0, 255).to_hex(), "#800000FF");
}

#[test]
fn opacity_scales_alpha_only() {
    let c = Color::rgb(10, 20, 30).with_opacity(0.5);
    assert_eq!(c.a, 128);
    assert_eq!((c.r, c.g, c.b), (10, 20, 30));
    assert_eq!(Color::rgb(1, 2, 3).with_opacity(7.0).a, 255);
}

#[test]
fn deserializes_hex_and_packed_ints() {
    let c: Color = serde_json::from_str("\"#0074c1\"").unwrap();
    assert_eq!(c, Color::rgb(0, 116, 193));
    let c: Color = serde_json::from_str("4278219969").unwrap();
    assert_eq!(c, Color::rgb(0, 116, 193));
    assert!(serde_json::from_str::<Color>("\"#12\"").is_err());
}

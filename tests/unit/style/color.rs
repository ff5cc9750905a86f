use super::*;

fn with_palette(colors: &[&str]) -> PulseConfig {
    PulseConfig {
        palette: colors.iter().map(|s| (*s).to_owned()).collect(),
        ..PulseConfig::default()
    }
}

#[test]
fn parses_hex_rgb_and_argb() {
    assert_eq!(parse_color("#ff0000").unwrap(), Color::rgb(255, 0, 0));
    assert_eq!(
        parse_color("#800000FF").unwrap(),
        Color::argb(0x80, 0, 0, 0xFF)
    );
    assert!(parse_color("#12345").is_err());
    assert!(parse_color("#zz0000").is_err());
}

#[test]
fn parses_named_colors_case_insensitively() {
    assert_eq!(parse_color("Teal").unwrap(), Color::rgb(0, 0x80, 0x80));
    assert_eq!(parse_color(" grey ").unwrap(), Color::rgb(0x88, 0x88, 0x88));
    assert!(parse_color("octarine").is_err());
}

#[test]
fn empty_palette_uses_base_color_for_every_ring() {
    let cfg = PulseConfig::default();
    for i in 0..8 {
        assert_eq!(color_for(i, &cfg).unwrap(), cfg.color);
    }
}

#[test]
fn palette_cycles_by_ring_index() {
    let cfg = with_palette(&["#ff0000", "#00ff00", "#0000ff"]);
    let resolver = ColorResolver::new(&cfg).unwrap();
    assert!(!resolver.uses_base_color());
    assert_eq!(resolver.color_for(3), resolver.color_for(0));
    assert_eq!(resolver.color_for(4), resolver.color_for(1));
    assert_eq!(resolver.color_for(2), Color::rgb(0, 0, 255));
}

#[test]
fn malformed_palette_entry_is_a_configuration_error() {
    let cfg = with_palette(&["#ff0000", "not-a-color"]);
    let err = ColorResolver::new(&cfg).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("palette entry 1"));
}

use halo_core::{clear_color_from_css, parse_css_color, CLEAR_COLOR};

const EPS: f32 = 1e-4;

#[test]
fn rgb_and_hex_forms_parse() {
    assert_eq!(parse_css_color("rgb(255, 0, 0)"), Some([1.0, 0.0, 0.0, 1.0]));
    assert_eq!(parse_css_color("#ff0000"), Some([1.0, 0.0, 0.0, 1.0]));
    let c = parse_css_color("rgba(0, 0, 255, 0.5)").unwrap();
    assert!((c[3] - 0.5).abs() < EPS);
    assert!(parse_css_color("rgb(0 128 255 / 1)").is_some());
}

#[test]
fn white_background_clears_to_white() {
    let c = clear_color_from_css("rgb(255, 255, 255)");
    for channel in c {
        assert!((channel - 1.0).abs() < EPS);
    }
}

#[test]
fn mid_grey_is_linearised() {
    let c = clear_color_from_css("rgb(128, 128, 128)");
    assert!((c[0] - 0.2158).abs() < 1e-3);
    assert_eq!(c[3], 1.0);
}

#[test]
fn transparent_or_unknown_backgrounds_use_the_default() {
    assert_eq!(clear_color_from_css("rgba(0, 0, 0, 0)"), CLEAR_COLOR);
    assert_eq!(clear_color_from_css("transparent"), CLEAR_COLOR);
    assert_eq!(clear_color_from_css("#abc"), CLEAR_COLOR);
    assert_eq!(clear_color_from_css(""), CLEAR_COLOR);
}

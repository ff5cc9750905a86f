use super::*;

const ALL: [Curve; 4] = [
    Curve::Linear,
    Curve::Accelerate,
    Curve::Decelerate,
    Curve::AccelerateDecelerate,
];

#[test]
fn endpoints_are_stable() {
    for curve in ALL {
        assert!(curve.apply(0.0).abs() < 1e-12, "{curve:?}");
        assert!((curve.apply(1.0) - 1.0).abs() < 1e-12, "{curve:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for curve in ALL {
        let a = curve.apply(0.25);
        let b = curve.apply(0.5);
        let c = curve.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn shapes_bend_the_right_way() {
    assert!(Curve::Accelerate.apply(0.5) < 0.5);
    assert!(Curve::Decelerate.apply(0.5) > 0.5);
    assert!((Curve::AccelerateDecelerate.apply(0.5) - 0.5).abs() < 1e-12);
}

#[test]
fn raw_selectors_fall_back_to_linear() {
    for curve in ALL {
        assert_eq!(curve_for(curve.to_raw()), curve);
    }
    assert_eq!(curve_for(-1), Curve::Linear);
    assert_eq!(curve_for(42), Curve::Linear);
}

#[test]
fn deserializes_names_and_raw_values() {
    let c: Curve = serde_json::from_str("\"accelerate-decelerate\"").unwrap();
    assert_eq!(c, Curve::AccelerateDecelerate);
    let c: Curve = serde_json::from_str("2").unwrap();
    assert_eq!(c, Curve::Decelerate);
    let c: Curve = serde_json::from_str("\"bouncy\"").unwrap();
    assert_eq!(c, Curve::Linear);
    assert_eq!(
        serde_json::to_string(&Curve::AccelerateDecelerate).unwrap(),
        "\"accelerate_decelerate\""
    );
}

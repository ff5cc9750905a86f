use super::*;

fn anim(repeat: Repeat, repeat_mode: RepeatMode) -> PropertyAnimation {
    PropertyAnimation {
        property: RingProperty::Alpha,
        from: 1.0,
        to: 0.0,
        timing: TrackTiming {
            delay_ms: 100,
            duration_ms: 1000,
            repeat,
            repeat_mode,
        },
    }
}

#[test]
fn zero_repeat_count_means_infinite() {
    assert_eq!(Repeat::from_count(0), Repeat::Infinite);
    assert_eq!(Repeat::from_count(3), Repeat::Times(3));
}

#[test]
fn pending_until_delay_elapses() {
    let a = anim(Repeat::Infinite, RepeatMode::Restart);
    assert_eq!(a.sample(0, Curve::Linear), TrackSample::Pending);
    assert_eq!(a.sample(99, Curve::Linear), TrackSample::Pending);
    assert_eq!(a.sample(100, Curve::Linear), TrackSample::Active(1.0));
    assert_eq!(a.sample(600, Curve::Linear), TrackSample::Active(0.5));
}

#[test]
fn restart_wraps_each_pass() {
    let a = anim(Repeat::Infinite, RepeatMode::Restart);
    assert_eq!(a.sample(1100, Curve::Linear), TrackSample::Active(1.0));
    assert_eq!(a.sample(1350, Curve::Linear), TrackSample::Active(0.75));
}

#[test]
fn reverse_plays_odd_passes_backwards() {
    let a = anim(Repeat::Infinite, RepeatMode::Reverse);
    assert_eq!(a.sample(1350, Curve::Linear), TrackSample::Active(0.25));
    assert_eq!(a.sample(2350, Curve::Linear), TrackSample::Active(0.75));
}

#[test]
fn finite_tracks_finish_on_end_value() {
    let a = anim(Repeat::Times(1), RepeatMode::Restart);
    assert_eq!(a.timing.total_ms(), Some(2100));
    assert_eq!(a.sample(2100, Curve::Linear), TrackSample::Finished(0.0));

    let r = anim(Repeat::Times(1), RepeatMode::Reverse);
    assert_eq!(r.end_value(), 1.0);
    assert_eq!(r.sample(5000, Curve::Linear), TrackSample::Finished(1.0));
}

#[test]
fn zero_duration_finishes_immediately() {
    let mut a = anim(Repeat::Infinite, RepeatMode::Restart);
    a.timing.duration_ms = 0;
    assert_eq!(a.timing.total_ms(), Some(100));
    assert_eq!(a.sample(100, Curve::Linear), TrackSample::Finished(0.0));
}

#[test]
fn repeat_mode_selectors_fall_back_to_restart() {
    assert_eq!(RepeatMode::from_raw(1), RepeatMode::Restart);
    assert_eq!(RepeatMode::from_raw(2), RepeatMode::Reverse);
    assert_eq!(RepeatMode::from_raw(9), RepeatMode::Restart);
    let m: RepeatMode = serde_json::from_str("\"REVERSE\"").unwrap();
    assert_eq!(m, RepeatMode::Reverse);
}

#[test]
fn ring_props_set_addresses_one_property() {
    let mut p = RingProps::new(0.5, 1.0);
    p.set(RingProperty::ScaleY, 2.0);
    p.set(RingProperty::Alpha, 0.25);
    assert_eq!(p, RingProps { scale_x: 0.5, scale_y: 2.0, alpha: 0.25 });
}

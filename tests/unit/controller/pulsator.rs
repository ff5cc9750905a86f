use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::config::builder::PulseConfigBuilder;
use crate::foundation::core::Point;
use crate::host::manual::ManualClock;
use crate::host::recording::{RecordingContainer, RecordingSurface};

type TestController = PulseController<RecordingContainer, ManualClock>;

fn controller(cfg: PulseConfig) -> TestController {
    PulseController::new(cfg, RecordingContainer::new(), ManualClock::new()).unwrap()
}

fn cfg(count: i64, duration_ms: i64) -> PulseConfigBuilder {
    PulseConfigBuilder::new()
        .count(count)
        .unwrap()
        .duration_ms(duration_ms)
        .unwrap()
}

fn record(ctl: &mut TestController) -> Rc<RefCell<Vec<PulseEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    ctl.add_listener(move |event, _| sink.borrow_mut().push(*event));
    log
}

fn scales(ctl: &TestController) -> Vec<f64> {
    ctl.ring_views().iter().map(|v| v.props.scale_x).collect()
}

#[test]
fn new_attaches_views_in_creation_order() {
    let ctl = controller(PulseConfig::default());
    let views = ctl.ring_views();
    assert_eq!(views.len(), 4);
    assert_eq!(
        views.iter().map(|v| v.index).collect::<Vec<_>>(),
        vec![0, 1, 2, 3]
    );
    let ids: Vec<_> = views.iter().map(|v| v.id).collect();
    assert_eq!(ctl.container().children(), ids.as_slice());
    assert!(views.iter().all(|v| v.props == RingProps::new(0.0, 0.0)));
    assert_eq!(ctl.state(), PulseState::Idle);
    assert!(!ctl.is_started());
}

#[test]
fn start_is_idempotent_and_stop_on_idle_is_silent() {
    let mut ctl = controller(PulseConfig::default());
    let log = record(&mut ctl);

    ctl.stop().unwrap();
    ctl.start().unwrap();
    ctl.start().unwrap();
    assert!(ctl.is_started());
    assert_eq!(*log.borrow(), vec![PulseEvent::Started]);
}

#[test]
fn fill_rings_start_staggered() {
    let mut ctl = controller(cfg(4, 1000).build().unwrap());
    ctl.start().unwrap();
    assert_eq!(scales(&ctl), vec![0.0, 0.0, 0.0, 0.0]);
    assert_eq!(ctl.ring_views()[0].props.alpha, 1.0);
    assert_eq!(ctl.ring_views()[1].props.alpha, 0.0);

    ctl.clock_mut().advance(500);
    ctl.pump().unwrap();
    assert_eq!(scales(&ctl), vec![0.5, 0.25, 0.0, 0.0]);
}

#[test]
fn fast_forward_seeks_every_track_past_its_delay() {
    let config = cfg(4, 1000).start_from_scratch(false).build().unwrap();
    let mut ctl = controller(config);
    ctl.start().unwrap();

    assert_eq!(scales(&ctl), vec![0.0, 0.75, 0.5, 0.25]);
    assert_eq!(ctl.ring_views()[3].props.alpha, 0.75);
    for track in 0..12 {
        assert_eq!(ctl.clock().delay_ms(TrackId(track)), Some(0));
    }
}

#[test]
fn stop_forces_end_values() {
    let mut ctl = controller(cfg(2, 1000).build().unwrap());
    let log = record(&mut ctl);
    ctl.start().unwrap();
    ctl.clock_mut().advance(300);
    ctl.pump().unwrap();

    ctl.stop().unwrap();
    assert!(!ctl.is_started());
    assert!(!ctl.clock().is_running());
    for view in ctl.ring_views() {
        assert_eq!(view.props, RingProps::new(1.0, 0.0));
    }
    assert_eq!(*log.borrow(), vec![PulseEvent::Started, PulseEvent::Stopped]);
}

#[test]
fn finite_group_finishes_once() {
    let config = cfg(1, 100).repeat_count(1).unwrap().build().unwrap();
    let mut ctl = controller(config);
    let log = record(&mut ctl);
    ctl.start().unwrap();

    ctl.clock_mut().advance(150);
    ctl.pump().unwrap();
    assert!(ctl.is_started());

    ctl.clock_mut().advance(100);
    ctl.pump().unwrap();
    ctl.pump().unwrap();
    assert_eq!(ctl.state(), PulseState::Idle);
    assert_eq!(*log.borrow(), vec![PulseEvent::Started, PulseEvent::Finished]);
}

#[test]
fn empty_schedule_finishes_immediately() {
    let mut ctl = controller(cfg(0, 1000).build().unwrap());
    let log = record(&mut ctl);
    ctl.start().unwrap();
    assert!(ctl.ring_views().is_empty());
    assert_eq!(ctl.state(), PulseState::Idle);
    assert_eq!(*log.borrow(), vec![PulseEvent::Started, PulseEvent::Finished]);
}

#[test]
fn set_count_rebuilds_and_keeps_running() {
    let mut ctl = controller(PulseConfig::default());
    let log = record(&mut ctl);
    ctl.start().unwrap();
    let old: Vec<_> = ctl.ring_views().iter().map(|v| v.id).collect();

    ctl.set_count(2).unwrap();
    assert_eq!(ctl.count(), 2);
    assert_eq!(ctl.ring_views().len(), 2);
    assert_eq!(ctl.container().children().len(), 2);
    assert!(ctl.ring_views().iter().all(|v| !old.contains(&v.id)));
    assert!(ctl.is_started());
    assert!(ctl.clock().is_running());
    assert_eq!(
        *log.borrow(),
        vec![PulseEvent::Started, PulseEvent::Rebuilt { count: 2 }]
    );

    ctl.set_count(2).unwrap();
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn rebuild_keeps_idle_state() {
    let mut ctl = controller(PulseConfig::default());
    ctl.set_duration(1200).unwrap();
    assert_eq!(ctl.duration_ms(), 1200);
    assert!(!ctl.is_started());
    assert!(!ctl.clock().is_running());
}

#[test]
fn negative_values_are_rejected_without_change() {
    let mut ctl = controller(PulseConfig::default());
    let ids: Vec<_> = ctl.ring_views().iter().map(|v| v.id).collect();

    assert!(ctl.set_count(-1).unwrap_err().is_configuration());
    assert!(ctl.set_duration(-5).unwrap_err().is_configuration());
    assert_eq!(ctl.count(), 4);
    assert_eq!(ctl.duration_ms(), 7000);
    assert_eq!(
        ctl.ring_views().iter().map(|v| v.id).collect::<Vec<_>>(),
        ids
    );
}

#[test]
fn bad_palette_leaves_schedule_intact() {
    let mut ctl = controller(PulseConfig::default());
    let log = record(&mut ctl);
    ctl.start().unwrap();
    let before = ctl.schedule().cloned();

    let err = ctl
        .set_palette(vec!["#FF0000".into(), "not-a-color".into()])
        .unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(ctl.schedule().cloned(), before);
    assert!(ctl.config().palette.is_empty());
    assert!(ctl.is_started());
    assert_eq!(*log.borrow(), vec![PulseEvent::Started]);
}

#[test]
fn container_failure_restores_previous_rings() {
    let mut ctl = controller(PulseConfig::default());
    ctl.start().unwrap();
    let ids: Vec<_> = ctl.ring_views().iter().map(|v| v.id).collect();

    ctl.container_mut().fail_next_add = true;
    assert!(ctl.set_count(3).is_err());
    assert_eq!(ctl.count(), 4);
    assert_eq!(ctl.container().children(), ids.as_slice());
    assert!(ctl.is_started());
}

#[test]
fn detach_releases_rings_once() {
    let mut ctl = controller(PulseConfig::default());
    let log = record(&mut ctl);
    ctl.start().unwrap();

    ctl.on_detach();
    ctl.on_detach();
    assert!(ctl.ring_views().is_empty());
    assert!(ctl.container().children().is_empty());
    assert!(ctl.schedule().is_none());
    assert!(!ctl.clock().is_running());
    assert_eq!(*log.borrow(), vec![PulseEvent::Started, PulseEvent::Detached]);

    ctl.start().unwrap();
    assert!(!ctl.is_started());
}

#[test]
fn attach_rebuilds_from_latest_config() {
    let mut ctl = controller(PulseConfig::default());
    ctl.on_detach();
    ctl.set_count(6).unwrap();
    assert!(ctl.ring_views().is_empty());

    ctl.on_attach().unwrap();
    ctl.on_attach().unwrap();
    assert_eq!(ctl.ring_views().len(), 6);
    assert_eq!(ctl.container().children().len(), 6);
    assert_eq!(ctl.state(), PulseState::Idle);
}

#[test]
fn set_color_applies_without_rebuild() {
    let mut ctl = controller(PulseConfig::default());
    let log = record(&mut ctl);
    let red = Color::rgb(255, 0, 0);

    ctl.set_color(red);
    assert_eq!(ctl.color(), red);
    assert!(ctl.ring_views().iter().all(|v| v.color == red));
    assert!(
        ctl.schedule()
            .is_some_and(|s| s.rings.iter().all(|r| r.color == red))
    );
    assert!(log.borrow().is_empty());
}

#[test]
fn set_color_keeps_palette_colors() {
    let config = PulseConfigBuilder::new()
        .palette(["#00FF00"])
        .build()
        .unwrap();
    let mut ctl = controller(config);
    ctl.set_color(Color::rgb(255, 0, 0));
    assert!(
        ctl.ring_views()
            .iter()
            .all(|v| v.color == Color::rgb(0, 255, 0))
    );
}

#[test]
fn curve_changes_rebuild() {
    let mut ctl = controller(PulseConfig::default());
    let log = record(&mut ctl);

    ctl.set_curve_raw(99).unwrap();
    assert_eq!(ctl.curve(), Curve::Linear);
    assert!(log.borrow().is_empty());

    ctl.set_curve_raw(2).unwrap();
    assert_eq!(ctl.curve(), Curve::Decelerate);
    assert_eq!(ctl.schedule().map(|s| s.curve), Some(Curve::Decelerate));
    assert_eq!(*log.borrow(), vec![PulseEvent::Rebuilt { count: 4 }]);
}

#[test]
fn style_change_reverses_stroke_order() {
    let mut ctl = controller(cfg(3, 900).build().unwrap());
    ctl.set_style(PaintStyle::Stroke).unwrap();
    let schedule = ctl.schedule().unwrap();
    assert_eq!(schedule.rings[0].index, 2);
    assert_eq!(schedule.rings[0].effective_duration_ms, 300);
    assert_eq!(
        ctl.ring_views().iter().map(|v| v.index).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}

#[test]
fn listener_requests_run_after_dispatch() {
    let config = cfg(1, 100).repeat_count(1).unwrap().build().unwrap();
    let mut ctl = controller(config);
    let log = record(&mut ctl);
    let restarted = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&restarted);
    ctl.add_listener(move |event, deferred| {
        if *event == PulseEvent::Finished && !*flag.borrow() {
            *flag.borrow_mut() = true;
            deferred.start();
        }
    });

    ctl.start().unwrap();
    ctl.clock_mut().advance(250);
    ctl.pump().unwrap();
    assert!(ctl.is_started());
    assert_eq!(
        *log.borrow(),
        vec![
            PulseEvent::Started,
            PulseEvent::Finished,
            PulseEvent::Started
        ]
    );
}

#[test]
fn listener_errors_surface_from_pump() {
    let mut ctl = controller(PulseConfig::default());
    ctl.add_listener(|event, deferred| {
        if *event == PulseEvent::Started {
            deferred.push(PulseRequest::SetCount(-3));
        }
    });
    assert!(ctl.start().unwrap_err().is_configuration());
    assert!(ctl.is_started());
    assert_eq!(ctl.count(), 4);
}

#[test]
fn resize_lays_out_every_ring() {
    let config = PulseConfigBuilder::new().margin_px(10.0).build().unwrap();
    let mut ctl = controller(config);
    ctl.on_resize(200.0, 100.0);
    assert_eq!(ctl.geometry().center, Point::new(100.0, 50.0));
    assert_eq!(ctl.geometry().base_radius, 50.0);

    let expected = Rect::new(60.0, 10.0, 140.0, 90.0);
    assert!(ctl.ring_views().iter().all(|v| v.bounds == expected));

    let id = ctl.ring_views()[1].id;
    ctl.on_ring_resized(id);
    ctl.on_ring_resized(id);
    assert_eq!(ctl.ring_views()[1].bounds, expected);
}

#[test]
fn padding_shrinks_content_box() {
    let mut ctl = controller(PulseConfig::default());
    ctl.set_padding(Insets::uniform(10.0));
    ctl.on_resize(200.0, 100.0);
    assert_eq!(ctl.geometry().center, Point::new(100.0, 50.0));
    assert_eq!(ctl.geometry().base_radius, 40.0);
}

#[test]
fn draw_paints_rings_in_container_order() {
    let config = PulseConfigBuilder::new()
        .style(PaintStyle::Stroke)
        .stroke_width(2.0)
        .palette(["#FF0000", "#0000FF"])
        .build()
        .unwrap();
    let mut ctl = controller(config);
    ctl.on_resize(100.0, 100.0);
    ctl.start().unwrap();

    let mut surface = RecordingSurface::new();
    ctl.draw(&mut surface).unwrap();
    assert_eq!(surface.draws.len(), 4);
    let colors: Vec<_> = surface.draws.iter().map(|d| d.color).collect();
    assert_eq!(
        colors,
        vec![
            Color::rgb(255, 0, 0),
            Color::rgb(0, 0, 255),
            Color::rgb(255, 0, 0),
            Color::rgb(0, 0, 255)
        ]
    );
    let first = surface.draws[0];
    assert_eq!(first.pivot, Point::new(50.0, 50.0));
    assert_eq!(first.style, PaintStyle::Stroke);
    assert_eq!(first.stroke_width, 2.0);
    assert_eq!(first.sweep_angle_deg, 360.0);
}

#[test]
fn apply_routes_requests() {
    let mut ctl = controller(PulseConfig::default());
    ctl.apply(PulseRequest::Start).unwrap();
    assert!(ctl.is_started());
    ctl.apply(PulseRequest::SetCurve(Curve::Accelerate)).unwrap();
    assert_eq!(ctl.curve(), Curve::Accelerate);
    ctl.apply(PulseRequest::Stop).unwrap();
    assert!(!ctl.is_started());
}

use super::*;
use crate::construct::{from_fn, ConstructionErrorKind, FailureCause, PickedPoint, ThreePointCircle};
use crate::geometry::Point3;
use std::cell::Cell;

fn hit(x: f64, y: f64, z: f64) -> PickEvent {
    PickEvent::Primary {
        hit: Some(PickedPoint::new(Point3::new(x, y, z))),
    }
}

fn assert_released(viewport: &SceneViewport, mode: Option<SelectionMode>) {
    assert_eq!(viewport.selection_mode(), mode);
    assert!(!viewport.is_editing());
    assert!(viewport.listeners().is_empty());
}

#[test]
fn test_begin_takes_over_viewport() {
    let mut viewport = SceneViewport::new();
    let mut session = PickSession::new(&mut viewport, ThreePointCircle);
    assert_eq!(session.phase(), PickPhase::Idle);

    session.begin().unwrap();
    assert_eq!(session.phase(), PickPhase::Picking);
    assert_eq!(session.viewport().selection_mode(), Some(SelectionMode::Off));
    assert!(session.viewport().is_editing());
    assert_eq!(session.viewport().listeners().len(), 1);
    assert_eq!(session.required(), 3);
}

#[test]
fn test_three_picks_complete_circle() {
    let mut viewport = SceneViewport::new();
    let mut session = PickSession::new(&mut viewport, ThreePointCircle);
    session.begin().unwrap();

    assert!(session.handle(hit(0.0, 0.0, 0.0)).unwrap().is_pending());
    assert!(session.handle(hit(2.0, 0.0, 0.0)).unwrap().is_pending());
    assert_eq!(session.points().len(), 2);

    match session.handle(hit(1.0, 1.0, 0.0)).unwrap() {
        PickStatus::Completed(Ok(circle)) => assert!((circle.radius - 1.0).abs() < 1e-9),
        other => panic!("expected completed circle, got {:?}", other),
    }
    assert_eq!(session.phase(), PickPhase::Completed);
    assert_released(session.viewport(), Some(SelectionMode::On));
}

#[test]
fn test_miss_is_ignored() {
    let mut viewport = SceneViewport::new();
    let mut session = PickSession::new(&mut viewport, ThreePointCircle);
    session.begin().unwrap();

    let status = session.handle(PickEvent::Primary { hit: None }).unwrap();
    assert!(status.is_pending());
    assert!(session.points().is_empty());
    assert_eq!(session.phase(), PickPhase::Picking);
}

#[test]
fn test_cancel_after_partial_picks_never_constructs() {
    for picks in 1..=2 {
        let calls = Cell::new(0);
        let ctor = from_fn(3, |_: &[PickedPoint]| {
            calls.set(calls.get() + 1);
            Ok(())
        });
        let mut viewport = SceneViewport::new();
        let mut session = PickSession::new(&mut viewport, ctor);
        session.begin().unwrap();

        for i in 0..picks {
            session.handle(hit(i as f64, 0.0, 0.0)).unwrap();
        }
        let status = session.handle(PickEvent::Secondary).unwrap();
        assert_eq!(status, PickStatus::Cancelled);
        assert_eq!(session.phase(), PickPhase::Cancelled);
        assert!(session.points().is_empty());
        assert_released(session.viewport(), Some(SelectionMode::On));
        drop(session);
        assert_eq!(calls.get(), 0);
    }
}

#[test]
fn test_construction_failure_still_restores_viewport() {
    let mut viewport = SceneViewport::with_selection_mode(Some(SelectionMode::Off));
    let mut session = PickSession::new(&mut viewport, ThreePointCircle);
    let status = session
        .run([hit(0.0, 0.0, 0.0), hit(1.0, 0.0, 0.0), hit(2.0, 0.0, 0.0)])
        .unwrap();

    match status {
        PickStatus::Completed(Err(err)) => assert_eq!(err.kind, ConstructionErrorKind::CollinearPoints),
        other => panic!("expected classified error, got {:?}", other),
    }
    assert_eq!(session.phase(), PickPhase::Completed);
    drop(session);
    assert_released(&viewport, Some(SelectionMode::Off));
}

#[test]
fn test_closure_failure_is_classified() {
    let mut viewport = SceneViewport::new();
    let mut session = PickSession::new(
        &mut viewport,
        from_fn(1, |_: &[PickedPoint]| {
            Err::<(), _>(FailureCause::Other("kernel refused".into()).into())
        }),
    );
    let status = session.run([hit(0.0, 0.0, 0.0)]).unwrap();
    match status {
        PickStatus::Completed(Err(err)) => assert_eq!(err.kind, ConstructionErrorKind::UnknownFailure),
        other => panic!("unexpected status {:?}", other),
    }
    drop(session);
    assert_released(&viewport, Some(SelectionMode::On));
}

#[test]
fn test_second_session_rejected() {
    let viewport = SharedViewport::new(SceneViewport::new());
    let mut first = PickSession::new(viewport.clone(), ThreePointCircle);
    first.begin().unwrap();
    first.handle(hit(0.0, 0.0, 0.0)).unwrap();

    let mut second = PickSession::new(viewport.clone(), ThreePointCircle);
    assert_eq!(second.begin(), Err(PickError::SessionActive));
    assert_eq!(second.phase(), PickPhase::Idle);

    // First session is untouched and can still finish
    assert_eq!(first.phase(), PickPhase::Picking);
    assert_eq!(first.points().len(), 1);
    assert_eq!(viewport.selection_mode(), Some(SelectionMode::Off));
    assert_eq!(viewport.read().listeners().len(), 1);

    first.handle(hit(2.0, 0.0, 0.0)).unwrap();
    let status = first.handle(hit(1.0, 1.0, 0.0)).unwrap();
    assert!(matches!(status, PickStatus::Completed(Ok(_))));
    assert_released(&viewport.read(), Some(SelectionMode::On));

    // Once released, a new session may start
    second.begin().unwrap();
    assert_eq!(second.phase(), PickPhase::Picking);
    second.handle(PickEvent::Secondary).unwrap();
    assert_released(&viewport.read(), Some(SelectionMode::On));
}

#[test]
fn test_dropped_session_releases_viewport() {
    let viewport = SharedViewport::new(SceneViewport::new());
    {
        let mut abandoned = PickSession::new(viewport.clone(), ThreePointCircle);
        abandoned.begin().unwrap();
        abandoned.handle(hit(0.0, 0.0, 0.0)).unwrap();
        assert!(viewport.is_editing());
    }
    assert_released(&viewport.read(), Some(SelectionMode::On));

    let mut next = PickSession::new(viewport.clone(), ThreePointCircle);
    next.begin().unwrap();
    assert_eq!(next.phase(), PickPhase::Picking);
    assert_eq!(viewport.read().listeners().len(), 1);
}

#[test]
fn test_dropping_idle_or_finished_session_leaves_viewport_alone() {
    let viewport = SharedViewport::new(SceneViewport::new());
    let mut owner = PickSession::new(viewport.clone(), ThreePointCircle);
    owner.begin().unwrap();

    // An idle session that never began must not release someone else's takeover
    drop(PickSession::new(viewport.clone(), ThreePointCircle));
    assert!(viewport.is_editing());
    assert_eq!(viewport.read().listeners().len(), 1);

    owner.handle(PickEvent::Secondary).unwrap();
    drop(owner);
    assert_released(&viewport.read(), Some(SelectionMode::On));
}

#[test]
fn test_terminal_session_rejects_events() {
    let mut viewport = SceneViewport::new();
    let mut session = PickSession::new(&mut viewport, ThreePointCircle);
    session.run([PickEvent::Secondary]).unwrap();

    assert_eq!(session.handle(hit(0.0, 0.0, 0.0)), Err(PickError::NotPicking(PickPhase::Cancelled)));
    assert_eq!(session.begin(), Err(PickError::NotIdle(PickPhase::Cancelled)));
    assert_released(session.viewport(), Some(SelectionMode::On));
}

#[test]
fn test_idle_session_rejects_events() {
    let mut viewport = SceneViewport::new();
    let mut session = PickSession::new(&mut viewport, ThreePointCircle);
    assert_eq!(session.handle(PickEvent::Secondary), Err(PickError::NotPicking(PickPhase::Idle)));
}

#[test]
fn test_run_returns_pending_when_events_run_out() {
    let mut viewport = SceneViewport::new();
    let mut session = PickSession::new(&mut viewport, ThreePointCircle);
    let status = session.run([hit(0.0, 0.0, 0.0)]).unwrap();
    assert!(status.is_pending());
    assert_eq!(session.phase(), PickPhase::Picking);
    assert!(session.viewport().is_editing());

    session.handle(PickEvent::Secondary).unwrap();
    assert_released(session.viewport(), Some(SelectionMode::On));
}

#[test]
fn test_viewport_without_selection_node() {
    let mut viewport = SceneViewport::with_selection_mode(None);
    let mut session = PickSession::new(&mut viewport, ThreePointCircle);
    session.begin().unwrap();
    assert_eq!(session.viewport().selection_mode(), None);
    session.handle(PickEvent::Secondary).unwrap();
    assert_released(session.viewport(), None);
}

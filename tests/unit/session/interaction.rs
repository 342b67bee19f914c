use super::*;

fn surface() -> SurfaceSize {
    SurfaceSize::new(400).unwrap()
}

#[test]
fn pointer_down_without_image_stays_idle() {
    let mut i = Interaction::new(surface());
    assert!(!i.pointer_down(Point::new(10.0, 10.0), false));
    assert_eq!(i.drag(), DragState::Idle);
    assert!(!i.pointer_move(Point::new(20.0, 20.0), false));
    assert_eq!(i.transform(), ImageTransform::centered(surface()));
}

#[test]
fn drag_tracks_absolute_position_not_accumulated_delta() {
    let mut i = Interaction::new(surface());
    i.pointer_down(Point::new(210.0, 190.0), true);
    assert_eq!(
        i.drag(),
        DragState::Dragging {
            anchor: Vec2::new(10.0, -10.0)
        }
    );

    assert!(i.pointer_move(Point::new(260.0, 190.0), true));
    assert!(i.pointer_move(Point::new(230.0, 220.0), true));
    assert_eq!(i.transform().center(), Point::new(220.0, 230.0));
}

#[test]
fn drag_there_and_back_restores_the_offset_exactly() {
    let mut i = Interaction::new(surface());
    i.pointer_down(Point::new(123.0, 321.0), true);
    i.pointer_move(Point::new(123.0 + 37.0, 321.0 - 58.0), true);
    i.pointer_up();

    i.pointer_down(Point::new(160.0, 263.0), true);
    i.pointer_move(Point::new(160.0 - 37.0, 263.0 + 58.0), true);
    i.pointer_up();

    assert_eq!(i.transform().center(), Point::new(200.0, 200.0));
}

#[test]
fn pointer_up_and_leave_end_the_drag_unconditionally() {
    let mut i = Interaction::new(surface());
    i.pointer_down(Point::new(0.0, 0.0), true);
    assert!(i.drag().is_dragging());
    assert!(!i.pointer_up());
    assert!(!i.drag().is_dragging());
    assert!(!i.pointer_move(Point::new(5.0, 5.0), true));

    i.pointer_down(Point::new(0.0, 0.0), true);
    i.pointer_leave();
    assert_eq!(i.drag(), DragState::Idle);

    // Ending an idle state is harmless.
    i.pointer_leave();
    i.pointer_up();
    assert_eq!(i.drag(), DragState::Idle);
}

#[test]
fn zoom_requires_an_image_and_a_positive_scale() {
    let mut i = Interaction::new(surface());
    assert!(!i.set_zoom(2.0, false).unwrap());
    assert_eq!(i.transform().scale, 1.0);

    assert!(i.set_zoom(2.5, true).unwrap());
    assert_eq!(i.transform().scale, 2.5);

    assert!(i.set_zoom(0.0, true).is_err());
    assert!(i.set_zoom(-1.0, true).is_err());
    assert!(i.set_zoom(f64::INFINITY, true).is_err());
    assert_eq!(i.transform().scale, 2.5);
}

#[test]
fn reset_recentres_and_cancels_drag() {
    let mut i = Interaction::new(surface());
    i.pointer_down(Point::new(200.0, 200.0), true);
    i.pointer_move(Point::new(50.0, 60.0), true);
    i.set_zoom(3.0, true).unwrap();
    i.reset(surface());
    assert_eq!(i.transform(), ImageTransform::centered(surface()));
    assert_eq!(i.drag(), DragState::Idle);
}

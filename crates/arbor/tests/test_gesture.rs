//! Gesture recognition over whole frames.

use std::cell::RefCell;
use std::rc::Rc;

use arbor::tutils::{TFixed, test_context};
use arbor::widgets::{Container, Flex, GestureDetector};
use arbor::{Color, Expanse, MouseButton, Point, Result, Runtime, Stateful, shared};

type Log = Rc<RefCell<Vec<&'static str>>>;

fn tag(log: &Log, s: &'static str) -> impl Fn() + 'static {
    let log = log.clone();
    move || log.borrow_mut().push(s)
}

#[test]
fn click_lands_on_the_widget_under_the_pointer() -> Result<()> {
    let (ctx, _, input) = test_context();
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    // Two buttons side by side; the pointer sits over the second.
    let root = shared(
        Flex::row()
            .with_child(
                GestureDetector::new(Container::new().with_size(50.0, 50.0))
                    .on_click(tag(&log, "left")),
            )
            .with_child(
                GestureDetector::new(Container::new().with_size(50.0, 50.0))
                    .on_click(tag(&log, "right")),
            ),
    );
    let mut rt = Runtime::new(ctx);
    rt.initialize()?;
    rt.mount(root)?;
    rt.update(0.016)?;
    rt.draw(100.0, 50.0)?;

    input.pointer.set(Point::new(75.0, 25.0));
    input.press(MouseButton::Left);
    rt.update(0.016)?;
    input.end_frame();
    input.release(MouseButton::Left);
    rt.update(0.016)?;

    assert_eq!(*log.borrow(), vec!["right"]);
    Ok(())
}

#[test]
fn recognition_lags_layout_changes_by_one_frame() -> Result<()> {
    let (ctx, _, input) = test_context();
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let root = shared(
        GestureDetector::new(Container::new().with_size(50.0, 50.0)).on_press(tag(&log, "press")),
    );
    let mut rt = Runtime::new(ctx);
    rt.initialize()?;
    rt.mount(root)?;
    // The press arrives before any draw has captured a rectangle.
    input.pointer.set(Point::new(25.0, 25.0));
    input.press(MouseButton::Left);
    rt.update(0.016)?;
    assert!(log.borrow().is_empty());

    rt.draw(100.0, 100.0)?;
    rt.update(0.016)?;
    assert_eq!(*log.borrow(), vec!["press"]);
    Ok(())
}

#[test]
fn press_held_across_frames_fires_once() -> Result<()> {
    let (ctx, _, input) = test_context();
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let root = shared(
        GestureDetector::new(TFixed::new(50.0, 50.0))
            .on_press(tag(&log, "press"))
            .on_release(tag(&log, "release")),
    );
    let mut rt = Runtime::new(ctx);
    rt.initialize()?;
    rt.mount(root)?;
    rt.update(0.016)?;
    rt.draw(50.0, 50.0)?;

    input.pointer.set(Point::new(10.0, 10.0));
    input.press(MouseButton::Left);
    for _ in 0..5 {
        rt.update(0.016)?;
        rt.draw(50.0, 50.0)?;
        input.end_frame();
    }
    input.release(MouseButton::Left);
    rt.update(0.016)?;
    assert_eq!(*log.borrow(), vec!["press", "release"]);
    Ok(())
}

#[test]
fn touch_press_uses_touch_state_not_buttons() -> Result<()> {
    let (ctx, _, input) = test_context();
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let root = shared(
        GestureDetector::new(TFixed::new(50.0, 50.0))
            .on_click(tag(&log, "click"))
            .on_hover_enter(tag(&log, "enter")),
    );
    let mut rt = Runtime::new(ctx);
    rt.initialize()?;
    rt.mount(root)?;
    rt.update(0.016)?;
    rt.draw(50.0, 50.0)?;

    input.touch_device.set(true);
    input.pointer.set(Point::new(10.0, 10.0));
    input.touch_active.set(true);
    rt.update(0.016)?;
    input.touch_active.set(false);
    rt.update(0.016)?;

    // A click, and no hover events on a touch device.
    assert_eq!(*log.borrow(), vec!["click"]);
    Ok(())
}

#[test]
fn nested_detectors_both_recognize() -> Result<()> {
    let (ctx, _, input) = test_context();
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let root = shared(
        GestureDetector::new(
            GestureDetector::new(Container::new().with_size(50.0, 50.0).with_background(Color::BLACK))
                .on_click(tag(&log, "inner")),
        )
        .on_click(tag(&log, "outer")),
    );
    let mut rt = Runtime::new(ctx);
    rt.initialize()?;
    rt.mount(root.clone())?;
    rt.update(0.016)?;
    rt.draw(50.0, 50.0)?;
    assert_eq!(root.borrow().bounds().size(), Expanse::new(50.0, 50.0));

    input.pointer.set(Point::new(25.0, 25.0));
    input.press(MouseButton::Left);
    rt.update(0.016)?;
    input.end_frame();
    input.release(MouseButton::Left);
    rt.update(0.016)?;

    assert_eq!(*log.borrow(), vec!["outer", "inner"]);
    Ok(())
}

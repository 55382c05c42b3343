//! Layout behavior across the built-in containers.

use arbor::tutils::{PaintOp, TFixed, test_context};
use arbor::widgets::{Container, Flex, Positioned, Stack, Wrap};
use arbor::{
    BoxConstraints, Color, EdgeInsets, Expanse, Rect, Result, Stateful, Widget, init_root, shared,
};

#[test]
fn spaced_column_reports_full_extent() -> Result<()> {
    let (ctx, _, _) = test_context();
    let root = shared(
        Flex::column()
            .with_spacing(10.0)
            .with_child(TFixed::new(30.0, 50.0))
            .with_child(TFixed::new(30.0, 60.0))
            .with_child(TFixed::new(30.0, 70.0)),
    );
    init_root(&ctx, &root)?;
    root.borrow_mut()
        .layout(&ctx, BoxConstraints::new(0.0, 100.0, 0.0, f32::INFINITY)?)?;
    // 50 + 60 + 70 plus two 10 unit gaps.
    assert_eq!(root.borrow().bounds().size(), Expanse::new(30.0, 200.0));
    Ok(())
}

#[test]
fn flexible_child_fills_what_remains() -> Result<()> {
    let (ctx, paint, _) = test_context();
    let root = shared(
        Flex::row()
            .with_child(Container::new().with_size(50.0, 10.0))
            .with_flexible(
                1.0,
                Container::new().with_background(Color::BLACK),
            ),
    );
    init_root(&ctx, &root)?;
    root.borrow_mut()
        .layout(&ctx, BoxConstraints::tight(Expanse::new(150.0, 10.0)))?;
    root.borrow_mut().draw(&ctx, 0.0, 0.0)?;
    let ops = paint.borrow_mut().take_ops();
    assert!(ops.contains(&PaintOp::Fill {
        rect: Rect::new(50.0, 0.0, 100.0, 10.0),
        color: Color::BLACK,
    }));
    Ok(())
}

#[test]
fn stack_stretches_between_pinned_edges() -> Result<()> {
    let (ctx, paint, _) = test_context();
    let root = shared(
        Stack::new().with_child(
            Positioned::new(Container::new().with_background(Color::BLACK))
                .left(10.0)
                .right(10.0),
        ),
    );
    init_root(&ctx, &root)?;
    root.borrow_mut()
        .layout(&ctx, BoxConstraints::tight(Expanse::new(100.0, 100.0)))?;
    root.borrow_mut().draw(&ctx, 0.0, 0.0)?;
    let ops = paint.borrow_mut().take_ops();
    assert!(ops.contains(&PaintOp::Fill {
        rect: Rect::new(10.0, 0.0, 80.0, 100.0),
        color: Color::BLACK,
    }));
    Ok(())
}

#[test]
fn resolved_sizes_always_satisfy_constraints() -> Result<()> {
    let (ctx, _, _) = test_context();
    let root = shared(
        Container::new().with_padding(EdgeInsets::all(8.0)).with_child(
            Flex::column()
                .with_child(TFixed::new(500.0, 500.0))
                .with_child(TFixed::new(5.0, 5.0)),
        ),
    );
    init_root(&ctx, &root)?;
    for (min_w, max_w, min_h, max_h) in [
        (0.0, 100.0, 0.0, 100.0),
        (50.0, 50.0, 20.0, 80.0),
        (0.0, f32::INFINITY, 10.0, 10.0),
    ] {
        let c = BoxConstraints::new(min_w, max_w, min_h, max_h)?;
        root.borrow_mut().layout(&ctx, c)?;
        let s = root.borrow().bounds().size();
        assert!(s.w >= min_w && s.w <= max_w, "width {s:?} violates {c:?}");
        assert!(s.h >= min_h && s.h <= max_h, "height {s:?} violates {c:?}");
    }
    Ok(())
}

#[test]
fn relayout_with_same_constraints_is_stable() -> Result<()> {
    let (ctx, paint, _) = test_context();
    let root = shared(
        Wrap::horizontal()
            .with_spacing(4.0)
            .with_run_spacing(4.0)
            .with_child(Container::new().with_size(40.0, 10.0).with_background(Color::BLACK))
            .with_child(Container::new().with_size(40.0, 10.0).with_background(Color::BLACK))
            .with_child(Container::new().with_size(40.0, 10.0).with_background(Color::BLACK)),
    );
    init_root(&ctx, &root)?;
    let c = BoxConstraints::loose(Expanse::new(100.0, 100.0));
    root.borrow_mut().layout(&ctx, c)?;
    root.borrow_mut().draw(&ctx, 0.0, 0.0)?;
    let first = paint.borrow_mut().take_ops();
    root.borrow_mut().layout(&ctx, c)?;
    root.borrow_mut().draw(&ctx, 0.0, 0.0)?;
    let second = paint.borrow_mut().take_ops();
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn absolute_positions_compose_down_the_tree() -> Result<()> {
    let (ctx, paint, _) = test_context();
    let root = shared(
        Container::new().with_padding(EdgeInsets::only(3.0, 4.0, 0.0, 0.0)).with_child(
            Container::new()
                .with_padding(EdgeInsets::all(2.0))
                .with_child(Container::new().with_size(10.0, 10.0).with_background(Color::BLACK)),
        ),
    );
    init_root(&ctx, &root)?;
    root.borrow_mut()
        .layout(&ctx, BoxConstraints::loose(Expanse::new(100.0, 100.0)))?;
    root.borrow_mut().draw(&ctx, 100.0, 200.0)?;
    let ops = paint.borrow_mut().take_ops();
    assert!(ops.contains(&PaintOp::Fill {
        rect: Rect::new(105.0, 206.0, 10.0, 10.0),
        color: Color::BLACK,
    }));
    Ok(())
}

#[test]
fn empty_flex_fills_bounded_main_axis() -> Result<()> {
    let (ctx, _, _) = test_context();
    let root = shared(Flex::row());
    init_root(&ctx, &root)?;
    root.borrow_mut()
        .layout(&ctx, BoxConstraints::new(5.0, 100.0, 7.0, f32::INFINITY)?)?;
    assert_eq!(root.borrow().bounds().size(), Expanse::new(100.0, 7.0));
    Ok(())
}

#[test]
fn alignment_offsets_are_relative_to_the_padded_interior() -> Result<()> {
    let (ctx, paint, _) = test_context();
    let root = shared(
        Container::new()
            .with_size(100.0, 100.0)
            .with_padding(EdgeInsets::all(10.0))
            .with_alignment(arbor::Alignment::BOTTOM_RIGHT)
            .with_child(Container::new().with_size(20.0, 20.0).with_background(Color::BLACK)),
    );
    init_root(&ctx, &root)?;
    root.borrow_mut()
        .layout(&ctx, BoxConstraints::loose(Expanse::new(200.0, 200.0)))?;
    root.borrow_mut().draw(&ctx, 0.0, 0.0)?;
    // Interior is 80x80 starting at (10, 10); bottom-right leaves the child
    // at 10 + 60.
    let ops = paint.borrow_mut().take_ops();
    assert!(ops.contains(&PaintOp::Fill {
        rect: Rect::new(70.0, 70.0, 20.0, 20.0),
        color: Color::BLACK,
    }));
    Ok(())
}

//! Runtime lifecycle ordering and misuse errors.

use std::cell::RefCell;
use std::rc::Rc;

use arbor::tutils::{TRecorder, test_context};
use arbor::widgets::{Composite, Container};
use arbor::{Error, Result, Runtime, shared};

#[test]
fn lifecycle_order_is_init_update_layout_draw_dispose() -> Result<()> {
    let (ctx, _, _) = test_context();
    let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let mut rt = Runtime::new(ctx);
    rt.initialize()?;
    rt.mount(shared(TRecorder::new("w", log.clone())))?;
    rt.update(0.016)?;
    rt.draw(100.0, 100.0)?;
    rt.close()?;
    assert_eq!(
        *log.borrow(),
        vec!["w:init", "w:update", "w:layout", "w:draw", "w:dispose"]
    );
    Ok(())
}

#[test]
fn children_initialize_after_their_parent_and_dispose_with_it() -> Result<()> {
    let (ctx, _, _) = test_context();
    let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let outer_log = log.clone();
    let inner_log = log.clone();
    let mut rt = Runtime::new(ctx);
    rt.initialize()?;
    rt.mount(shared(Composite::new(move |_| {
        outer_log.borrow_mut().push("build".into());
        TRecorder::new("child", inner_log.clone())
    })))?;
    rt.close()?;
    assert_eq!(*log.borrow(), vec!["build", "child:init", "child:dispose"]);
    Ok(())
}

#[test]
fn update_before_mount_is_a_lifecycle_error() -> Result<()> {
    let (ctx, _, _) = test_context();
    let mut rt = Runtime::new(ctx);
    rt.initialize()?;
    assert!(matches!(rt.update(0.016), Err(Error::Lifecycle(_))));
    assert!(matches!(rt.draw(10.0, 10.0), Err(Error::Lifecycle(_))));
    Ok(())
}

#[test]
fn double_initialize_and_double_mount_are_config_errors() -> Result<()> {
    let (ctx, _, _) = test_context();
    let mut rt = Runtime::new(ctx);
    rt.initialize()?;
    assert!(matches!(rt.initialize(), Err(Error::Config(_))));
    rt.mount(shared(Container::new()))?;
    assert!(matches!(
        rt.mount(shared(Container::new())),
        Err(Error::Config(_))
    ));
    Ok(())
}

#[test]
fn close_deactivates_and_clears_focus() -> Result<()> {
    let (ctx, _, _) = test_context();
    let focus_ctx = ctx.clone();
    let mut rt = Runtime::new(ctx);
    rt.initialize()?;
    rt.mount(shared(Container::new()))?;
    rt.close()?;
    assert!(!rt.is_active());
    assert!(focus_ctx.focus().current().is_none());
    assert!(matches!(rt.update(0.016), Err(Error::Lifecycle(_))));
    Ok(())
}

#[test]
fn unmount_allows_a_fresh_root() -> Result<()> {
    let (ctx, _, _) = test_context();
    let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    let mut rt = Runtime::new(ctx);
    rt.initialize()?;
    rt.mount(shared(TRecorder::new("a", log.clone())))?;
    rt.unmount()?;
    rt.mount(shared(TRecorder::new("b", log.clone())))?;
    rt.close()?;
    assert_eq!(
        *log.borrow(),
        vec!["a:init", "a:dispose", "b:init", "b:dispose"]
    );
    Ok(())
}

use halo_core::{LoopState, ViewLifecycle};

#[test]
fn starts_hidden_and_stopped() {
    let lc = ViewLifecycle::default();
    assert!(!lc.is_visible());
    assert_eq!(lc.state(), LoopState::Stopped);
}

#[test]
fn hide_stops_a_running_loop() {
    let mut lc = ViewLifecycle::hidden();
    let epoch = lc.show().unwrap();
    assert!(lc.init_finished(epoch));
    assert_eq!(lc.state(), LoopState::Running);

    assert!(lc.hide());
    assert_eq!(lc.state(), LoopState::Stopped);
    assert!(!lc.is_visible());
    // nothing left to cancel
    assert!(!lc.hide());
}

#[test]
fn init_completing_after_hide_is_dropped() {
    let mut lc = ViewLifecycle::hidden();
    let epoch = lc.show().unwrap();
    assert!(!lc.hide());
    assert!(!lc.init_finished(epoch));
    assert_eq!(lc.state(), LoopState::Stopped);
}

#[test]
fn reshow_only_accepts_the_newest_init() {
    let mut lc = ViewLifecycle::hidden();
    let first = lc.show().unwrap();
    lc.hide();
    let second = lc.show().unwrap();
    assert_ne!(first, second);

    assert!(!lc.init_finished(first));
    assert_eq!(lc.state(), LoopState::Initializing);
    assert!(lc.init_finished(second));
    assert_eq!(lc.state(), LoopState::Running);
}

#[test]
fn show_while_pending_or_running_starts_nothing() {
    let mut lc = ViewLifecycle::hidden();
    let epoch = lc.show().unwrap();
    assert_eq!(lc.show(), None);
    lc.init_finished(epoch);
    assert_eq!(lc.show(), None);
    assert_eq!(lc.state(), LoopState::Running);
}

#[test]
fn failed_init_can_be_retried() {
    let mut lc = ViewLifecycle::hidden();
    let epoch = lc.show().unwrap();
    lc.init_failed(epoch);
    assert_eq!(lc.state(), LoopState::Stopped);
    assert!(lc.is_visible());

    let retry = lc.show().unwrap();
    assert!(lc.init_finished(retry));
}

//! Singleton launchers collapse concurrent requests into one.

use futures_util::FutureExt;
use summon_core::{Launch, LaunchController, LaunchOptions};

type Controller = LaunchController<String, String, ()>;

fn singleton() -> Controller {
    Controller::new(LaunchOptions::new().with_singleton(true))
}

#[test]
fn second_start_joins_the_pending_request() {
    let controller = singleton();
    let first = controller.start("a".to_string());
    let second = controller.start("b".to_string());

    assert!(first.same_request(&second));
    assert_eq!(controller.registry().len(), 1);

    let live = controller.registry().first().unwrap();
    assert_eq!(live.args(), "a");
    live.resolve("done".to_string());

    assert_eq!(first.now_or_never(), Some(Ok("done".to_string())));
    assert_eq!(second.now_or_never(), Some(Ok("done".to_string())));
}

#[test]
fn launch_returns_the_discarded_arguments() {
    let controller = singleton();
    assert!(!controller.launch("a".to_string()).is_joined());

    match controller.launch("b".to_string()) {
        Launch::Joined { discarded_args, .. } => assert_eq!(discarded_args, "b"),
        Launch::Created(_) => panic!("expected the second launch to join"),
    }
}

#[test]
fn new_request_after_settlement() {
    let controller = singleton();
    let first = controller.start("a".to_string());
    controller.registry().first().unwrap().reject(());

    let second = controller.start("b".to_string());
    assert!(!first.same_request(&second));
    assert_eq!(controller.registry().first().unwrap().args(), "b");
    assert_eq!(first.now_or_never(), Some(Err(())));
}

#[test]
fn non_singleton_requests_are_independent() {
    let controller = Controller::new(LaunchOptions::default());
    let first = controller.start("a".to_string());
    let second = controller.start("b".to_string());

    assert!(!first.same_request(&second));
    assert_eq!(controller.registry().len(), 2);
}

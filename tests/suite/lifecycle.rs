//! Request lifecycle through the public launcher API.

use std::time::Duration;

use futures_util::FutureExt;
use summon_core::{InstanceKey, LaunchController, LaunchOptions};
use tokio::sync::oneshot;
use tokio::task::LocalSet;

type Controller = LaunchController<String, String, String>;

fn raw_keys(controller: &Controller) -> Vec<u64> {
    controller
        .registry()
        .keys()
        .into_iter()
        .map(InstanceKey::raw)
        .collect()
}

#[test]
fn two_requests_then_resolve_the_first() {
    let controller = Controller::new(LaunchOptions::default());

    let first = controller.start("x".to_string());
    assert_eq!(raw_keys(&controller), vec![0]);

    let _second = controller.start("y".to_string());
    assert_eq!(raw_keys(&controller), vec![0, 1]);

    let live = controller.registry().first().unwrap();
    assert_eq!(live.args(), "x");
    live.resolve("ok".to_string());

    assert_eq!(controller.registry().len(), 1);
    assert_eq!(raw_keys(&controller), vec![1]);
    assert_eq!(first.now_or_never(), Some(Ok("ok".to_string())));
}

#[test]
fn requests_settle_in_any_order() {
    let controller = Controller::new(LaunchOptions::default());
    let handles: Vec<_> = ["a", "b", "c"]
        .into_iter()
        .map(|args| controller.start(args.to_string()))
        .collect();

    let instances = controller.registry().instances();
    instances[2].resolve("c!".to_string());
    instances[0].reject("a failed".to_string());
    assert_eq!(raw_keys(&controller), vec![1]);

    instances[1].resolve("b!".to_string());
    assert!(controller.registry().is_empty());

    let outcomes: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.now_or_never().unwrap())
        .collect();
    assert_eq!(
        outcomes,
        vec![
            Err("a failed".to_string()),
            Ok("b!".to_string()),
            Ok("c!".to_string()),
        ]
    );
}

#[test]
fn keys_keep_increasing_after_the_registry_empties() {
    let controller = Controller::new(LaunchOptions::default());
    let _ = controller.start("a".to_string());
    controller.registry().first().unwrap().resolve(String::new());
    assert!(controller.registry().is_empty());

    let _ = controller.start("b".to_string());
    assert_eq!(raw_keys(&controller), vec![1]);
}

#[test]
fn second_settlement_is_ignored() {
    let controller = Controller::new(LaunchOptions::default());
    let handle = controller.start("a".to_string());
    let instance = controller.registry().first().unwrap();

    instance.resolve("first".to_string());
    instance.reject("late".to_string());
    instance.resolve("later".to_string());

    assert_eq!(handle.now_or_never(), Some(Ok("first".to_string())));
    assert!(controller.registry().is_empty());
}

#[tokio::test]
async fn chained_resolution_keeps_the_request_live_until_it_completes() {
    LocalSet::new()
        .run_until(async {
            let controller = Controller::new(LaunchOptions::default());
            let handle = controller.start("a".to_string());
            let instance = controller.registry().first().unwrap();

            let (tx, rx) = oneshot::channel::<String>();
            instance.resolve_with(async move { rx.await.map_err(|_| "sender dropped".to_string()) });

            assert!(instance.is_resolving());
            // Later settlements lose to the chained future.
            instance.resolve("too late".to_string());
            tokio::time::sleep(Duration::from_millis(5)).await;
            assert_eq!(controller.registry().len(), 1);

            tx.send("chained".to_string()).unwrap();
            assert_eq!(handle.clone().await, Ok("chained".to_string()));
            assert!(controller.registry().is_empty());
            assert_eq!(handle.now_or_never(), Some(Ok("chained".to_string())));
        })
        .await;
}

#[tokio::test]
async fn chained_resolution_finishes_with_nobody_awaiting() {
    LocalSet::new()
        .run_until(async {
            let controller = Controller::new(LaunchOptions::default());
            drop(controller.start("a".to_string()));
            let instance = controller.registry().first().unwrap();

            instance.resolve_with(async {
                tokio::time::sleep(Duration::from_millis(5)).await;
                Ok("late".to_string())
            });
            tokio::time::sleep(Duration::from_millis(50)).await;

            assert!(!instance.is_pending());
            assert!(controller.registry().is_empty());
        })
        .await;
}

#[tokio::test]
async fn subscribers_see_every_membership_change() {
    let controller = Controller::new(LaunchOptions::default());
    let mut changes = controller.registry().subscribe();

    let _ = controller.start("a".to_string());
    assert!(changes.has_changed().unwrap());
    changes.borrow_and_update();

    controller.registry().first().unwrap().resolve(String::new());
    assert!(changes.has_changed().unwrap());
    assert_eq!(*changes.borrow_and_update(), controller.registry().revision());
}

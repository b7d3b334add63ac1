//! Self-hosted launchers mounted into an overlay host.

use futures_util::FutureExt;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use summon_core::LaunchOptions;
use summon_tui::{MountError, OverlayHost, SelfHosted};

use crate::common::{RowView, press, rows};

type Launcher = SelfHosted<String, String, String, RowView>;

fn launcher() -> Launcher {
    SelfHosted::new(LaunchOptions::default(), RowView)
}

#[test]
fn mount_cycle_attaches_one_layer_per_activation() {
    let host = OverlayHost::new();
    let launcher = launcher();

    let mount = launcher.activate(&host).unwrap();
    assert_eq!(host.len(), 1);
    let first_layer = mount.layer();

    mount.deactivate();
    assert!(host.is_empty());

    let mount = launcher.activate(&host).unwrap();
    assert_eq!(host.len(), 1);
    assert_ne!(mount.layer(), first_layer);
    assert!(host.contains(mount.layer()));
}

#[test]
fn activating_twice_fails_without_a_second_layer() {
    let host = OverlayHost::new();
    let launcher = launcher();
    let _mount = launcher.activate(&host).unwrap();

    assert_eq!(launcher.activate(&host).unwrap_err(), MountError::AlreadyActive);
    assert_eq!(host.len(), 1);
}

#[test]
fn host_layers_keep_their_own_order() {
    let host = OverlayHost::new();
    let below = launcher();
    let above = launcher();
    let _below = below.activate(&host).unwrap();
    let _above = above.activate(&host).unwrap();

    let _ = below.start("under".to_string()).unwrap();
    let _ = above.start("over".to_string()).unwrap();

    let area = Rect::new(0, 0, 12, 2);
    let mut buf = Buffer::empty(area);
    (&host).render(area, &mut buf);
    assert!(rows(&buf)[0].starts_with("over"));

    // Keys reach the topmost layer first.
    assert!(host.handle_key(press('y')));
    assert!(above.registry().is_empty());
    assert_eq!(below.registry().len(), 1);
}

#[test]
fn requests_outlive_an_unmount() {
    let host = OverlayHost::new();
    let launcher = launcher();

    let mount = launcher.activate(&host).unwrap();
    let handle = launcher.start("kept".to_string()).unwrap();
    mount.deactivate();

    assert!(launcher.start("dropped".to_string()).is_none());
    assert_eq!(launcher.registry().len(), 1);

    let _mount = launcher.activate(&host).unwrap();
    assert!(host.handle_key(press('y')));
    assert_eq!(handle.now_or_never(), Some(Ok("kept".to_string())));
}

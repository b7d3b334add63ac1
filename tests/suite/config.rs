//! Config files feeding launcher options.

use std::fs;
use std::path::PathBuf;

use summon_config::{ConfigError, SummonConfig};
use summon_core::LaunchController;
use summon_types::EffectKind;

fn write(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn singleton_from_config_reaches_the_controller() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "[launcher]\nsingleton = true\n");

    let options = SummonConfig::load_from(&path)
        .unwrap()
        .unwrap()
        .launch_options();
    let controller: LaunchController<(), &str, ()> = LaunchController::new(options);

    let first = controller.start("a");
    let second = controller.start("b");
    assert!(first.same_request(&second));
}

#[test]
fn transition_names_accept_loose_spelling() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "[launcher.transition]\nenter = \"Slide-Up\"\nleave = \" shake \"\n",
    );

    let options = SummonConfig::load_from(&path)
        .unwrap()
        .unwrap()
        .launch_options();
    let transition = options.transition().unwrap();
    assert_eq!(transition.enter_effect().unwrap().kind(), EffectKind::SlideUp);
    assert_eq!(transition.leave_effect().unwrap().kind(), EffectKind::Shake);
}

#[test]
fn parse_errors_name_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "[launcher]\nsingleton = \"yes\"\n");

    let err = SummonConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains(&path.display().to_string()));
}

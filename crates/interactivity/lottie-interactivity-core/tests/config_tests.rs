use lottie_interactivity_core::{
    Action, ActionKind, ClickOverflow, ConfigError, CursorAxis, Direction, EngineConfig,
    InteractionMode, PlayerOptions, PointerRegion,
};

fn fixture(name: &str) -> Result<EngineConfig, ConfigError> {
    EngineConfig::from_json(&lottie_test_fixtures::configs::json(name).expect("fixture"))
}

/// it should parse every well-formed fixture; only the overlap fixture fails validation
#[test]
fn fixtures_parse_and_validate() {
    for key in lottie_test_fixtures::configs::keys() {
        if key == "invalid-kind" {
            assert!(fixture(&key).is_err());
            continue;
        }
        let cfg = fixture(&key).unwrap_or_else(|e| panic!("{key}: {e}"));
        let validated = cfg.validate();
        if key == "invalid-overlap" {
            assert!(validated.is_err(), "{key}");
        } else {
            assert_eq!(validated, Ok(()), "{key}");
        }
    }
}

/// it should carry mode settings from JSON
#[test]
fn mode_settings() {
    let cfg = fixture("scroll-loop-zones").unwrap();
    assert_eq!(cfg.mode, InteractionMode::Scroll);
    assert_eq!(cfg.container.as_deref(), Some("#scroll-area"));
    assert!((cfg.offset - 0.1).abs() < 1e-6);
    assert_eq!(cfg.actions[0].kind, ActionKind::None);
    assert_eq!(cfg.actions[2].threshold, Some([0.55, 0.8]));

    let cursor = fixture("cursor-seek-x").unwrap();
    assert_eq!(cursor.axis, CursorAxis::X);
    let click = fixture("click-toggle").unwrap();
    assert_eq!(click.click_overflow, ClickOverflow::Wrap);
}

/// it should survive a serialize/parse cycle unchanged
#[test]
fn config_json_is_stable() {
    let cfg = fixture("cursor-regions").unwrap();
    let text = serde_json::to_string(&cfg).unwrap();
    assert_eq!(EngineConfig::from_json(&text).unwrap(), cfg);
}

/// it should report malformed JSON as a parse error
#[test]
fn malformed_json() {
    assert!(matches!(
        EngineConfig::from_json("{ \"mode\": \"scroll\", "),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        EngineConfig::from_json(r#"{ "mode": "wiggle", "actions": [] }"#),
        Err(ConfigError::Parse(_))
    ));
}

/// it should reject an offset outside [0, 1)
#[test]
fn offset_bounds() {
    let base = fixture("scroll-with-offset").unwrap();
    assert_eq!(
        base.clone().with_offset(1.0).validate(),
        Err(ConfigError::InvalidOffset(1.0))
    );
    assert_eq!(base.with_offset(0.5).validate(), Ok(()));
}

/// it should require visibility in spatial modes and keep thresholds inside it
#[test]
fn spatial_interval_rules() {
    let missing = EngineConfig::new(
        InteractionMode::Scroll,
        vec![Action::event(ActionKind::Stop, &[0.0])],
    );
    assert!(matches!(
        missing.validate(),
        Err(ConfigError::MissingVisibility { index: 0, .. })
    ));

    let outside = EngineConfig::new(
        InteractionMode::Scroll,
        vec![
            Action::spatial(ActionKind::Play, [0.2, 0.5], &[0.0, 10.0]).with_threshold([0.1, 0.4]),
        ],
    );
    assert!(matches!(
        outside.validate(),
        Err(ConfigError::ThresholdOutsideVisibility { index: 0, .. })
    ));

    let inverted = EngineConfig::new(
        InteractionMode::Cursor,
        vec![Action::spatial(ActionKind::Stop, [0.8, 0.2], &[0.0])],
    );
    assert!(matches!(
        inverted.validate(),
        Err(ConfigError::InvalidInterval { index: 0, .. })
    ));

    let touching = EngineConfig::new(
        InteractionMode::Scroll,
        vec![
            Action::spatial(ActionKind::Stop, [0.0, 0.5], &[0.0]),
            Action::spatial(ActionKind::Stop, [0.5, 1.0], &[10.0, 12.0]),
        ],
    );
    assert_eq!(touching.validate(), Ok(()));
}

/// it should reject overlapping cursor regions
#[test]
fn overlapping_regions() {
    let a = PointerRegion {
        x: [0.0, 0.6],
        y: [0.0, 1.0],
    };
    let b = PointerRegion {
        x: [0.5, 1.0],
        y: [0.0, 1.0],
    };
    let cfg = EngineConfig::new(
        InteractionMode::Cursor,
        vec![
            Action::region(ActionKind::Seek, a, &[0.0, 10.0]),
            Action::region(ActionKind::Stop, b, &[10.0]),
        ],
    );
    assert_eq!(
        cfg.validate(),
        Err(ConfigError::OverlappingRegion { index: 1, other: 0 })
    );
}

/// it should accept and ignore visibility in event modes
#[test]
fn event_modes_ignore_visibility() {
    let cfg = EngineConfig::new(
        InteractionMode::Click,
        vec![Action::spatial(ActionKind::Play, [0.9, 0.1], &[0.0, 10.0])],
    );
    assert_eq!(cfg.validate(), Ok(()));
}

/// it should parse player option directions as 1 / -1 only
#[test]
fn player_option_directions() {
    let o = PlayerOptions::from_json(r#"{ "direction": -1, "loop": false }"#).unwrap();
    assert_eq!(o.direction, Direction::Reverse);
    assert!(!o.looping);
    assert!(o.autoplay);
    assert!(matches!(
        PlayerOptions::from_json(r#"{ "direction": 2 }"#),
        Err(ConfigError::Parse(_))
    ));
}

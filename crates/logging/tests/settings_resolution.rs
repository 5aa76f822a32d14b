//! Integration tests for mode-aware configuration resolution.
//!
//! These tests verify how the execution context selects channel conditions,
//! and how the header and log file path are derived from the host
//! environment.

use std::path::PathBuf;

use branding::{Identity, PlatformClass};
use logging::{
    ChannelConfig, Configuration, ExecutionContext, HostEnvironment, OutputCondition, Settings,
    Severity,
};

fn host() -> HostEnvironment {
    HostEnvironment::new(Identity::new("Probe", "0.9.0", "LinuxPlayer"))
}

fn distinct_channels() -> Settings {
    Settings {
        debug: ChannelConfig::new(
            OutputCondition::enabled(Severity::Warning),
            OutputCondition::enabled(Severity::Information),
            OutputCondition::enabled(Severity::Debug),
        ),
        file: ChannelConfig::new(
            OutputCondition::enabled(Severity::Error),
            OutputCondition::enabled(Severity::Notice),
            OutputCondition::disabled(),
        ),
        ..Settings::default()
    }
}

// ============================================================================
// Context Selection
// ============================================================================

/// Verifies the default context picks the default conditions.
#[test]
fn default_context_uses_default_conditions() {
    let configuration = Configuration::new(distinct_channels(), host());

    assert_eq!(configuration.context(), ExecutionContext::Default);
    assert_eq!(configuration.resolve_debug_condition().threshold, Severity::Warning);
    assert_eq!(configuration.resolve_file_condition().threshold, Severity::Error);
}

/// Verifies detail mode widens both channels.
#[test]
fn detail_mode_uses_detail_conditions() {
    let configuration = Configuration::new(distinct_channels(), host());
    configuration.set_detail_mode(true);

    assert_eq!(configuration.resolve_debug_condition().threshold, Severity::Information);
    assert_eq!(configuration.resolve_file_condition().threshold, Severity::Notice);

    configuration.set_detail_mode(false);
    assert_eq!(configuration.resolve_debug_condition().threshold, Severity::Warning);
}

/// Verifies the development environment ignores detail mode entirely.
#[test]
fn development_environment_wins_over_detail_mode() {
    let configuration =
        Configuration::new(distinct_channels(), host().with_development(true));

    for detail in [false, true] {
        configuration.set_detail_mode(detail);
        assert_eq!(configuration.context(), ExecutionContext::HostDevelopment);
        assert_eq!(configuration.resolve_debug_condition().threshold, Severity::Debug);
        assert!(!configuration.resolve_file_condition().enabled);
    }
}

// ============================================================================
// Header and Path
// ============================================================================

/// Verifies the header fallback follows identity changes.
#[test]
fn header_fallback_is_not_cached() {
    let environment = host();
    let configuration = Configuration::new(Settings::default(), environment.clone());
    assert_eq!(configuration.header(), "[Probe]");

    environment
        .identity()
        .replace(Identity::new("Second", "1.0.0", "LinuxPlayer"));
    assert_eq!(configuration.header(), "[Second]");
}

/// Verifies the log path resolution across platform classes.
#[test]
fn log_path_depends_on_platform_class() {
    let settings = Settings {
        log_file_path: "session.log".to_owned(),
        append: true,
        ..Settings::default()
    };

    let desktop = Configuration::new(settings.clone(), host());
    assert_eq!(desktop.log_file_path(), PathBuf::from("session.log"));
    assert!(desktop.append_mode());

    let mobile = Configuration::new(
        settings,
        host()
            .with_platform(PlatformClass::Other)
            .with_writable_root("/storage/emulated/0/app"),
    );
    assert_eq!(
        mobile.log_file_path(),
        PathBuf::from("/storage/emulated/0/app/session.log")
    );
}

/// Verifies the default log file name follows the identity.
#[test]
fn default_log_file_name_tracks_identity() {
    let environment = host();
    let configuration = Configuration::new(Settings::default(), environment.clone());
    assert_eq!(configuration.log_file_path(), PathBuf::from("Probe.log"));

    environment.identity().set_name("Later");
    assert_eq!(configuration.log_file_path(), PathBuf::from("Later.log"));
}

// ============================================================================
// Serialization
// ============================================================================

/// Verifies settings parse from JSON with missing fields defaulted.
#[cfg(feature = "serde")]
#[test]
fn settings_parse_with_defaults() {
    let json = r#"{
        "header": "[Game]",
        "append": true,
        "file": {
            "default": { "enabled": true, "threshold": "Warning" },
            "detail": { "enabled": true, "threshold": "Debug" },
            "host_dev": { "enabled": false, "threshold": "Debug" }
        }
    }"#;

    let settings: Settings = serde_json::from_str(json).expect("settings parse");
    assert_eq!(settings.header, "[Game]");
    assert!(settings.append);
    assert_eq!(settings.file.default.threshold, Severity::Warning);
    assert_eq!(settings.debug, ChannelConfig::debug_defaults());
    assert!(settings.log_file_path.is_empty());
}

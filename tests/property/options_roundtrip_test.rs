//! Property-based tests for shell options persistence.
//!
//! Any options value saved by the ConfigEngine loads back equal, and a
//! metadata patch merged into any metadata keeps every field it does not carry.

use proptest::prelude::*;
use tempfile::TempDir;

use tabshell::services::config_engine::{ConfigEngine, ConfigEngineTrait};
use tabshell::types::options::{ShellOptions, SurfaceOptions};
use tabshell::types::tab::TabMetadata;

fn arb_surface_options() -> impl Strategy<Value = SurfaceOptions> {
    (
        prop::option::of("[A-Za-z]{1,8}/[0-9]\\.[0-9]"),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(user_agent, devtools, transparent, autoplay, clipboard)| SurfaceOptions {
            user_agent,
            devtools,
            transparent,
            autoplay,
            clipboard,
        })
}

fn arb_options() -> impl Strategy<Value = ShellOptions> {
    (
        200..4000u32,
        200..3000u32,
        0..400u32,
        "https://[a-z]{1,10}\\.test/",
        "[a-zA-Z ]{0,16}",
        any::<bool>(),
        arb_surface_options(),
        arb_surface_options(),
    )
        .prop_map(
            |(width, height, control_height, start_page, blank_title, debug, control, defaults)| {
                ShellOptions {
                    width,
                    height,
                    control_height,
                    start_page,
                    blank_title,
                    debug,
                    control_surface: control,
                    surface_defaults: defaults,
                    ..ShellOptions::default()
                }
            },
        )
}

fn arb_metadata() -> impl Strategy<Value = TabMetadata> {
    (
        prop::option::of("[a-z]{0,8}"),
        prop::option::of("https://[a-z]{1,6}\\.test/"),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(title, url, is_loading, can_go_back)| TabMetadata {
            title,
            url,
            is_loading,
            can_go_back,
            ..TabMetadata::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn saved_options_load_back_equal(options in arb_options()) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("options.json").to_string_lossy().to_string();

        let mut engine = ConfigEngine::new(Some(path.clone()));
        let document = serde_json::to_value(&options).unwrap();
        for (key, value) in document.as_object().unwrap() {
            engine.set_value(key, value.clone()).unwrap();
        }
        prop_assert_eq!(engine.options(), &options);

        let mut reloaded = ConfigEngine::new(Some(path));
        prop_assert_eq!(reloaded.load().unwrap(), options);
    }

    #[test]
    fn merge_preserves_absent_fields(base in arb_metadata(), patch in arb_metadata()) {
        let mut merged = base.clone();
        merged.merge(patch.clone());

        prop_assert_eq!(merged.title, patch.title.or(base.title));
        prop_assert_eq!(merged.url, patch.url.or(base.url));
        prop_assert_eq!(merged.is_loading, patch.is_loading.or(base.is_loading));
        prop_assert_eq!(merged.can_go_back, patch.can_go_back.or(base.can_go_back));
        prop_assert_eq!(merged.href, base.href);
    }
}

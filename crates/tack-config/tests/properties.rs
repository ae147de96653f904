//! Property-based tests for resolution determinism and merge laws.

use proptest::prelude::*;
use serde_json::{Value, json};
use tack_config::merge::{Trace, apply_overlay, union_into};
use tack_config::{
    ConfigTree, Environment, EnvironmentContext, FlagOverride, MergeMode, Overlay, Resolver,
    Target,
};

fn environment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("development".to_string()),
        Just("staging".to_string()),
        Just("production".to_string()),
        "[a-z]{1,8}",
    ]
}

fn target_strategy() -> impl Strategy<Value = Target> {
    prop::sample::select(Target::ALL.to_vec())
}

fn plugin_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::sample::select(vec!["Notify", "Dialog", "Meta", "Cookies", "AppFullscreen"])
            .prop_map(str::to_string),
        0..=8,
    )
}

/// Flag overrides over a handful of keys, in either mode.
fn flags_strategy() -> impl Strategy<Value = Vec<FlagOverride>> {
    let flag = (
        prop::sample::select(vec![
            "framework.plugins",
            "devServer.port",
            "build.publicPath",
            "extras",
        ]),
        plugin_list(),
        prop::bool::ANY,
    )
        .prop_map(|(key, values, replace)| {
            let value = if key == "devServer.port" {
                json!(values.len() + 8000)
            } else {
                json!(values)
            };
            let mode = if replace {
                MergeMode::Replace
            } else {
                MergeMode::Merge
            };
            let spec = format!("{key}={value}");
            FlagOverride::parse(&spec, mode).unwrap()
        });
    prop::collection::vec(flag, 0..=4)
}

fn plugin_overlay(values: &[String]) -> Overlay {
    Overlay::explicit(
        "plugins",
        ConfigTree::from_value(json!({ "framework": { "plugins": values } })).unwrap(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: resolve(I) == resolve(I), byte for byte.
    #[test]
    fn prop_resolution_is_deterministic(
        app_env in environment_strategy(),
        api in "/[a-z]{0,6}",
        target in target_strategy(),
        flags in flags_strategy(),
    ) {
        let context = EnvironmentContext::from_pairs([
            ("APP_ENV", app_env.as_str()),
            ("APP_API", api.as_str()),
        ]);

        let first = Resolver::default().resolve(&context, target, &flags);
        let second = Resolver::default().resolve(&context, target, &flags);

        prop_assert_eq!(first.to_json(), second.to_json());
        prop_assert_eq!(&first, &second);
    }

    /// Property: applying a merge overlay twice equals applying it once.
    #[test]
    fn prop_union_merge_is_idempotent(base in plugin_list(), incoming in plugin_list()) {
        let mut once = json!({ "framework": { "plugins": base } });
        let mut trace = Trace::default();
        let overlay = plugin_overlay(&incoming);

        apply_overlay(&mut once, &overlay, &mut trace);
        let mut twice = once.clone();
        apply_overlay(&mut twice, &overlay, &mut trace);

        prop_assert_eq!(&once, &twice);
    }

    /// Property: a union never holds duplicates and keeps first-seen order.
    #[test]
    fn prop_union_is_duplicate_free(existing in plugin_list(), incoming in plugin_list()) {
        let mut merged: Vec<Value> = existing.iter().map(|s| json!(s)).collect();
        let incoming: Vec<Value> = incoming.iter().map(|s| json!(s)).collect();
        union_into(&mut merged, &incoming);

        for (i, item) in merged.iter().enumerate() {
            prop_assert!(!merged[i + 1..].contains(item));
        }

        let mut expected: Vec<Value> = Vec::new();
        for item in existing.iter().map(|s| json!(s)).chain(incoming.iter().cloned()) {
            if !expected.contains(&item) {
                expected.push(item);
            }
        }
        prop_assert_eq!(merged, expected);
    }

    /// Property: a recognized APP_ENV is selected as-is, without warnings.
    #[test]
    fn prop_known_environments_are_selected(
        environment in prop::sample::select(Environment::ALL.to_vec()),
        target in target_strategy(),
    ) {
        let context = EnvironmentContext::from_pairs([("APP_ENV", environment.as_str())]);
        let effective = Resolver::default().resolve(&context, target, &[]);
        prop_assert_eq!(effective.environment(), environment);
        prop_assert!(effective.resolution_issues().is_empty());
    }
}

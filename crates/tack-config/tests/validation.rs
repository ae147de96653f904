//! Validator behavior over resolved configurations.

use serde_json::{Value, json};
use tack_config::{
    ConfigCheck, ConfigKey, ConfigTree, EffectiveConfig, Environment, EnvironmentContext,
    IssueKind, Overlay, OverlaySet, Resolver, Target, TargetDescriptor, ValidationIssue,
    Validator, defaults, keys, parse_flags,
};

fn context(pairs: &[(&str, &str)]) -> EnvironmentContext {
    EnvironmentContext::from_pairs(pairs.iter().copied())
}

fn patch(value: Value) -> ConfigTree {
    ConfigTree::from_value(value).expect("table patch")
}

fn router_conflict_resolver() -> Resolver {
    let overlays = OverlaySet::new()
        .with(Overlay::for_environment(
            Environment::Production,
            patch(json!({ "build": { "vueRouterMode": "hash" } })),
        ))
        .with(Overlay::for_target(
            Target::Web,
            patch(json!({ "build": { "vueRouterMode": "history" } })),
        ));
    Resolver::with_overlays(defaults(), overlays)
}

#[test]
fn disagreeing_overlays_on_router_mode_report_one_conflict() {
    let report = router_conflict_resolver().run(&context(&[]), Target::Web, &[]);

    let conflicts: Vec<_> = report.of_kind(IssueKind::ConflictingProtectedKey).collect();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].key.as_str(), keys::ROUTER_MODE);
    assert!(conflicts[0].is_error());
    assert!(conflicts[0].message.contains("env:production"));
    assert!(conflicts[0].message.contains("target:web"));
    assert!(report.has_errors());
    assert!(report.into_result().is_err());
}

#[test]
fn agreeing_overlays_are_not_a_conflict() {
    let overlays = OverlaySet::new()
        .with(Overlay::for_environment(
            Environment::Production,
            patch(json!({ "build": { "vueRouterMode": "history" } })),
        ))
        .with(Overlay::for_target(
            Target::Web,
            patch(json!({ "build": { "vueRouterMode": "history" } })),
        ));
    let report = Resolver::with_overlays(defaults(), overlays).run(&context(&[]), Target::Web, &[]);

    assert_eq!(report.of_kind(IssueKind::ConflictingProtectedKey).count(), 0);
}

#[test]
fn overriding_only_the_default_is_not_a_conflict() {
    let flags = parse_flags(["build.vueRouterMode=history"], []).expect("flags");
    let report = Resolver::default().run(&context(&[]), Target::Web, &flags);

    assert_eq!(report.of_kind(IssueKind::ConflictingProtectedKey).count(), 0);
}

#[test]
fn explicit_replace_settles_a_conflict() {
    let flags = parse_flags([], ["build.vueRouterMode=history"]).expect("flags");
    let report = router_conflict_resolver().run(&context(&[]), Target::Web, &flags);
    assert_eq!(report.of_kind(IssueKind::ConflictingProtectedKey).count(), 0);

    let flags = parse_flags(["build.vueRouterMode=history"], []).expect("flags");
    let report = router_conflict_resolver().run(&context(&[]), Target::Web, &flags);
    assert_eq!(report.of_kind(IssueKind::ConflictingProtectedKey).count(), 1);
}

#[test]
fn extra_protected_keys_are_checked() {
    let overlays = OverlaySet::new()
        .with(Overlay::for_environment(
            Environment::Production,
            patch(json!({ "devServer": { "port": 9000 } })),
        ))
        .with(Overlay::for_target(
            Target::Web,
            patch(json!({ "devServer": { "port": 9100 } })),
        ));
    let resolver = Resolver::with_overlays(defaults(), overlays)
        .protect(ConfigKey::parse("devServer.port").expect("key"));

    let report = resolver.run(&context(&[]), Target::Web, &[]);
    let conflicts: Vec<_> = report.of_kind(IssueKind::ConflictingProtectedKey).collect();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].key.as_str(), "devServer.port");
}

#[test]
fn pwa_without_icons_reports_one_missing_field() {
    let overlays = OverlaySet::new().with(Overlay::for_target(
        Target::Pwa,
        patch(json!({
            "pwa": {
                "workboxMode": "generateSW",
                "manifest": { "name": "Console", "display": "standalone" }
            }
        })),
    ));
    let report = Resolver::with_overlays(defaults(), overlays).run(&context(&[]), Target::Pwa, &[]);

    let missing: Vec<_> = report.of_kind(IssueKind::MissingMandatoryField).collect();
    assert_eq!(missing.len(), 1, "{:?}", report.issues);
    assert_eq!(missing[0].key.as_str(), keys::MANIFEST_ICONS);
    assert_eq!(report.errors().count(), 1);
}

#[test]
fn malformed_icon_entries_are_reported_per_field() {
    let flags = parse_flags(
        [],
        [r#"pwa.manifest.icons=[{"src":"icon.png","sizes":"big","type":"text/plain"},{"sizes":"64x64","type":"image/png"}]"#],
    )
    .expect("flags");
    let report = Resolver::default().run(&context(&[]), Target::Pwa, &flags);

    let keys: Vec<&str> = report
        .of_kind(IssueKind::MissingMandatoryField)
        .map(|issue| issue.key.as_str())
        .collect();
    assert_eq!(
        keys,
        vec![
            "pwa.manifest.icons.0.sizes",
            "pwa.manifest.icons.0.type",
            "pwa.manifest.icons.1.src"
        ]
    );
}

#[test]
fn every_problem_is_collected() {
    let flags = parse_flags(
        [],
        [
            "framework.components=[]",
            "build.vueRouterMode=memory",
            "pwa.manifest.display=tv",
        ],
    )
    .expect("flags");
    let report = Resolver::default().run(&context(&[("APP_ENV", "qa")]), Target::Pwa, &flags);

    assert_eq!(report.of_kind(IssueKind::UnknownEnvironment).count(), 1);
    assert_eq!(report.of_kind(IssueKind::MissingMandatoryField).count(), 1);
    assert_eq!(report.of_kind(IssueKind::InvalidEnumValue).count(), 2);
    assert_eq!(report.errors().count(), 3);
}

struct RequireHttpsApi;

impl ConfigCheck for RequireHttpsApi {
    fn check(
        &self,
        config: &EffectiveConfig,
        _descriptor: &TargetDescriptor,
        issues: &mut Vec<ValidationIssue>,
    ) {
        let key = ConfigKey::parse(keys::APP_API).expect("key");
        if config
            .get_str(&key)
            .is_some_and(|api| api.starts_with("http://"))
        {
            issues.push(ValidationIssue::warning(
                IssueKind::MissingRecommendedField,
                key,
                "API endpoint is not served over https",
            ));
        }
    }
}

#[test]
fn custom_checks_run_after_builtin_ones() {
    let effective = Resolver::default().resolve(
        &context(&[("APP_API", "http://api.internal")]),
        Target::Web,
        &[],
    );
    let issues = Validator::new()
        .with_check(RequireHttpsApi)
        .validate(&effective, &TargetDescriptor::for_target(Target::Web));

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].key.as_str(), keys::APP_API);
}

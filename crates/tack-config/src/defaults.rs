//! Baseline configuration every resolution starts from.
//!
//! Every fallback value used anywhere in the resolver is declared here once.

use std::sync::OnceLock;

use serde_json::{Value, json};

use crate::env::{APP_API, APP_ENV, APP_PUBLIC_PATH};
use crate::tree::ConfigTree;

const DEFAULT_APP_ENV: &str = "production";
const DEFAULT_APP_API: &str = "/api";
const DEFAULT_PUBLIC_PATH: &str = "";

/// Fallback values for every recognized environment variable.
pub fn env_fallbacks() -> &'static [(&'static str, &'static str)] {
    &[
        (APP_ENV, DEFAULT_APP_ENV),
        (APP_API, DEFAULT_APP_API),
        (APP_PUBLIC_PATH, DEFAULT_PUBLIC_PATH),
    ]
}

pub const COMPONENTS: &[&str] = &[
    "QLayout",
    "QHeader",
    "QFooter",
    "QDrawer",
    "QPageContainer",
    "QPage",
    "QPageSticky",
    "QPageScroller",
    "QToolbar",
    "QSpace",
    "QToolbarTitle",
    "QTooltip",
    "QBtn",
    "QIcon",
    "QList",
    "QItem",
    "QExpansionItem",
    "QItemSection",
    "QItemLabel",
    "QTabs",
    "QTab",
    "QRouteTab",
    "QAvatar",
    "QSeparator",
    "QScrollArea",
    "QImg",
    "QBadge",
    "QCard",
    "QCardSection",
    "QCardActions",
    "QBreadcrumbs",
    "QBreadcrumbsEl",
    "QInput",
    "QToggle",
    "QForm",
    "QField",
    "QSelect",
    "QCheckbox",
    "QRadio",
    "QMenu",
    "QAjaxBar",
    "QTable",
    "QTh",
    "QTr",
    "QTd",
    "QFab",
    "QFabAction",
    "QDialog",
    "QUploader",
    "QTree",
    "QChip",
    "QBtnToggle",
];

pub const DIRECTIVES: &[&str] = &["ClosePopup", "Ripple"];

pub const PLUGINS: &[&str] = &["Notify", "Dialog", "LoadingBar"];

/// Icon and font sets shipped with the app.
pub const EXTRAS: &[&str] = &["eva-icons", "roboto-font", "material-icons"];

pub const BROWSER_TARGETS: &[&str] = &["edge88", "firefox78", "chrome87", "safari13.1"];

pub const NODE_TARGET: &str = "node20";

pub const ROUTER_MODE: &str = "hash";

pub const SCOPE_HOISTING: bool = true;

/// `drop_console` and `drop_debugger` outside production.
pub const DROP_DEBUG_OUTPUT: bool = false;

pub const DEV_SERVER_PORT: u16 = 8081;

pub const DEV_SERVER_OPEN: bool = true;

/// Service-worker strategy when no overlay names one.
pub const WORKBOX_MODE: &str = "generateSW";

/// The baseline configuration tree.
///
/// Built once per process; every call returns an identical copy.
pub fn defaults() -> ConfigTree {
    static DEFAULTS: OnceLock<ConfigTree> = OnceLock::new();
    DEFAULTS.get_or_init(build_defaults).clone()
}

fn build_defaults() -> ConfigTree {
    let value = json!({
        "eslint": {
            "warnings": true,
            "errors": true
        },
        "boot": ["api"],
        "css": ["sass/app.scss"],
        "extras": EXTRAS,
        "framework": {
            "components": COMPONENTS,
            "directives": DIRECTIVES,
            "plugins": PLUGINS,
            "config": {
                "notify": {},
                "loadingBar": {
                    "position": "top",
                    "color": "accent",
                    "size": "2px"
                }
            }
        },
        "supportIE": false,
        "build": {
            "target": {
                "browser": BROWSER_TARGETS,
                "node": NODE_TARGET
            },
            "publicPath": DEFAULT_PUBLIC_PATH,
            "env": {
                "APP_ENV": DEFAULT_APP_ENV,
                "APP_API": DEFAULT_APP_API
            },
            "uglifyOptions": {
                "compress": {
                    "drop_console": DROP_DEBUG_OUTPUT,
                    "drop_debugger": DROP_DEBUG_OUTPUT
                }
            },
            "scopeHoisting": SCOPE_HOISTING,
            "vueRouterMode": ROUTER_MODE
        },
        "devServer": {
            "port": DEV_SERVER_PORT,
            "open": DEV_SERVER_OPEN,
            "proxy": {
                "/api": {
                    "target": "http://localhost:8080",
                    "changeOrigin": true
                }
            }
        },
        "animations": Value::Array(Vec::new()),
        "ssr": {
            "pwa": false
        }
    });

    match value {
        Value::Object(map) => ConfigTree::from(map),
        _ => ConfigTree::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{ConfigKey, keys};

    #[test]
    fn defaults_are_stable_across_calls() {
        assert_eq!(defaults(), defaults());
    }

    #[test]
    fn defaults_carry_baseline_sets() {
        let tree = defaults();
        let components = tree
            .get(&ConfigKey::well_known(keys::COMPONENTS))
            .and_then(Value::as_array)
            .unwrap();
        assert_eq!(components.len(), COMPONENTS.len());
        assert_eq!(
            tree.get(&ConfigKey::well_known(keys::DIRECTIVES)),
            Some(&json!(["ClosePopup", "Ripple"]))
        );
        assert_eq!(
            tree.get(&ConfigKey::well_known(keys::ANIMATIONS)),
            Some(&json!([]))
        );
        assert_eq!(
            tree.get_str(&ConfigKey::parse("framework.config.loadingBar.size").unwrap()),
            Some("2px")
        );
    }

    #[test]
    fn env_fallbacks_match_tree_defaults() {
        let tree = defaults();
        assert_eq!(tree.get_str(&ConfigKey::well_known(keys::APP_API)), Some("/api"));
        assert_eq!(tree.get_str(&ConfigKey::well_known(keys::PUBLIC_PATH)), Some(""));
        assert!(env_fallbacks().iter().any(|(k, v)| *k == APP_API && *v == "/api"));
    }
}

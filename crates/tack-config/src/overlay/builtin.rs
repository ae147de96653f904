use serde_json::{Value, json};

use crate::env::Environment;
use crate::overlay::Overlay;
use crate::target::Target;
use crate::tree::ConfigTree;

pub(super) fn overlays() -> Vec<Overlay> {
    let environments = Environment::ALL
        .into_iter()
        .map(|environment| Overlay::for_environment(environment, environment_patch(environment)));
    let targets = Target::ALL
        .into_iter()
        .map(|target| Overlay::for_target(target, target_patch(target)));
    environments.chain(targets).collect()
}

fn environment_patch(environment: Environment) -> ConfigTree {
    let strip_debug = environment == Environment::Production;
    let patch = json!({
        "build": {
            "uglifyOptions": {
                "compress": {
                    "drop_console": strip_debug,
                    "drop_debugger": strip_debug
                }
            }
        }
    });

    tree(patch)
}

fn target_patch(target: Target) -> ConfigTree {
    let patch = match target {
        Target::Web => json!({}),
        Target::Pwa => {
            let icons: Vec<Value> = [128, 192, 256, 384, 512].into_iter().map(icon).collect();
            json!({
                "pwa": {
                    "workboxMode": "injectManifest",
                    "workboxOptions": {
                        "skipWaiting": true,
                        "clientsClaim": true
                    },
                    "manifest": {
                        "display": "standalone",
                        "orientation": "portrait",
                        "background_color": "#ffffff",
                        "theme_color": "#027be3",
                        "icons": icons
                    }
                }
            })
        }
        Target::DesktopShell => json!({
            "electron": {
                "bundler": "packager",
                "packager": {},
                "builder": {}
            }
        }),
        Target::MobileShell => json!({
            "cordova": {}
        }),
    };
    tree(patch)
}

fn icon(size: u32) -> Value {
    json!({
        "src": format!("icons/icon-{size}x{size}.png"),
        "sizes": format!("{size}x{size}"),
        "type": "image/png"
    })
}

fn tree(value: Value) -> ConfigTree {
    match value {
        Value::Object(map) => ConfigTree::from(map),
        _ => ConfigTree::new(),
    }
}

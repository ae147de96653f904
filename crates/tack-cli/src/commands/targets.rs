//! Targets command implementation.

use owo_colors::{OwoColorize, Style};
use serde_json::json;
use tack_target::{all_targets, detect_targets};

use crate::cli::TargetsArgs;
use crate::error::Result;
use crate::ui;

/// Execute the targets command.
///
/// Lists every built-in target with its mandatory and recommended keys,
/// marking the ones detected in the project.
pub fn execute(args: TargetsArgs) -> Result<()> {
    let detected = detect_targets(&args.project);

    if args.json {
        let listing: Vec<_> = all_targets()
            .iter()
            .map(|adapter| {
                json!({
                    "name": adapter.name(),
                    "description": adapter.description(),
                    "detected": detected.contains(&adapter.kind()),
                    "descriptor": adapter.descriptor(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    for adapter in all_targets() {
        let marker = if detected.contains(&adapter.kind()) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:<14} {}",
            marker,
            adapter.name().style(ui::paint(Style::new().bold())),
            adapter.description()
        );

        let descriptor = adapter.descriptor();
        for requirement in &descriptor.mandatory {
            println!("    requires    {}", requirement.key());
        }
        for recommendation in &descriptor.recommended {
            match &recommendation.when {
                Some((key, value)) => println!(
                    "    recommends  {} (when {key} = {value})",
                    recommendation.key
                ),
                None => println!("    recommends  {}", recommendation.key),
            }
        }
    }
    Ok(())
}

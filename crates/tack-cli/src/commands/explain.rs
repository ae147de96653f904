//! Explain command implementation.
//!
//! Shows every assignment to a key (or anything beneath it), grouped by key
//! in the order overlays applied them, followed by the final value.

use owo_colors::{OwoColorize, Style};
use tack_config::{Assignment, ConfigKey, MergeMode};

use crate::cli::ExplainArgs;
use crate::commands::utils::Session;
use crate::error::Result;
use crate::ui;

/// Execute the explain command.
pub fn execute(args: ExplainArgs) -> Result<()> {
    let key = ConfigKey::parse(&args.key)?;
    let session = Session::new(&args.options)?;
    let target = session.single_target("explain")?;

    let effective = session
        .resolver
        .resolve(&session.context, target, &session.flags);

    let assignments: Vec<_> = effective.trace().assignments_under(&key).collect();
    if assignments.is_empty() {
        ui::warning(&format!("No overlay assigned '{key}' for {target}"));
        return Ok(());
    }

    println!(
        "{} ({} / {})",
        key.style(ui::paint(Style::new().bold())),
        effective.environment(),
        target
    );
    for (assigned, assignment) in assignments {
        println!("  {}", describe(&key, assigned, assignment));
    }

    let value = effective
        .get(&key)
        .map(|value| value.to_string())
        .unwrap_or_else(|| "(unset)".to_string());
    println!("  => {value}");
    Ok(())
}

fn describe(requested: &ConfigKey, assigned: &ConfigKey, assignment: &Assignment) -> String {
    let location = if assigned == requested {
        String::new()
    } else {
        format!(" {assigned}")
    };
    let mode = match assignment.mode {
        MergeMode::Merge => "",
        MergeMode::Replace => " (replace)",
    };
    format!(
        "{:<12} {}{}{} = {}",
        format!("{:?}", assignment.stage).to_lowercase(),
        assignment.overlay,
        mode,
        location,
        assignment.value
    )
}

//! The `mathcraft pizza` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use mathcraft_core::geometry::PizzaLayout;

pub fn execute(slices: u32, format: String, output: Option<PathBuf>) -> Result<()> {
    let layout = PizzaLayout::new(slices)?;

    let Some(path) = output else {
        match format.as_str() {
            "svg" => print!("{}", mathcraft_report::pizza_svg(&layout)),
            "json" => println!("{}", serde_json::to_string_pretty(&layout)?),
            other => anyhow::bail!("unknown format: {other} (expected json, svg)"),
        }
        return Ok(());
    };

    match format.as_str() {
        "svg" => mathcraft_report::write_pizza_svg(&layout, &path)?,
        "json" => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, serde_json::to_string_pretty(&layout)?)
                .with_context(|| format!("failed to write pizza to {}", path.display()))?;
        }
        other => anyhow::bail!("unknown format: {other} (expected json, svg)"),
    }
    println!("Pizza written to {}", path.display());

    Ok(())
}

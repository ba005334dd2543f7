//! The `mathcraft validate` command.

use std::path::PathBuf;

use anyhow::Result;

use mathcraft_core::worksheet::Worksheet;

pub fn execute(responses_path: PathBuf) -> Result<()> {
    let worksheet = Worksheet::standard();
    let loaded = mathcraft_core::parser::load_responses(&responses_path)?;

    let mut total_warnings = 0;

    for (path, e) in &loaded.skipped {
        println!("Responses: {}", path.display());
        println!("   ERROR: {e:#}");
    }

    for (path, record) in &loaded.records {
        println!("Responses: {} ({} fields)", path.display(), record.len());

        let warnings = worksheet.validate_record(record);
        for w in &warnings {
            let prefix = w
                .field
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if !loaded.skipped.is_empty() {
        anyhow::bail!("{} responses file(s) could not be parsed", loaded.skipped.len());
    }

    if total_warnings == 0 {
        println!("All responses valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

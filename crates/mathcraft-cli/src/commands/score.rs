//! The `mathcraft score` command.

use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use mathcraft_core::grading::{score, ScoreResult};

#[derive(Serialize)]
struct ScoreOutput<'a> {
    responses: String,
    percentage: f64,
    #[serde(flatten)]
    result: &'a ScoreResult,
}

pub fn execute(
    responses_path: PathBuf,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = mathcraft_core::config::load_config_from(config_path.as_deref())?;
    let key = config.answer_key()?;
    let record = mathcraft_core::parser::parse_responses(&responses_path)?;

    let result = score(&record, &key);
    let percentage = result.percentage(config.percentage_decimals);

    match format.as_str() {
        "json" => {
            let output = ScoreOutput {
                responses: responses_path.display().to_string(),
                percentage,
                result: &result,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => {
            print_outcomes(&result);
            println!("\nScore: {}/{} ({percentage}%)", result.correct, result.total);
        }
    }

    Ok(())
}

fn print_outcomes(result: &ScoreResult) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Question", "Your answer", "Correct"]);

    for outcome in &result.outcomes {
        table.add_row(vec![
            Cell::new(&outcome.question),
            Cell::new(outcome.given.as_deref().unwrap_or("-")),
            Cell::new(if outcome.correct { "yes" } else { "no" }),
        ]);
    }

    println!("{table}");
}

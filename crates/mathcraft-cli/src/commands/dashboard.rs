//! The `mathcraft dashboard` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use mathcraft_core::report::ClassReport;
use mathcraft_core::store::SubmissionLog;
use mathcraft_core::worksheet::Worksheet;

pub fn execute(
    access_code: String,
    log_flag: Option<PathBuf>,
    format: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = super::require_teacher_access(&access_code, config_path.as_deref())?;
    let key = config.answer_key()?;
    let log = SubmissionLog::load_or_default(&super::log_path(log_flag, &config))?;

    let report = ClassReport::build(
        Worksheet::standard().title,
        &log,
        &key,
        config.percentage_decimals,
    );

    let Some(path) = output else {
        let rendered = match format.as_str() {
            "text" => render_text(&report),
            "json" => serde_json::to_string_pretty(&report)?,
            "markdown" | "md" => report.to_markdown(),
            "html" => mathcraft_report::generate_html(&report),
            other => anyhow::bail!("unknown format: {other} (expected text, json, markdown, html)"),
        };
        println!("{rendered}");
        return Ok(());
    };

    match format.as_str() {
        "text" => write_text(&path, &render_text(&report))?,
        "json" => report.save_json(&path)?,
        "markdown" | "md" => write_text(&path, &report.to_markdown())?,
        "html" => mathcraft_report::write_html_report(&report, &path)?,
        other => anyhow::bail!("unknown format: {other} (expected text, json, markdown, html)"),
    }
    println!("Dashboard written to {}", path.display());

    Ok(())
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write dashboard to {}", path.display()))
}

fn render_text(report: &ClassReport) -> String {
    use comfy_table::{Cell, Table};

    let stats = &report.stats;
    let mut out = format!(
        "{}\n{} submission(s), mean {:.1}/{} ({}%)\n",
        report.title,
        stats.submissions,
        stats.mean_correct,
        stats.question_count,
        stats.mean_percentage
    );

    if stats.submissions == 0 {
        out.push_str("No submissions yet.");
        return out;
    }

    let mut students = Table::new();
    students.set_header(vec!["Name", "Date", "Score"]);
    for s in &stats.per_submission {
        students.add_row(vec![
            Cell::new(&s.name),
            Cell::new(&s.date),
            Cell::new(format!("{}/{}", s.correct, s.total)),
        ]);
    }

    let mut questions = Table::new();
    questions.set_header(vec!["Question", "Correct", "Unanswered", "Rate"]);
    for q in &stats.per_question {
        questions.add_row(vec![
            Cell::new(&q.question),
            Cell::new(q.correct),
            Cell::new(q.unanswered),
            Cell::new(format!("{:.1}%", q.correct_rate * 100.0)),
        ]);
    }

    out.push_str(&format!("\n{students}\n\n{questions}"));
    out
}

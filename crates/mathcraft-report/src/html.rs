//! Teacher dashboard as a single HTML page.
//!
//! Styles and the table-sorting script are inlined so the file can be
//! opened straight from disk or mailed around.

use std::path::Path;

use anyhow::{Context, Result};

use mathcraft_core::report::ClassReport;
use mathcraft_core::statistics::{AggregateStats, QuestionStats, SubmissionScore};

/// Escape text for use in element content and quoted attributes.
pub(crate) fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the class dashboard.
pub fn generate_html(report: &ClassReport) -> String {
    let stats = &report.stats;
    let title = html_escape(&report.title);
    let mut page = String::new();

    page.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>mathcraft dashboard: {title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n"
    ));

    page.push_str(&format!(
        "<header>\n<h1>{title}</h1>\n<p class=\"meta\">{} submission(s) \u{b7} {} questions \u{b7} generated {}</p>\n</header>\n",
        stats.submissions,
        stats.question_count,
        report.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    page.push_str("<main>\n");
    if stats.submissions == 0 {
        page.push_str("<p class=\"empty\">No submissions yet.</p>\n");
    } else {
        write_summary(&mut page, stats);
        write_question_chart(&mut page, &stats.per_question);
        write_students(&mut page, &stats.per_submission);
    }

    let json = serde_json::to_string_pretty(report).unwrap_or_default();
    page.push_str(&format!(
        "<details class=\"raw\">\n<summary>Report JSON</summary>\n<pre>{}</pre>\n</details>\n",
        html_escape(&json)
    ));
    page.push_str("</main>\n");

    page.push_str(&format!("<script>{SORT_SCRIPT}</script>\n</body>\n</html>\n"));
    page
}

/// Write the dashboard to `path`, creating parent directories.
pub fn write_html_report(report: &ClassReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, generate_html(report))
        .with_context(|| format!("failed to write dashboard to {}", path.display()))
}

fn write_summary(page: &mut String, stats: &AggregateStats) {
    page.push_str(&format!(
        "<section class=\"cards\">\n\
         <div class=\"card\"><span>Class average</span><strong>{:.1} / {}</strong></div>\n\
         <div class=\"card\"><span>Average %</span><strong>{}%</strong></div>\n\
         <div class=\"card\"><span>Lowest</span><strong>{}</strong></div>\n\
         <div class=\"card\"><span>Highest</span><strong>{}</strong></div>\n\
         </section>\n",
        stats.mean_correct,
        stats.question_count,
        stats.mean_percentage,
        stats.min_correct,
        stats.max_correct
    ));
}

/// Horizontal bars, one per question, scaled to the correct rate.
fn write_question_chart(page: &mut String, questions: &[QuestionStats]) {
    const ROW: usize = 26;
    const LABEL: usize = 56;
    const BAR: f64 = 360.0;

    let height = questions.len() * ROW + 8;
    page.push_str(&format!(
        "<section>\n<h2>Questions</h2>\n<svg class=\"chart\" width=\"{}\" height=\"{height}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        LABEL + BAR as usize + 64
    ));

    for (row, q) in questions.iter().enumerate() {
        let y = row * ROW + 4;
        let width = (q.correct_rate * BAR).round();
        let tone = match q.correct_rate {
            r if r >= 0.75 => "good",
            r if r >= 0.5 => "fair",
            _ => "weak",
        };
        page.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" text-anchor=\"end\">{}</text>\n  \
             <rect class=\"{tone}\" x=\"{LABEL}\" y=\"{y}\" width=\"{width}\" height=\"{}\" rx=\"3\"/>\n  \
             <text x=\"{}\" y=\"{}\">{:.1}%</text>\n",
            LABEL - 8,
            y + ROW / 2 + 4,
            html_escape(&q.question),
            ROW - 6,
            LABEL as f64 + width + 6.0,
            y + ROW / 2 + 4,
            q.correct_rate * 100.0
        ));
    }

    page.push_str("</svg>\n</section>\n");
}

fn write_students(page: &mut String, students: &[SubmissionScore]) {
    page.push_str(
        "<section>\n<h2>Students</h2>\n<table id=\"students\">\n\
         <thead><tr><th data-col=\"0\">Name</th><th data-col=\"1\">Date</th><th data-col=\"2\">Score</th></tr></thead>\n<tbody>\n",
    );

    for s in students {
        let standing = if s.total > 0 && s.correct * 2 >= s.total {
            "pass"
        } else {
            "fail"
        };
        page.push_str(&format!(
            "<tr class=\"{standing}\"><td>{}</td><td>{}</td><td data-sort=\"{}\">{}/{}</td></tr>\n",
            html_escape(&s.name),
            html_escape(&s.date),
            s.correct,
            s.correct,
            s.total
        ));
    }

    page.push_str("</tbody>\n</table>\n</section>\n");
}

const STYLE: &str = r#"
:root { --paper: #fdfcf7; --ink: #23231f; --rule: #d9d4c3; --good: #2f9e44; --fair: #e8a317; --weak: #d9480f; }
body { margin: 0 auto; max-width: 60rem; padding: 1.5rem; font-family: Georgia, 'Times New Roman', serif; background: var(--paper); color: var(--ink); }
header h1 { margin-bottom: 0.25rem; }
.meta, .empty { color: #6f6a5a; }
.cards { display: flex; gap: 1rem; flex-wrap: wrap; margin: 1.5rem 0; }
.card { border: 1px solid var(--rule); border-radius: 6px; padding: 0.75rem 1.25rem; min-width: 9rem; }
.card span { display: block; font-size: 0.8rem; text-transform: uppercase; color: #6f6a5a; }
.card strong { font-size: 1.5rem; }
.chart text { font-size: 13px; fill: var(--ink); }
.chart .good { fill: var(--good); }
.chart .fair { fill: var(--fair); }
.chart .weak { fill: var(--weak); }
#students { border-collapse: collapse; width: 100%; }
#students th, #students td { border-bottom: 1px solid var(--rule); padding: 0.4rem 0.8rem; text-align: left; }
#students th { cursor: pointer; user-select: none; }
tr.pass td:last-child { color: var(--good); }
tr.fail td:last-child { color: var(--weak); }
.raw { margin-top: 2rem; }
.raw pre { overflow-x: auto; font-size: 0.8rem; background: #f1eee3; padding: 1rem; }
"#;

const SORT_SCRIPT: &str = r#"
document.querySelectorAll('#students th').forEach(th => {
  th.addEventListener('click', () => {
    const table = th.closest('table');
    const body = table.tBodies[0];
    const col = Number(th.dataset.col);
    const desc = table.dataset.col === th.dataset.col && table.dataset.dir !== 'desc';
    const key = row => {
      const cell = row.cells[col];
      return cell.dataset.sort !== undefined ? Number(cell.dataset.sort) : cell.textContent.toLowerCase();
    };
    const rows = Array.from(body.rows).sort((a, b) => {
      const ka = key(a), kb = key(b);
      const order = ka < kb ? -1 : ka > kb ? 1 : 0;
      return desc ? -order : order;
    });
    table.dataset.col = th.dataset.col;
    table.dataset.dir = desc ? 'desc' : 'asc';
    rows.forEach(r => body.appendChild(r));
  });
});
"#;

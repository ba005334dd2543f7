//! The `mathcraft init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("mathcraft.toml").exists() {
        println!("mathcraft.toml already exists, skipping.");
    } else {
        std::fs::write("mathcraft.toml", SAMPLE_CONFIG)?;
        println!("Created mathcraft.toml");
    }

    if std::path::Path::new("responses.toml").exists() {
        println!("responses.toml already exists, skipping.");
    } else {
        std::fs::write("responses.toml", BLANK_RESPONSES)?;
        println!("Created responses.toml");
    }

    println!("\nNext steps:");
    println!("  1. Set teacher_access_code in mathcraft.toml");
    println!("  2. Fill in responses.toml");
    println!("  3. Run: mathcraft score --responses responses.toml");
    println!("  4. Run: mathcraft submit --responses responses.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# mathcraft configuration

# Code that unlocks `dashboard` and `export`. Not a password.
teacher_access_code = "${MATHCRAFT_ACCESS_CODE}"

log_path = "./mathcraft-submissions.json"
percentage_decimals = 0

# Uncomment to replace the built-in answers. Must list Q1 through Q12.
# [answer_key]
# Q1 = "5 · x"
"#;

const BLANK_RESPONSES: &str = r#"[student]
name = ""
date = ""

[reflections]
Analytical_1 = ""
Analytical_2 = ""
Analytical_3 = ""
Analytical_4 = ""

# Copy each answer exactly as it appears in the options,
# e.g. Q1 = "5 · x". Leave a question out to skip it.
[answers]
"#;

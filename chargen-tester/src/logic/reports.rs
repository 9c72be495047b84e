use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use super::SweepResult;

fn success_rate(results: &[SweepResult]) -> f64 {
    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let rate = (passed as f64 / total as f64) * 100.0;
    rate
}

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[SweepResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Sweep Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "========================".cyan())?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out, "Rule systems: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", success_rate(results))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(out, "{} {}", status, result.rules.bold())?;
        writeln!(
            out,
            "   Documents: {}/{} clean",
            result.successful_documents, result.documents_checked
        )?;
        writeln!(out, "   Average time: {:?}", result.average_duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, results: &[SweepResult]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, results)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, results: &[SweepResult]) -> Result<()> {
    writeln!(out, "# Chargen Sweep Results\n")?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Rule systems**: {total}")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}", total - passed)?;
    writeln!(out, "- **Success rate**: {:.1}%\n", success_rate(results))?;

    writeln!(out, "## Detailed Results\n")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(out, "### {status} {}\n", result.rules)?;
        writeln!(
            out,
            "- **Documents**: {}/{} clean",
            result.successful_documents, result.documents_checked
        )?;
        writeln!(out, "- **Average time**: {:?}", result.average_duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(passed: bool) -> SweepResult {
        SweepResult {
            rules: if passed { "cod" } else { "vtr2" }.to_string(),
            passed,
            documents_checked: 2,
            successful_documents: if passed { 2 } else { 1 },
            failures: if passed {
                Vec::new()
            } else {
                vec!["seed 7: Disciplines sum to 4, expected 3".to_string()]
            },
            average_duration: Duration::from_micros(40),
            performance_data: vec![Duration::from_micros(40); 2],
        }
    }

    #[test]
    fn markdown_report_lists_failures() {
        let mut buf = Vec::new();
        generate_markdown_report(&mut buf, &[sample(true), sample(false)]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("# Chargen Sweep Results"));
        assert!(text.contains("- **Success rate**: 50.0%"));
        assert!(text.contains("### ❌ vtr2"));
        assert!(text.contains("Disciplines sum to 4"));
    }

    #[test]
    fn json_report_is_an_array() {
        let mut buf = Vec::new();
        generate_json_report(&mut buf, &[sample(true)]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["rules"], "cod");
        assert_eq!(value[0]["passed"], true);
    }

    #[test]
    fn console_report_counts_results() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        generate_console_report(&mut buf, &[sample(true)], Duration::from_millis(3)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Rule systems: 1"));
        assert!(text.contains("✅ PASS cod"));
        assert_eq!(success_rate(&[]), 0.0);
    }
}

//! Report rendering.
//!
//! The analysis summary is Markdown so the same text can be printed and
//! saved. The update report is plain text for the terminal.

use fueltune::analysis::{Analysis, CellSummary, Regime};
use fueltune::update::UpdateReport;

const NO_DATA: &str = "_No data available._";

/// Section heading for a regime.
fn heading(regime: Regime) -> &'static str {
    match regime {
        Regime::Enriched => "### Open-Loop Fueling (PE) Summary",
        Regime::ClosedLoop => "### Closed-Loop Fueling Summary",
    }
}

fn columns(regime: Regime) -> [&'static str; 8] {
    match regime {
        Regime::Enriched => [
            "RPM",
            "Load",
            "Samples",
            "Mean Error (%)",
            "Median Ratio",
            "P95 Ratio",
            "Current",
            "Suggested",
        ],
        Regime::ClosedLoop => [
            "RPM",
            "Load",
            "Samples",
            "Mean Trim (%)",
            "Median Trim (%)",
            "P95 Trim (%)",
            "Current",
            "Suggested",
        ],
    }
}

/// Render one regime's summaries as a Markdown section.
pub fn render_section(regime: Regime, summaries: &[CellSummary]) -> String {
    let mut lines = vec![heading(regime).to_string(), String::new()];

    if summaries.is_empty() {
        lines.push(NO_DATA.to_string());
        return to_text(lines);
    }

    lines.push(format!("| {} |", columns(regime).join(" | ")));
    lines.push(format!("|{}", "---:|".repeat(8)));
    lines.extend(summaries.iter().map(|s| {
        format!(
            "| {:.0} | {:.3} | {} | {:.3} | {:.3} | {:.3} | {:.3} | {:.3} |",
            s.rpm,
            s.load,
            s.samples(),
            s.error_pct(),
            s.stats.median,
            s.stats.p95,
            s.current_value,
            s.suggested_value
        )
    }));
    to_text(lines)
}

/// Render the full Markdown summary: enriched section, then closed-loop.
pub fn render_summary(analysis: &Analysis) -> String {
    format!(
        "{}\n{}",
        render_section(Regime::Enriched, &analysis.enriched),
        render_section(Regime::ClosedLoop, &analysis.closed_loop)
    )
}

/// Render the outcome of a tune update, including any clamped cells.
pub fn render_update(report: &UpdateReport) -> String {
    let limit = report.change_limit_pct;
    let mut lines = vec![
        format!("Modified tune file saved to: {}", report.output.display()),
        format!(
            "Template: {} ({})",
            report.template.display(),
            report.template_origin
        ),
        format!(
            "Applied {} fuel_base modifications (limit: +/-{}% from source).",
            report.applied, limit
        ),
    ];
    if report.skipped > 0 {
        lines.push(format!(
            "Skipped {} modifications that could not be applied; see log for details.",
            report.skipped
        ));
    }

    if !report.clamped.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "WARNING: {} modifications exceeded the +/-{}% limit and were clamped:",
            report.clamped.len(),
            limit
        ));
        lines.push("   RPM     Load    Original  Suggested  Clamped   Change%  Source".to_string());
        lines.push(format!("   {}", "-".repeat(65)));
        lines.extend(report.clamped.iter().map(|m| {
            format!(
                "   {:5.0}   {:5.3}   {:7.1}   {:8.1}   {:7.1}   {:6.1}%  {}",
                m.rpm,
                m.load,
                m.source_value,
                m.suggested_value,
                m.clamped_value,
                m.change_pct,
                m.regime
            )
        }));
    }
    to_text(lines)
}

/// Join lines, ending with a newline.
fn to_text(lines: Vec<String>) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

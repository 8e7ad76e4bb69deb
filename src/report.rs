//! Plain-text summary of an assessment, for terminals and logs.

use std::fmt::Write;

use crate::engine::Assessment;

/// Signed, thousands-grouped contract count: `+4,380`, `-8,384`, `0`.
pub fn format_change(change: i64) -> String {
    let digits = change.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match change.signum() {
        1 => format!("+{grouped}"),
        -1 => format!("-{grouped}"),
        _ => grouped,
    }
}

pub fn render_text(assessment: &Assessment) -> String {
    let snapshot = &assessment.snapshot;
    let score = &assessment.score;
    let mut out = String::new();

    let _ = writeln!(out, "{} - FII DII FNO ACTIVITY", snapshot.date);
    for category in &snapshot.categories {
        let _ = writeln!(out, "{}", category.name);
        for line in &category.instruments {
            let _ = writeln!(
                out,
                "  {:<8} {:>12}  {:<16} {}",
                line.kind.as_str(),
                format_change(line.change),
                line.activity,
                line.trend
            );
        }
    }
    let _ = writeln!(
        out,
        "OVERALL TREND: {} (bearish {:.1}% / bullish {:.1}%)",
        snapshot.overall_trend,
        score.bearish_pct(),
        score.bullish_pct()
    );
    out
}

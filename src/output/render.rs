use std::fmt::Write as _;

use super::CompoundRow;

/// Render display rows as an aligned plain-text table
pub fn render_table(rows: &[CompoundRow]) -> String {
    let headers = CompoundRow::headers();
    let cells: Vec<[String; 8]> = rows.iter().map(CompoundRow::cells).collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &cells {
        push_line(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

/// One-line run summary
pub fn summary_line(identified: usize) -> String {
    format!("Identified {} target compounds.", identified)
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            // Name column left-aligned, numbers right-aligned
            if i == 1 {
                format!("{:<width$}", cell)
            } else {
                format!("{:>width$}", cell)
            }
        })
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}

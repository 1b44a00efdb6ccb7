//! Status report generation.
//!
//! This module renders aggregated member totals into the project status
//! report: a fixed-width plain-text table or HTML table markup, plus the
//! per-activity breakdown table with a project total row.

use crate::models::{
    format_hours, DateWindow, MemberTotals, ProjectTotals, KNOWN_ACTIVITY_CODES,
};

/// Member name column width in the plain-text table.
const NAME_WIDTH: usize = 24;
/// Period hours column width in the plain-text table.
const PERIOD_WIDTH: usize = 16;
/// Width of the section separator lines.
const RULE_WIDTH: usize = 48;

/// How the member table is rendered inside the status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    /// Fixed-width plain-text columns (default).
    #[default]
    Plain,
    /// HTML `wikitable` markup.
    Html,
}

/// Column alignment for fixed-width text cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    #[allow(dead_code)] // For future numeric columns
    Right,
}

/// Pad `text` to `width` with spaces; text longer than the column is kept
/// whole rather than truncated.
pub fn pad(text: &str, width: usize, align: Alignment) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let fill = " ".repeat(width - len);
    match align {
        Alignment::Left => format!("{}{}", text, fill),
        Alignment::Right => format!("{}{}", fill, text),
    }
}

/// Escape the HTML-significant characters in untrusted text.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Generate the full project status report.
///
/// The member table carries one row per member with period hours and
/// all-time hours; the surrounding scaffold names the project and period and
/// leaves the narrative sections to be filled in by hand. Output is
/// deterministic for deterministic input.
pub fn generate_status_report(
    project_name: &str,
    window: &DateWindow,
    members: &[MemberTotals],
    format: TableFormat,
) -> String {
    let table = match format {
        TableFormat::Plain => generate_plain_table(members),
        TableFormat::Html => generate_html_table(members),
    };

    format!(
        "\
PROJECT STATUS REPORT

{}{}
{}{}

{}

Current project state
{rule}


Completed documents (title and link)
{rule}


Deviations / management comments
{rule}
",
        pad("Project name:", NAME_WIDTH, Alignment::Left),
        project_name,
        pad("Period:", NAME_WIDTH, Alignment::Left),
        window,
        table,
        rule = "-".repeat(RULE_WIDTH),
    )
}

/// The fixed-width plain-text member table.
fn generate_plain_table(members: &[MemberTotals]) -> String {
    let mut table = String::new();

    table.push_str(&pad("Member", NAME_WIDTH, Alignment::Left));
    table.push_str(&pad("In period", PERIOD_WIDTH, Alignment::Left));
    table.push_str("Total hours\n");
    table.push_str(&"-".repeat(NAME_WIDTH + PERIOD_WIDTH + "Total hours".len()));

    for member in members {
        table.push('\n');
        table.push_str(&pad(&member.name, NAME_WIDTH, Alignment::Left));
        table.push_str(&pad(
            &format_hours(member.window_hours),
            PERIOD_WIDTH,
            Alignment::Left,
        ));
        table.push_str(&format_hours(member.total_hours));
    }

    table
}

/// The HTML member table.
fn generate_html_table(members: &[MemberTotals]) -> String {
    let mut table = String::from(
        "<table class=\"wikitable\" border=\"1\" style=\"border-collapse: collapse\">\n\
         <tr><th>Member</th><th>In period</th><th>Total hours</th></tr>",
    );

    for member in members {
        table.push_str(&format!(
            "\n<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&member.name),
            format_hours(member.window_hours),
            format_hours(member.total_hours),
        ));
    }

    table.push_str("\n</table>");
    table
}

/// Generate the per-activity breakdown table.
///
/// One column per activity code plus an all-time total, one row per member,
/// and a bold project `Total` row. Known codes come first in their fixed
/// order; codes seen only at runtime follow alphabetically.
pub fn generate_breakdown_report(members: &[MemberTotals], project: &ProjectTotals) -> String {
    let codes = breakdown_codes(project);

    let mut table = String::from(
        "<table class=\"wikitable\" border=\"1\" style=\"border-collapse: collapse\">\n<tr><th>Member</th>",
    );
    for code in &codes {
        table.push_str(&format!("<th>{}</th>", escape_html(code)));
    }
    table.push_str("<th>Total hours</th></tr>\n");

    for member in members {
        table.push_str(&format!("<tr><td>{}</td>", escape_html(&member.name)));
        for code in &codes {
            let hours = member.per_activity.get(code).copied().unwrap_or(0.0);
            table.push_str(&format!("<td>{}</td>", format_hours(hours)));
        }
        table.push_str(&format!(
            "<td>{}</td></tr>\n",
            format_hours(member.total_hours)
        ));
    }

    table.push_str("<tr><td><b>Total</b></td>");
    for code in &codes {
        let hours = project.per_activity.get(code).copied().unwrap_or(0.0);
        table.push_str(&format!("<td><b>{}</b></td>", format_hours(hours)));
    }
    table.push_str(&format!(
        "<td><b>{}</b></td></tr>\n</table>",
        format_hours(project.total_hours)
    ));

    table
}

/// Breakdown column order: the known code list, then any other codes that
/// actually accumulated, alphabetically.
fn breakdown_codes(project: &ProjectTotals) -> Vec<String> {
    let mut codes: Vec<String> = KNOWN_ACTIVITY_CODES.iter().map(|c| c.to_string()).collect();
    for code in project.per_activity.keys() {
        if !KNOWN_ACTIVITY_CODES.contains(&code.as_str()) {
            codes.push(code.clone());
        }
    }
    codes
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn member(name: &str, window_hours: f64, total_hours: f64) -> MemberTotals {
        MemberTotals {
            name: name.to_string(),
            report_url: format!("http://example.org/{}", name),
            total_hours,
            window_hours,
            per_activity: BTreeMap::new(),
        }
    }

    fn test_window() -> DateWindow {
        DateWindow::new(
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 6).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_pad_left_and_right() {
        assert_eq!(pad("ab", 5, Alignment::Left), "ab   ");
        assert_eq!(pad("ab", 5, Alignment::Right), "   ab");
        assert_eq!(pad("abcdef", 5, Alignment::Left), "abcdef");
    }

    #[test]
    fn test_plain_report_layout() {
        let members = vec![member("alice", 5.0, 6.0)];
        let report =
            generate_status_report("skynet", &test_window(), &members, TableFormat::Plain);

        assert!(report.contains("PROJECT STATUS REPORT"));
        assert!(report.contains("skynet"));
        assert!(report.contains("01.01.2020 - 06.01.2020"));
        // Fixed-width columns: 24-char name, 16-char period hours
        assert!(report.contains("alice                   5.0             6.0"));
        assert!(report.contains("Current project state"));
    }

    #[test]
    fn test_html_report_table() {
        let members = vec![member("alice", 5.0, 6.0)];
        let report = generate_status_report("skynet", &test_window(), &members, TableFormat::Html);

        assert!(report.contains("<table class=\"wikitable\""));
        assert!(report.contains("<th>Member</th><th>In period</th><th>Total hours</th>"));
        assert!(report.contains("<tr><td>alice</td><td>5.0</td><td>6.0</td></tr>"));
    }

    #[test]
    fn test_html_and_plain_carry_the_same_numbers() {
        let members = vec![member("alice", 5.0, 6.0), member("bob", 2.5, 2.5)];
        let plain =
            generate_status_report("skynet", &test_window(), &members, TableFormat::Plain);
        let html = generate_status_report("skynet", &test_window(), &members, TableFormat::Html);

        for value in ["5.0", "6.0", "2.5"] {
            assert!(plain.contains(value));
            assert!(html.contains(value));
        }
    }

    #[test]
    fn test_member_names_are_escaped_in_html() {
        let members = vec![member("<script>alert(1)</script>", 0.0, 0.0)];
        let html = generate_status_report("skynet", &test_window(), &members, TableFormat::Html);

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_breakdown_table_has_code_columns_and_total_row() {
        let mut alice = member("alice", 5.0, 6.0);
        alice.per_activity.insert("ME".to_string(), 3.0);
        alice.per_activity.insert("LC".to_string(), 3.0);

        let mut project = ProjectTotals::default();
        project.merge(&alice);

        let table = generate_breakdown_report(&[alice], &project);

        assert!(table.contains("<th>ME</th>"));
        assert!(table.contains("<th>RD</th>"));
        assert!(table.contains("<tr><td><b>Total</b></td>"));
        assert!(table.contains("<td><b>6.0</b></td></tr>\n</table>"));
    }

    #[test]
    fn test_breakdown_unseen_known_codes_render_zero() {
        let mut alice = member("alice", 2.0, 2.0);
        alice.per_activity.insert("ME".to_string(), 2.0);

        let mut project = ProjectTotals::default();
        project.merge(&alice);

        let table = generate_breakdown_report(&[alice], &project);
        // 10 known codes never logged render as 0.0 cells
        assert!(table.contains("<td>0.0</td>"));
    }

    #[test]
    fn test_breakdown_unknown_codes_follow_known_ones() {
        let mut alice = member("alice", 1.0, 1.0);
        alice.per_activity.insert("ZZ".to_string(), 1.0);

        let mut project = ProjectTotals::default();
        project.merge(&alice);

        let table = generate_breakdown_report(&[alice], &project);
        let rd = table.find("<th>RD</th>").unwrap();
        let zz = table.find("<th>ZZ</th>").unwrap();
        assert!(zz > rd);
    }
}

//! Plain-text rendering of reports for the terminal.

use f77tool_types::{ActionKind, Detection, Suffix, SuffixPartition, ToolReport};
use std::collections::BTreeMap;

pub fn render_report_text(report: &ToolReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} tool ({})\n\n", report.tool, report.schema));
    out.push_str(&format!(
        "- Filesystem: {}\n",
        if report.case_sensitive {
            "case-sensitive"
        } else {
            "case-insensitive"
        }
    ));
    out.push_str(&format!(
        "- Compiler: {} ({})\n",
        report.program,
        match &report.detection {
            Detection::Found(_) => "found",
            Detection::NotFound => "not found, using fallback",
        }
    ));
    out.push_str(&render_suffixes_text(&report.suffixes));

    out.push_str("\nStatic object builder\n");
    render_bindings(&mut out, &report.bindings.static_obj);
    out.push_str("\nShared object builder\n");
    render_bindings(&mut out, &report.bindings.shared_obj);

    out.push_str("\nVariables\n");
    let width = report.vars.keys().map(String::len).max().unwrap_or(0);
    for (name, value) in &report.vars {
        out.push_str(&format!("  {:<width$} = {}\n", name, value));
    }

    if !report.expanded.is_empty() {
        out.push_str("\nExpanded\n");
        let width = report.expanded.keys().map(String::len).max().unwrap_or(0);
        for (name, value) in &report.expanded {
            out.push_str(&format!("  {:<width$} = {}\n", name, value));
        }
    }
    out
}

pub fn render_suffixes_text(partition: &SuffixPartition) -> String {
    format!(
        "- Plain suffixes: {}\n- Preprocessed suffixes: {}\n",
        partition.plain().as_strs().join(" "),
        partition.preprocessed().as_strs().join(" ")
    )
}

fn render_bindings(out: &mut String, bindings: &BTreeMap<Suffix, ActionKind>) {
    if bindings.is_empty() {
        out.push_str("  (none)\n");
        return;
    }
    let width = bindings.keys().map(|s| s.as_str().len()).max().unwrap_or(0);
    for (suffix, action) in bindings {
        out.push_str(&format!("  {:<width$} {}\n", suffix.as_str(), action.name()));
    }
}

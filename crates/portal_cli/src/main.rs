//! Dashboard preview entry point.
//!
//! # Responsibility
//! - Render a dashboard document as plain text, one widget per line.
//! - Exit non-zero with a readable message on bad input.
//!
//! Usage: `portal_cli <dashboard.json> [student]`

use portal_core::{build_dashboard, DashboardDocument, StudentFilter, ALL_STUDENTS};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: portal_cli <dashboard.json> [student]");
        return ExitCode::from(2);
    };
    let filter = StudentFilter::parse(args.next().as_deref().unwrap_or(ALL_STUDENTS));

    match run(&path, filter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("portal_cli: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(path: &str, filter: StudentFilter) -> Result<(), String> {
    let raw = std::fs::read_to_string(path).map_err(|err| format!("cannot read `{path}`: {err}"))?;
    let document = DashboardDocument::from_json_str(&raw).map_err(|err| err.to_string())?;
    let dashboard = build_dashboard(&document.students, filter, &document.widget_config())
        .map_err(|err| err.to_string())?;

    println!(
        "portal_core version={} parent={} filter={}",
        portal_core::core_version(),
        document.parent.name,
        dashboard.filter
    );
    for widget in dashboard.rendered() {
        println!(
            "{:<16} {:<28} rows={}",
            widget.key.as_str(),
            widget.key.title(),
            widget.view.row_count()
        );
    }
    for issue in &dashboard.issues {
        println!("warning[{}]: {issue}", issue.code());
    }
    Ok(())
}

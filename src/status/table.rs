//! Text rendering of status rows
//!
//! Coloring goes through `colored`, so `--no-color` and `NO_COLOR` are
//! honored through its global override.

use super::{StatusRow, SyncState};
use colored::*;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Shown instead of an empty table
pub const EMPTY_MESSAGE: &str = "No checked-out repositories to report.";

#[derive(Tabled)]
struct DisplayRow {
    #[tabled(rename = "Repository")]
    name: String,
    #[tabled(rename = "Config Ref")]
    config_ref: String,
    #[tabled(rename = "Local Branch/Rev")]
    local_ref: String,
    #[tabled(rename = "Remote Rev")]
    remote_ref: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&StatusRow> for DisplayRow {
    fn from(row: &StatusRow) -> Self {
        Self {
            name: row.name.clone(),
            config_ref: row.config_ref.clone(),
            local_ref: row.local_ref.clone(),
            remote_ref: row.remote_ref.clone(),
            status: paint(row.state),
        }
    }
}

fn paint(state: SyncState) -> String {
    let label = state.label();
    match state {
        SyncState::Clean => label.to_string(),
        SyncState::Unpushed => label.red().bold().to_string(),
        SyncState::Pullable => label.yellow().to_string(),
        SyncState::Conflict => label.magenta().bold().to_string(),
    }
}

/// Render rows as a bordered table, in the order given
pub fn render(rows: &[StatusRow]) -> String {
    if rows.is_empty() {
        return format!("{EMPTY_MESSAGE}\n");
    }

    let mut table = Table::new(rows.iter().map(DisplayRow::from));
    table.with(Style::rounded());
    format!("{table}\n")
}

/// One-line count per state, e.g. `3 repositories: 2 clean, 1 unpushed`
pub fn summarize(rows: &[StatusRow]) -> String {
    let parts: Vec<String> = [
        SyncState::Clean,
        SyncState::Unpushed,
        SyncState::Pullable,
        SyncState::Conflict,
    ]
    .into_iter()
    .filter_map(|state| {
        let count = rows.iter().filter(|row| row.state == state).count();
        (count > 0).then(|| format!("{count} {}", state.label()))
    })
    .collect();

    let noun = if rows.len() == 1 { "repository" } else { "repositories" };
    if parts.is_empty() {
        format!("{} {noun}", rows.len())
    } else {
        format!("{} {noun}: {}", rows.len(), parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn row(name: &str, state: SyncState) -> StatusRow {
        StatusRow {
            name: name.to_string(),
            config_ref: "main".to_string(),
            local_ref: "main/abc1234".to_string(),
            remote_ref: "abc1234".to_string(),
            state,
            path: PathBuf::from(name),
            branch: Some("main".to_string()),
            detached: false,
            local_hash: String::new(),
            remote_hash: String::new(),
        }
    }

    #[test]
    fn test_render_headers_and_rows() {
        let output = render(&[row("api", SyncState::Clean), row("web", SyncState::Unpushed)]);

        for header in ["Repository", "Config Ref", "Local Branch/Rev", "Remote Rev", "Status"] {
            assert!(output.contains(header), "missing header {header}");
        }
        assert!(output.contains("main/abc1234"));
        assert!(output.contains("clean"));
        assert!(output.contains("unpushed"));

        let api = output.find("api").unwrap();
        let web = output.find("web").unwrap();
        assert!(api < web);
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[]), format!("{EMPTY_MESSAGE}\n"));
    }

    #[test]
    fn test_clean_status_is_never_colored() {
        assert_eq!(paint(SyncState::Clean), "clean");
    }

    #[test]
    fn test_summarize() {
        let rows = vec![
            row("a", SyncState::Clean),
            row("b", SyncState::Clean),
            row("c", SyncState::Conflict),
        ];
        assert_eq!(summarize(&rows), "3 repositories: 2 clean, 1 conflict");
        assert_eq!(summarize(&[]), "0 repositories");
        assert_eq!(summarize(&rows[..1]), "1 repository: 1 clean");
    }
}

//! Rendering of the sorted vacation list.

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;
use vacations::{SortedView, Vacation};

use crate::cli::terminal::{is_narrow, Styled};

const EMPTY: &str = "No vacations recorded.";

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
        })
    }
}

/// How to print the vacation list.
#[derive(Debug, Default, clap::Args)]
pub struct Output {
    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Suppress headers and format rows for scripting.
    #[arg(long)]
    quiet: bool,
}

impl Output {
    pub fn print(&self, view: SortedView<'_>) -> anyhow::Result<()> {
        match self.output {
            OutputFormat::Table => {
                let columns = Column::for_terminal(is_narrow());
                print_table(&table_lines(view, &columns, self.quiet), view.is_empty());
            }
            OutputFormat::Json => println!("{}", render_json(view)?),
            OutputFormat::Csv => print!("{}", render_csv(view, self.quiet)),
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Column {
    Employee,
    Type,
    Start,
    End,
    Days,
}

impl Column {
    const ALL: [Self; 5] = [Self::Employee, Self::Type, Self::Start, Self::End, Self::Days];

    fn for_terminal(narrow: bool) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|column| !(narrow && *column == Self::Type))
            .collect()
    }

    const fn header(self) -> &'static str {
        match self {
            Self::Employee => "Employee",
            Self::Type => "Type",
            Self::Start => "Start",
            Self::End => "End",
            Self::Days => "Days",
        }
    }

    fn value(self, vacation: &Vacation) -> String {
        match self {
            Self::Employee => vacation.employee().to_string(),
            Self::Type => vacation.kind().to_string(),
            Self::Start => vacation.start().to_string(),
            Self::End => vacation.end().to_string(),
            Self::Days => vacation.duration().to_string(),
        }
    }
}

fn print_table(lines: &[String], empty: bool) {
    if empty {
        for line in lines {
            println!("{}", line.muted());
        }
        return;
    }

    let mut lines = lines.iter();
    if let Some(header) = lines.next() {
        println!("{}", header.heading());
    }
    for line in lines {
        println!("{line}");
    }
}

/// Lays the view out as aligned text lines.
///
/// Widths are measured in characters so that non-ASCII names line up.
fn table_lines(view: SortedView<'_>, columns: &[Column], quiet: bool) -> Vec<String> {
    let data: Vec<Vec<String>> = view
        .iter()
        .map(|vacation| columns.iter().map(|column| column.value(vacation)).collect())
        .collect();

    if quiet {
        return data.into_iter().map(|row| row.join("\t")).collect();
    }

    if data.is_empty() {
        return vec![EMPTY.to_string()];
    }

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            data.iter()
                .map(|row| row[idx].chars().count())
                .max()
                .unwrap_or(0)
                .max(column.header().len())
        })
        .collect();

    let line = |cells: &mut dyn Iterator<Item = String>| {
        cells
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(data.len() + 2);
    lines.push(line(&mut columns.iter().map(|column| column.header().to_string())));
    lines.push(line(&mut widths.iter().map(|width| "-".repeat(*width))));
    for row in data {
        lines.push(line(&mut row.into_iter()));
    }
    lines
}

#[derive(Serialize)]
struct JsonRow<'a> {
    #[serde(flatten)]
    vacation: &'a Vacation,
    days: u64,
}

fn render_json(view: SortedView<'_>) -> anyhow::Result<String> {
    let rows: Vec<JsonRow<'_>> = view
        .iter()
        .map(|vacation| JsonRow {
            vacation,
            days: vacation.duration(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

fn render_csv(view: SortedView<'_>, quiet: bool) -> String {
    let mut out = String::new();
    if !quiet {
        let header: Vec<_> = Column::ALL
            .iter()
            .map(|column| column.header().to_lowercase())
            .collect();
        out.push_str(&header.join(","));
        out.push('\n');
    }
    for vacation in view.iter() {
        let row: Vec<_> = Column::ALL
            .iter()
            .map(|column| csv_escape(&column.value(vacation)))
            .collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use vacations::{Action, App, Config, Outcome, SequentialIds};

    use super::*;

    fn app() -> App<SequentialIds> {
        let config = Config::new(vec!["يوسف".into(), "Amr, Jr.".into()], Vec::new());
        let mut app = App::from_config_with_ids(&config, SequentialIds::default()).unwrap();
        for (employee, start, end) in [
            ("يوسف", "2024-08-01", "2024-08-10"),
            ("Amr, Jr.", "2024-09-02", "2024-09-02"),
        ] {
            app.dispatch(Action::SelectEmployee(employee.into()));
            app.dispatch(Action::SetStartDate(start.into()));
            app.dispatch(Action::SetEndDate(end.into()));
            assert!(matches!(app.dispatch(Action::Submit), Outcome::Submitted(_)));
        }
        app
    }

    #[test]
    fn table_is_aligned_and_sorted() {
        let app = app();
        let lines = table_lines(app.sorted(), &Column::ALL, false);

        assert_eq!(
            lines,
            [
                "Employee  Type    Start       End         Days",
                "--------  ------  ----------  ----------  ----",
                "Amr, Jr.  Annual  2024-09-02  2024-09-02  1",
                "يوسف      Annual  2024-08-01  2024-08-10  10",
            ]
        );
    }

    #[test]
    fn narrow_terminal_drops_type() {
        let columns = Column::for_terminal(true);
        assert!(!columns.contains(&Column::Type));
        assert_eq!(columns.len(), 4);
        assert_eq!(Column::for_terminal(false), Column::ALL);
    }

    #[test]
    fn quiet_table_is_tab_separated() {
        let app = app();
        let lines = table_lines(app.sorted(), &[Column::Employee, Column::Days], true);
        assert_eq!(lines, ["Amr, Jr.\t1", "يوسف\t10"]);
    }

    #[test]
    fn empty_store_has_message() {
        let app = App::with_ids(SequentialIds::default());
        assert_eq!(table_lines(app.sorted(), &Column::ALL, false), [EMPTY]);
        assert!(table_lines(app.sorted(), &Column::ALL, true).is_empty());
    }

    #[test]
    fn csv_quotes_commas() {
        let app = app();
        let csv = render_csv(app.sorted(), false);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("employee,type,start,end,days"));
        assert_eq!(lines.next(), Some("\"Amr, Jr.\",Annual,2024-09-02,2024-09-02,1"));
    }

    #[test]
    fn json_includes_days() {
        let app = app();
        let json: serde_json::Value = serde_json::from_str(&render_json(app.sorted()).unwrap()).unwrap();
        assert_eq!(json[0]["employee"], "Amr, Jr.");
        assert_eq!(json[0]["days"], 1);
        assert_eq!(json[1]["days"], 10);
        assert_eq!(json[1]["type"], "annual");
    }
}

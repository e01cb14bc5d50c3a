use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// A record with a fixed column layout for `--format table`.
pub trait TableRow: Serialize {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_key_value(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Render a list of rows; the table format keeps the rows' column order.
pub fn render_rows<T: TableRow>(rows: &[T], format: OutputFormat) -> anyhow::Result<String> {
    if format != OutputFormat::Table {
        return render(&rows, format);
    }
    if rows.is_empty() {
        return Ok(String::from("(no rows)"));
    }
    let cells = rows.iter().map(TableRow::cells).collect::<Vec<_>>();
    Ok(table::render_table(T::HEADERS, &cells, table_options()))
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print a list of rows in the requested format.
pub fn output_rows<T: TableRow>(rows: &[T], format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render_rows(rows, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_key_value<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    let rows = match value {
        Value::Object(map) => map
            .into_iter()
            .map(|(key, value)| vec![key, value_to_cell(&value)])
            .collect::<Vec<_>>(),
        scalar => {
            let rows = vec![vec![value_to_cell(&scalar)]];
            return Ok(table::render_table(&["value"], &rows, table_options()));
        }
    };
    Ok(table::render_table(&["key", "value"], &rows, table_options()))
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

use crate::config::{CSV_FILENAME, CSV_HEADER, CSV_MIME, Event};
use anyhow::{Result, anyhow};
use clap::ValueEnum;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Per-field lists for pasting into spreadsheet columns, in event order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GroupedLists {
    pub ae_names: Vec<String>,
    pub workspace_ids: Vec<String>,
    pub timestamps: Vec<String>,
}

impl GroupedLists {
    pub fn column(&self, column: Column) -> &[String] {
        match column {
            Column::Ae => &self.ae_names,
            Column::Workspace => &self.workspace_ids,
            Column::Timestamp => &self.timestamps,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Column {
    Ae,
    Workspace,
    Timestamp,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Ae, Column::Workspace, Column::Timestamp];

    pub fn label(self) -> &'static str {
        match self {
            Column::Ae => "Account Executives",
            Column::Workspace => "Workspace IDs",
            Column::Timestamp => "Timestamps",
        }
    }
}

pub fn grouped_lists(events: &[Event]) -> GroupedLists {
    GroupedLists {
        ae_names: events.iter().map(|e| e.ae_name.clone()).collect(),
        workspace_ids: events.iter().map(|e| e.workspace_id.clone()).collect(),
        timestamps: events.iter().map(|e| e.timestamp.clone()).collect(),
    }
}

/// Header plus one row per event, rows joined by `\n`, no trailing newline.
pub fn to_csv(events: &[Event]) -> String {
    let mut out = String::from(CSV_HEADER);
    for e in events {
        out.push('\n');
        out.push_str(&csv_row(e));
    }
    out
}

fn csv_row(e: &Event) -> String {
    format!(
        "{},{},{}",
        escape_csv_field(&e.ae_name),
        escape_csv_field(&e.workspace_id),
        escape_csv_field(&e.timestamp)
    )
}

fn escape_csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub enum Writer {
    Grouped(Box<dyn Write>, GroupedLists),
    Column(Box<dyn Write>, Column),
    Json(Box<dyn Write>, bool), // bool tracks if we've written the opening bracket
    JsonlFile(BufWriter<File>),
    CsvFile(BufWriter<File>, bool), // bool tracks if we've written headers
}

impl Writer {
    pub fn write_batch(&mut self, events: &[Event]) -> Result<()> {
        match self {
            Writer::Grouped(_, lists) => {
                let batch = grouped_lists(events);
                lists.ae_names.extend(batch.ae_names);
                lists.workspace_ids.extend(batch.workspace_ids);
                lists.timestamps.extend(batch.timestamps);
            }
            Writer::Column(writer, column) => {
                for value in grouped_lists(events).column(*column) {
                    writeln!(writer, "{}", value)?;
                }
            }
            Writer::Json(writer, opened) => {
                for e in events {
                    write!(writer, "{}", if *opened { "," } else { "[" })?;
                    *opened = true;
                    write!(writer, "\n{}", serde_json::to_string_pretty(e)?)?;
                }
            }
            Writer::JsonlFile(writer) => {
                for e in events {
                    writeln!(writer, "{}", serde_json::to_string(e)?)?;
                }
            }
            Writer::CsvFile(writer, headers_written) => {
                if !*headers_written {
                    write!(writer, "{}", to_csv(events))?;
                    *headers_written = true;
                } else {
                    for e in events {
                        write!(writer, "\n{}", csv_row(e))?;
                    }
                }
            }
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        match self {
            Writer::Grouped(ref mut writer, ref lists) => {
                for (i, column) in Column::ALL.into_iter().enumerate() {
                    if i > 0 {
                        writeln!(writer)?;
                    }
                    writeln!(writer, "{}:", column.label())?;
                    for value in lists.column(column) {
                        writeln!(writer, "{}", value)?;
                    }
                }
                writer.flush()?;
            }
            Writer::Json(ref mut writer, opened) => {
                if !opened {
                    write!(writer, "[")?;
                }
                writeln!(writer, "\n]")?;
                writer.flush()?;
            }
            Writer::Column(ref mut writer, _) => {
                writer.flush()?;
            }
            Writer::CsvFile(ref mut writer, headers_written) => {
                if !headers_written {
                    write!(writer, "{}", to_csv(&[]))?;
                }
                writer.flush()?;
            }
            Writer::JsonlFile(ref mut writer) => {
                writer.flush()?;
            }
        }
        Ok(())
    }
}

pub fn create_writer(output_arg: &str, column: Option<Column>) -> Result<Writer> {
    if let Some(column) = column {
        return Ok(Writer::Column(Box::new(io::stdout()), column));
    }
    match output_arg {
        "stdout" => Ok(Writer::Grouped(
            Box::new(io::stdout()),
            GroupedLists::default(),
        )),
        "json" => Ok(Writer::Json(Box::new(io::stdout()), false)),
        "csv" => Ok(Writer::CsvFile(open_csv(CSV_FILENAME)?, false)),
        path if path.ends_with(".csv") => Ok(Writer::CsvFile(open_csv(path)?, false)),
        path if path.ends_with(".json") => Ok(Writer::Json(Box::new(open_file(path)?), false)),
        path if path.ends_with(".jsonl") || path.ends_with(".ndjson") => {
            Ok(Writer::JsonlFile(open_file(path)?))
        }
        _ => Err(anyhow!(
            "Unknown output format: {}. Use 'stdout', 'csv', 'json', or a .csv/.json/.jsonl path",
            output_arg
        )),
    }
}

fn open_csv(path: &str) -> Result<BufWriter<File>> {
    tracing::info!(path, content_type = CSV_MIME, "exporting csv");
    open_file(path)
}

fn open_file(path: &str) -> Result<BufWriter<File>> {
    create_parent_dirs(path)?;
    let file = File::create(path)?;
    tracing::debug!(path, "writing output file");
    Ok(BufWriter::new(file))
}

fn create_parent_dirs(file_path: &str) -> Result<()> {
    if let Some(parent) = Path::new(file_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

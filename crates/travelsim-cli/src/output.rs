//! Output formatting utilities

use std::io::{self, Write};
use std::str::FromStr;

use serde::Serialize;

use crate::instance::AttributeValue;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("Unknown output format '{}' (expected table or json)", other),
        }
    }
}

#[derive(Serialize)]
struct Record<'a> {
    instance: &'a str,
    attribute: &'a str,
    value: &'a AttributeValue,
}

/// Write the result of `get <instance> <attribute>`
///
/// Table output is the bare value, one path per line for explorations.
/// JSON output is one object per line.
pub fn write_value(
    out: &mut impl Write,
    instance: &str,
    attribute: &str,
    value: &AttributeValue,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let record = Record {
                instance,
                attribute,
                value,
            };
            write_json_line(out, &record)
        }
        OutputFormat::Table => match value {
            AttributeValue::Text(text) => writeln!(out, "{}", text),
            AttributeValue::Count(count) => writeln!(out, "{}", count),
            AttributeValue::Paths(paths) => {
                for path in paths {
                    writeln!(out, "{}", path.description)?;
                }
                Ok(())
            }
        },
    }
}

/// Serialize `data` as one compact JSON line
fn write_json_line<T: Serialize>(out: &mut impl Write, data: &T) -> io::Result<()> {
    let line = serde_json::to_string(data).map_err(io::Error::other)?;
    writeln!(out, "{}", line)
}

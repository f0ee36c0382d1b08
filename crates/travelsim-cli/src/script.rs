//! Command scripts
//!
//! One command per line:
//!
//! ```text
//! new <name> <Kind>
//! set <name> <attribute> <value>
//! get <name> <attribute...>
//! del <name>
//! ```
//!
//! `#` starts a comment that runs to the end of the line.

use std::io::Write;

use crate::instance::InstanceManager;
use crate::output::{self, OutputFormat};

/// A parsed script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    New {
        name: String,
        kind: String,
    },
    Set {
        name: String,
        attribute: String,
        value: String,
    },
    Get {
        name: String,
        attribute: String,
    },
    Del {
        name: String,
    },
}

/// Parse one line; blank and comment-only lines yield `None`
pub fn parse_line(line: &str) -> anyhow::Result<Option<Command>> {
    let tokens: Vec<&str> = line
        .split_whitespace()
        .take_while(|t| !t.starts_with('#'))
        .collect();

    let Some((verb, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match (*verb, args) {
        ("new", [name, kind]) => Command::New {
            name: name.to_string(),
            kind: kind.to_string(),
        },
        ("set", [name, attribute, value]) => Command::Set {
            name: name.to_string(),
            attribute: attribute.to_string(),
            value: value.to_string(),
        },
        ("get", [name, attribute @ ..]) if !attribute.is_empty() => Command::Get {
            name: name.to_string(),
            attribute: attribute.join(" "),
        },
        ("del", [name]) => Command::Del {
            name: name.to_string(),
        },
        ("new", _) => anyhow::bail!("Usage: new <name> <Kind>"),
        ("set", _) => anyhow::bail!("Usage: set <name> <attribute> <value>"),
        ("get", _) => anyhow::bail!("Usage: get <name> <attribute>"),
        ("del", _) => anyhow::bail!("Usage: del <name>"),
        (other, _) => anyhow::bail!("Unknown command '{}'", other),
    };
    Ok(Some(command))
}

/// Totals for one script run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    pub executed: usize,
    pub failed: usize,
}

/// Execute a script against `instances`, writing `get` results to `out`
///
/// A failing line is logged and skipped. With `strict` the first failure
/// aborts the run instead.
pub fn run(
    source: &str,
    instances: &mut InstanceManager,
    format: OutputFormat,
    strict: bool,
    out: &mut impl Write,
) -> anyhow::Result<Outcome> {
    let mut outcome = Outcome::default();

    for (index, line) in source.lines().enumerate() {
        let number = index + 1;
        let result = parse_line(line).and_then(|command| match command {
            Some(command) => execute(&command, instances, format, out).map(Some),
            None => Ok(None),
        });

        match result {
            Ok(None) => {}
            Ok(Some(())) => outcome.executed += 1,
            Err(e) if strict => return Err(e.context(format!("Script failed at line {}", number))),
            Err(e) => {
                tracing::warn!("line {}: {}. Skipping command.", number, e);
                outcome.failed += 1;
            }
        }
    }

    Ok(outcome)
}

fn execute(
    command: &Command,
    instances: &mut InstanceManager,
    format: OutputFormat,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    tracing::trace!("Executing {:?}", command);
    match command {
        Command::New { name, kind } => instances.instance_new(name, kind),
        Command::Set {
            name,
            attribute,
            value,
        } => instances.attribute_is(name, attribute, value),
        Command::Get { name, attribute } => {
            let value = instances.attribute(name, attribute)?;
            output::write_value(out, name, attribute, &value, format)?;
            Ok(())
        }
        Command::Del { name } => instances.instance_del(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_table(source: &str, strict: bool) -> (anyhow::Result<Outcome>, String) {
        let mut instances = InstanceManager::new();
        let mut out = Vec::new();
        let result = run(source, &mut instances, OutputFormat::Table, strict, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_line("new sfo Airport").unwrap(),
            Some(Command::New {
                name: "sfo".into(),
                kind: "Airport".into()
            })
        );
        assert_eq!(
            parse_line("  set carSeg1 length 20  # miles").unwrap(),
            Some(Command::Set {
                name: "carSeg1".into(),
                attribute: "length".into(),
                value: "20".into()
            })
        );
        assert_eq!(
            parse_line("get conn explore sfo distance 500").unwrap(),
            Some(Command::Get {
                name: "conn".into(),
                attribute: "explore sfo distance 500".into()
            })
        );
        assert_eq!(
            parse_line("del sfo").unwrap(),
            Some(Command::Del { name: "sfo".into() })
        );
    }

    #[test]
    fn test_parse_skips_blank_and_comments() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# new sfo Airport").unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_line("new sfo").is_err());
        assert!(parse_line("set carSeg1 length").is_err());
        assert!(parse_line("get sfo").is_err());
        assert!(parse_line("del").is_err());
        assert!(parse_line("frobnicate sfo").is_err());
    }

    #[test]
    fn test_run_prints_gets() {
        let script = "\
new sfo Airport
new home Residence
new r1 Road
set r1 source sfo
set r1 destination home
set r1 length 12.5
get r1 source
get sfo segment1
";
        let (result, out) = run_table(script, false);
        assert_eq!(
            result.unwrap(),
            Outcome {
                executed: 8,
                failed: 0
            }
        );
        assert_eq!(out, "sfo\nr1\n");
    }

    #[test]
    fn test_run_skips_failures() {
        let script = "\
new sfo Airport
new sfo Airport
new r1 Road
set r1 length 40ert
get r1 length
";
        let (result, out) = run_table(script, false);
        assert_eq!(
            result.unwrap(),
            Outcome {
                executed: 3,
                failed: 2
            }
        );
        assert_eq!(out, "0\n");
    }

    #[test]
    fn test_strict_stops_at_first_failure() {
        let script = "\
new sfo Airport
get sfo qwerty
get sfo segment1
";
        let (result, out) = run_table(script, true);
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Script failed at line 2");
        assert!(format!("{:#}", err).contains("Invalid attribute ('qwerty')"));
        assert_eq!(out, "");
    }
}

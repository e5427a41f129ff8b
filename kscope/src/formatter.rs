use std::fmt::Write;

use serde_json::Value;

use crate::cmd::OutputFormat;

pub fn render_output(value: &Value, format: OutputFormat, pretty: bool) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Json => {
            if pretty {
                serde_json::to_string_pretty(value)?
            } else {
                serde_json::to_string(value)?
            }
        },

        OutputFormat::Yaml => serde_yml::to_string(value)?.trim_end().to_string(),

        OutputFormat::Standard => {
            let mut out = String::new();
            render_human_readable(&mut out, value, 0)?;
            out.trim_end().to_string()
        }
    };

    Ok(rendered)
}

pub fn print_output(value: &Value, format: OutputFormat, pretty: bool) -> anyhow::Result<()> {
    println!("{}", render_output(value, format, pretty)?);

    Ok(())
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        _ => value.to_string(),
    }
}

fn render_human_readable(out: &mut String, value: &Value, indent: usize) -> std::fmt::Result {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                write!(out, "{:indent$}{}:", "", k, indent = indent)?;
                match v {
                    Value::Object(_) | Value::Array(_) => {
                        writeln!(out)?;
                        render_human_readable(out, v, indent + 2)?;
                    },
                    _ => writeln!(out, " {}", scalar(v))?,
                }
            }
        },
        Value::Array(arr) => {
            for v in arr {
                write!(out, "{:indent$}-", "", indent = indent)?;
                match v {
                    Value::Object(_) | Value::Array(_) => {
                        writeln!(out)?;
                        render_human_readable(out, v, indent + 2)?;
                    },
                    _ => writeln!(out, " {}", scalar(v))?,
                }
            }
        },
        _ => writeln!(out, "{:indent$}{}", "", scalar(value), indent = indent)?,
    }

    Ok(())
}

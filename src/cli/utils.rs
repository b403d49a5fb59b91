use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let Some(data_value) = data {
                response["data"] = data_value;
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output a data payload: pretty JSON, or one line per entry via the
/// caller's formatter
pub fn output_list<T, F>(
    output_format: &OutputFormat,
    items: &[T],
    empty_message: &str,
    format_line: F,
) -> anyhow::Result<()>
where
    T: serde::Serialize,
    F: Fn(&T) -> String,
{
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        OutputFormat::Text => {
            if items.is_empty() {
                println!("{}", empty_message);
            }
            for item in items {
                println!("{}", format_line(item));
            }
        }
    }
    Ok(())
}

/// Prompt for a secret on stdin when it was not passed as a flag
pub fn password_or_prompt(password: Option<String>, label: &str) -> anyhow::Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    use std::io::{self, Write};
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

// Query commands: ask, interactive, history.

use anyhow::Result;
use crossterm::style::Stylize;
use log::debug;
use serde_json::Value;

use super::Context;
use crate::models::{decode, History, JsonMap, OutputFormat, QueryOutcome};
use crate::ui;

/// Result payload followed by the metadata lines. Cost is shown only when
/// the backend reports one.
pub fn format_pretty(outcome: &QueryOutcome) -> Result<String> {
    let mut out = String::new();
    if let Some(result) = &outcome.result {
        out.push_str(&format!("{}\n", "Result".green().bold()));
        out.push_str(&serde_json::to_string_pretty(result)?);
        out.push('\n');
    }
    let api_used = outcome
        .api_used
        .as_ref()
        .map(ui::display_value)
        .unwrap_or_else(|| "N/A".to_string());
    let elapsed = outcome
        .execution_time_ms
        .as_ref()
        .map_or_else(|| "0".to_string(), ToString::to_string);
    out.push_str(&format!("\nAPI used: {api_used}\n"));
    out.push_str(&format!("Response time: {elapsed}ms\n"));
    if let Some(cost) = outcome.cost {
        out.push_str(&format!("Cost: ${cost:.4}\n"));
    }
    Ok(out)
}

/// One row per top-level key of the result payload.
pub fn result_rows(outcome: &QueryOutcome) -> Vec<Vec<String>> {
    match &outcome.result {
        Some(Value::Object(fields)) => fields
            .iter()
            .map(|(key, value)| vec![key.clone(), ui::display_value(value)])
            .collect(),
        _ => Vec::new(),
    }
}

fn render(result: JsonMap, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => ui::print_json(&Value::Object(result)),
        OutputFormat::Pretty => {
            print!("{}", format_pretty(&decode(result)?)?);
            Ok(())
        }
        OutputFormat::Table => {
            let outcome: QueryOutcome = decode(result)?;
            ui::print_table("Query Result", &["Field", "Value"], &result_rows(&outcome));
            Ok(())
        }
    }
}

pub fn ask(ctx: &Context, query_text: &str, output: OutputFormat) -> Result<()> {
    println!("\n{} {}\n", "Processing:".blue().bold(), query_text);

    let result = ui::with_spinner("Executing query...", || ctx.client.query(query_text))?;
    render(result, output)
}

const INTERACTIVE_HELP: &str = "
Available commands:
  exit          Quit interactive mode
  help          Show this message
  <any query>   Execute natural language query
";

/// What a line typed at the interactive prompt asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum InteractiveInput {
    Exit,
    Help,
    Blank,
    Query(String),
}

/// Keywords are matched case-insensitively after trimming; anything else is
/// sent as a query with surrounding whitespace removed.
pub fn classify_input(line: &str) -> InteractiveInput {
    let trimmed = line.trim();
    match trimmed.to_lowercase().as_str() {
        "exit" => InteractiveInput::Exit,
        "help" => InteractiveInput::Help,
        "" => InteractiveInput::Blank,
        _ => InteractiveInput::Query(trimmed.to_string()),
    }
}

pub fn interactive(ctx: &Context) -> Result<()> {
    ui::heading("Outris Interactive Mode");
    println!("Type exit to quit, help for commands\n");

    loop {
        // Ctrl-C or a closed stdin ends the session like `exit`.
        let line = match ui::prompt_line("outris>") {
            Ok(text) => text,
            Err(e) => {
                debug!("Leaving interactive mode: {e}");
                ui::hint("Goodbye!");
                break;
            }
        };

        let query_text = match classify_input(&line) {
            InteractiveInput::Exit => {
                ui::hint("Goodbye!");
                break;
            }
            InteractiveInput::Help => {
                println!("{INTERACTIVE_HELP}");
                continue;
            }
            InteractiveInput::Blank => continue,
            InteractiveInput::Query(text) => text,
        };

        let rendered = ctx
            .client
            .query(&query_text)
            .map_err(anyhow::Error::from)
            .and_then(|result| render(result, OutputFormat::Pretty));
        if let Err(e) = rendered {
            println!("{} {e}", "Error:".red());
        }
        println!();
    }
    Ok(())
}

pub fn history(ctx: &Context, limit: u32) -> Result<()> {
    let history: History = decode(ctx.client.get_history(limit)?)?;

    let rows: Vec<Vec<String>> = history
        .queries
        .iter()
        .map(|entry| {
            vec![
                entry.query.clone(),
                entry.api.clone(),
                entry.timestamp.clone(),
            ]
        })
        .collect();
    ui::print_table("Query History", &["Query", "API", "Timestamp"], &rows);
    Ok(())
}

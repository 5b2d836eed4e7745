// UI layer: prompts (`dialoguer`), spinners (`indicatif`) and small
// rendering helpers shared by the command modules. Nothing here talks to
// the backend.

use std::time::Duration;

use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Confirm, Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use crate::validators::{validate_email, validate_otp};

/// Run `f` while a spinner shows `message`. The spinner is cleared before
/// returning so the caller's output starts on a clean line.
pub fn with_spinner<T>(message: impl Into<String>, f: impl FnOnce() -> T) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    let out = f();
    spinner.finish_and_clear();
    out
}

pub fn prompt_text(prompt: &str) -> Result<String> {
    let value: String = Input::new().with_prompt(prompt).interact_text()?;
    Ok(value)
}

/// Like `prompt_text`, but a bare Enter returns an empty line instead of
/// re-prompting.
pub fn prompt_line(prompt: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

/// Prompt until the input looks like an email address.
pub fn prompt_email(prompt: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| -> Result<(), &str> {
            if validate_email(input) {
                Ok(())
            } else {
                Err("Invalid email address")
            }
        })
        .interact_text()?;
    Ok(value)
}

/// Prompt until the input is a 6-digit code.
pub fn prompt_otp(prompt: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| -> Result<(), &str> {
            if validate_otp(input) {
                Ok(())
            } else {
                Err("Code must be 6 digits")
            }
        })
        .interact_text()?;
    Ok(value)
}

/// Hidden input for secret values.
pub fn prompt_secret(prompt: &str) -> Result<String> {
    let value = Password::new().with_prompt(prompt).interact()?;
    Ok(value)
}

pub fn confirm(prompt: &str) -> Result<bool> {
    let answer = Confirm::new().with_prompt(prompt).interact()?;
    Ok(answer)
}

pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

pub fn hint(message: &str) {
    println!("{}", message.dim());
}

pub fn heading(message: &str) {
    println!("\n{}\n", message.bold());
}

/// Print an indented `label: value` line with the value highlighted.
pub fn field(label: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", label, value.to_string().cyan());
}

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Lay out rows under a title and column headers, padding every column to its
/// widest cell. Missing trailing cells render empty.
pub fn format_table(title: &str, headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let pad = |cell: &str, width: usize| format!("{cell:<width$}");
    let line = |cells: Vec<String>| cells.join("  ").trim_end().to_string();

    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&line(
        headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| pad(*h, *w))
            .collect(),
    ));
    out.push('\n');
    out.push_str(&line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    out.push('\n');
    for row in rows {
        let cells = widths
            .iter()
            .enumerate()
            .map(|(i, w)| pad(row.get(i).map(String::as_str).unwrap_or(""), *w))
            .collect();
        out.push_str(&line(cells));
        out.push('\n');
    }
    out
}

pub fn print_table(title: &str, headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        println!("{}", "No data to display".yellow());
        return;
    }
    print!("{}", format_table(title, headers, rows));
}

/// Render a JSON scalar without quotes; compound values stay JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// Authentication commands: signup, login, logout, status.

use anyhow::Result;

use super::Context;
use crate::config::StoredConfig;
use crate::models::{decode, Credentials, SignupResponse};
use crate::ui;
use crate::validators::validate_api_key;

const API_KEY_PREVIEW_LEN: usize = 20;

/// Config written after a successful OTP verification.
pub fn config_from_credentials(credentials: Credentials) -> StoredConfig {
    StoredConfig {
        api_key: Some(credentials.api_key),
        email: Some(credentials.email),
        org_id: Some(credentials.org_id),
        org_name: Some(credentials.org_name.unwrap_or_default()),
        role: None,
    }
}

/// First characters of the key, enough to recognise it.
pub fn api_key_preview(key: &str) -> String {
    let preview: String = key.chars().take(API_KEY_PREVIEW_LEN).collect();
    format!("{preview}...")
}

fn show_otp_sent(response: &SignupResponse) {
    ui::success(&response.message);
    ui::hint(&format!("Code expires in {} seconds\n", response.expires_in));
}

/// Ask for the emailed code, verify it and persist the credentials.
fn verify_and_save(ctx: &Context, email: &str, prompt: &str) -> Result<Credentials> {
    let otp = ui::prompt_otp(prompt)?;
    let credentials: Credentials =
        decode(ui::with_spinner("Verifying code...", || ctx.client.verify_otp(email, &otp))?)?;
    ctx.store.save(&config_from_credentials(credentials.clone()))?;
    Ok(credentials)
}

pub fn signup(ctx: &Context) -> Result<()> {
    ui::heading("Create Outris Account");

    let email = ui::prompt_email("Email address")?;
    let org_name = ui::prompt_text("Organization name")?;

    let response: SignupResponse = decode(ui::with_spinner(
        format!("Sending OTP to {email}..."),
        || ctx.client.signup(&email, &org_name),
    )?)?;
    show_otp_sent(&response);

    let credentials = verify_and_save(ctx, &email, "Enter 6-digit code from email")?;

    println!();
    ui::success("Account created!");
    ui::field("Organization", credentials.org_name.as_deref().unwrap_or("N/A"));
    ui::field("Email", &credentials.email);
    ui::hint(&format!("\nAPI key saved to {}", ctx.store.path().display()));
    ui::heading("Get started:");
    println!("  outris api add <spec.yaml>");
    println!("  outris query ask \"your query\"");
    Ok(())
}

pub fn login(ctx: &Context) -> Result<()> {
    ui::heading("Login to Outris");

    let email = ui::prompt_email("Email address")?;

    let response: SignupResponse = decode(ui::with_spinner(
        format!("Sending OTP to {email}..."),
        || ctx.client.login(&email),
    )?)?;
    show_otp_sent(&response);

    let credentials = verify_and_save(ctx, &email, "Enter 6-digit code")?;

    println!();
    ui::success(&format!("Logged in as {}", credentials.email));
    ui::field("Organization", credentials.org_name.as_deref().unwrap_or("N/A"));
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    if ctx.store.load()?.is_empty() {
        ui::warning("Not logged in");
        return Ok(());
    }

    ctx.store.clear()?;
    ui::success("Logged out successfully");
    ui::hint(&format!("Credentials cleared from {}", ctx.store.path().display()));
    Ok(())
}

pub fn status(ctx: &Context) -> Result<()> {
    let config = ctx.store.load()?;
    if config.is_empty() {
        ui::warning("Not logged in");
        println!("\nRun: outris signup or outris login");
        return Ok(());
    }

    let or_na = |value: &Option<String>| value.clone().unwrap_or_else(|| "N/A".to_string());

    ui::heading("Authentication Status");
    ui::field("Email", or_na(&config.email));
    ui::field("Organization", or_na(&config.org_name));
    ui::field("Org ID", or_na(&config.org_id));
    ui::field(
        "API Key",
        config
            .api_key
            .as_deref()
            .map(api_key_preview)
            .unwrap_or_else(|| "N/A".to_string()),
    );
    println!();
    if config.api_key.as_deref().is_some_and(|key| !validate_api_key(key)) {
        ui::warning("Stored API key looks malformed; run outris login again");
        return Ok(());
    }
    ui::success("Logged in");
    Ok(())
}

// API management commands: add, add-secret, list.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use serde_json::Value;

use super::Context;
use crate::cli::AddApiArgs;
use crate::models::{decode, ApiListing, Message, RegisteredApi, Scope};
use crate::ui;

/// Read an OpenAPI document. `.yaml`/`.yml` files are parsed as YAML,
/// anything else as JSON.
pub fn load_spec(path: &Path) -> Result<Value> {
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }
    let data =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    );
    let spec: Value = if is_yaml {
        serde_yaml::from_str(&data)
            .with_context(|| format!("Invalid YAML in {}", path.display()))?
    } else {
        serde_json::from_str(&data)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?
    };
    Ok(spec)
}

/// Name for a registered API: explicit name, else the spec's `info.title`,
/// else the file stem.
pub fn spec_name(explicit: Option<String>, spec: &Value, path: &Path) -> String {
    explicit
        .filter(|name| !name.is_empty())
        .or_else(|| {
            spec.pointer("/info/title")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
}

pub fn add(ctx: &Context, args: AddApiArgs) -> Result<()> {
    let spec = load_spec(&args.spec_path)?;
    let name = spec_name(args.name, &spec, &args.spec_path);

    let registered: RegisteredApi = decode(ui::with_spinner(format!("Registering {name}..."), || {
        ctx.client.register_api(&spec, &name, args.visibility)
    })?)?;

    println!();
    ui::success(&format!("API registered: {}", registered.name));
    ui::field("Endpoints discovered", registered.endpoints);
    ui::field("Intent mappings generated", registered.intent_mappings);
    ui::field("Visibility", args.visibility);

    if ui::confirm("\nAdd API credentials?")? {
        add_secret(ctx, &registered.name, None)?;
    }
    Ok(())
}

pub fn add_secret(ctx: &Context, api_name: &str, key_name: Option<String>) -> Result<()> {
    let key_name = match key_name.filter(|k| !k.is_empty()) {
        Some(key_name) => key_name,
        None => ui::prompt_text("Secret name (e.g., STRIPE_API_KEY)")?,
    };
    let value = ui::prompt_secret("Secret value")?;

    let stored: Message = decode(ui::with_spinner("Encrypting and storing secret...", || {
        ctx.client.add_secret(api_name, &key_name, &value)
    })?)?;

    ui::success(&stored.message);
    ui::hint("Secret encrypted and available to all team members");
    Ok(())
}

pub fn listing_rows(listing: &ApiListing) -> Vec<Vec<String>> {
    listing
        .apis
        .iter()
        .map(|api| {
            vec![
                api.name.clone(),
                api.visibility.to_string(),
                api.endpoints.to_string(),
            ]
        })
        .collect()
}

pub fn list(ctx: &Context, scope: Scope) -> Result<()> {
    let listing: ApiListing = decode(ctx.client.list_apis(scope)?)?;

    if listing.count == 0 {
        ui::warning("No APIs found");
        println!("\nAdd an API: outris api add <spec.yaml>");
        return Ok(());
    }

    ui::print_table(
        &format!("APIs ({scope})"),
        &["Name", "Visibility", "Endpoints"],
        &listing_rows(&listing),
    );
    ui::hint(&format!("\nTotal: {} APIs", listing.count));
    Ok(())
}

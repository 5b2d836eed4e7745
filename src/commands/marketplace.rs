// Marketplace commands: browse, install.

use anyhow::Result;

use super::Context;
use crate::models::{decode, Installation, Marketplace};
use crate::ui;

pub fn browse(ctx: &Context, category: &str) -> Result<()> {
    let marketplace: Marketplace = decode(ctx.client.get_marketplace()?)?;

    // The backend returns the whole catalogue; filtering happens here.
    let apis = marketplace.filtered(category);
    let rows: Vec<Vec<String>> = apis
        .iter()
        .map(|api| {
            vec![
                api.name.clone(),
                api.category.clone(),
                api.installs.to_string(),
            ]
        })
        .collect();

    ui::print_table("API Marketplace", &["Name", "Category", "Installs"], &rows);
    ui::hint(&format!("\nTotal: {} APIs", apis.len()));
    println!("\nInstall with: outris marketplace install <api-name>");
    Ok(())
}

pub fn install(ctx: &Context, api_name: &str) -> Result<()> {
    let installed: Installation = decode(ui::with_spinner(
        format!("Installing {api_name}..."),
        || ctx.client.install_from_marketplace(api_name),
    )?)?;

    ui::success(&installed.message);
    ui::hint(&format!("API ID: {}", installed.api_id));
    println!("\nYou can now query this API:");
    println!("  outris query ask \"your query\"");
    Ok(())
}

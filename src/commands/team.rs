// Team collaboration commands: invite, accept, list.

use anyhow::Result;

use super::Context;
use crate::config::StoredConfig;
use crate::models::{decode, Invitation, InviteRole, Message, TeamRoster};
use crate::ui;

pub fn invite(ctx: &Context, email: &str, role: InviteRole) -> Result<()> {
    let sent: Message = decode(ui::with_spinner(
        format!("Sending invitation to {email}..."),
        || ctx.client.invite_member(email, role),
    )?)?;

    ui::success(&sent.message);
    ui::hint(&format!("Role: {role}"));
    Ok(())
}

/// Config written after joining a team. The email comes from the caller,
/// not the backend reply.
pub fn config_from_invitation(invitation: Invitation, email: String) -> StoredConfig {
    StoredConfig {
        api_key: Some(invitation.api_key),
        email: Some(email),
        org_id: Some(invitation.org_id),
        org_name: None,
        role: Some(invitation.role.to_string()),
    }
}

pub fn accept(ctx: &Context, token: &str, email: Option<String>) -> Result<()> {
    let email = match email.filter(|e| !e.is_empty()) {
        Some(email) => email,
        None => ui::prompt_email("Your email address")?,
    };

    ui::heading("Accept Team Invitation");
    println!("Email: {email}");

    let otp = ui::prompt_otp("Enter 6-digit code from email")?;

    let invitation: Invitation = decode(ui::with_spinner("Verifying and joining team...", || {
        ctx.client.accept_invitation(token, &email, &otp)
    })?)?;
    let role = invitation.role;
    ctx.store.save(&config_from_invitation(invitation, email))?;

    println!();
    ui::success("Joined team!");
    ui::field("Role", role);
    Ok(())
}

pub fn list(ctx: &Context) -> Result<()> {
    let roster: TeamRoster = decode(ctx.client.list_team()?)?;

    let rows: Vec<Vec<String>> = roster
        .members
        .iter()
        .map(|member| vec![member.email.clone(), member.role.to_string()])
        .collect();
    ui::print_table("Team Members", &["Email", "Role"], &rows);
    ui::hint(&format!("\nTotal: {} members", roster.count));
    Ok(())
}

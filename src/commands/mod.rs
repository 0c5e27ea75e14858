// src/commands/mod.rs
use crate::chat::ChannelHandle;
use crate::context::AppContext;
use anyhow::Result;

/// On-demand `check` command. Replies with an acknowledgment followed by
/// one informational line per target, healthy or not. No mentions here.
pub async fn check(ctx: &AppContext, reply_to: &ChannelHandle) -> Result<()> {
    ctx.chat.send_message(reply_to, "Checking servers...").await?;

    let results = ctx.checker.check_all(ctx.targets()).await?;
    for result in &results {
        let line = format!("**{}:** {}", result.target.name, result.healthy);
        ctx.chat.send_message(reply_to, &line).await?;
    }

    Ok(())
}

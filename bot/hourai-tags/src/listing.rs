use crate::platform::{ChannelId, GuildMember, GuildPlatform, GuildSnapshot, TagRole};
use anyhow::Result;
use hourai::commands::CommandError;
use std::fmt::Write;

/// Renders the `who` reply: a header line, then one username per holder in
/// guild order.
pub fn render(role: &TagRole, members: &[GuildMember]) -> (String, usize) {
    let mut message = format!("User(s) in role {}:\n", role.name);
    let mut holders = 0;
    for member in members.iter().filter(|member| member.has_role(role.id)) {
        let _ = writeln!(message, "{}", member.username);
        holders += 1;
    }
    (message, holders)
}

pub fn not_found_notice(name: &str, prefix: char) -> String {
    format!(
        "{} is not an existing role. `{}who` is caps sensitive.",
        name, prefix
    )
}

/// Lists the holders of an existing role in the channel the command came
/// from. Never creates or edits anything. Returns the number of holders.
pub async fn list<P>(
    platform: &P,
    guild: &GuildSnapshot,
    channel_id: ChannelId,
    name: &str,
    prefix: char,
) -> Result<usize>
where
    P: GuildPlatform + ?Sized,
{
    let role = match guild.role_named(name) {
        Some(role) => role,
        None => {
            platform
                .send_message(channel_id, &not_found_notice(name, prefix))
                .await?;
            anyhow::bail!(CommandError::UnknownRole(name.to_owned()));
        }
    };

    if !role.mentionable {
        anyhow::bail!(CommandError::NotMentionable(name.to_owned()));
    }

    let members = platform.members(guild.id).await?;
    let (message, holders) = render(role, &members);
    platform.send_message(channel_id, &message).await?;
    Ok(holders)
}

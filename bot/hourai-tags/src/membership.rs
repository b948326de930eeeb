use crate::{
    platform::{GuildPlatform, GuildSnapshot, TagRole, UserId},
    registry,
};
use anyhow::Result;
use hourai::prelude::*;

/// Adds the role to the user. Adding a role the user already has is a no-op
/// on Discord's side and is not an error.
pub async fn grant<P>(
    platform: &P,
    guild: &GuildSnapshot,
    user_id: UserId,
    role: &TagRole,
) -> Result<()>
where
    P: GuildPlatform + ?Sized,
{
    platform.add_member_role(guild.id, user_id, role.id).await?;
    debug!(
        "Added role {} ({}) to user {} in guild {}",
        role.name, role.id, user_id, guild.id
    );
    Ok(())
}

/// Removes the role from the user, then deletes the role if nobody holds it
/// anymore. Returns whether the role was deleted.
///
/// A failed delete is returned as an error even though the member has
/// already lost the role. The revoke is not rolled back.
pub async fn revoke<P>(
    platform: &P,
    guild: &GuildSnapshot,
    user_id: UserId,
    role: &TagRole,
) -> Result<bool>
where
    P: GuildPlatform + ?Sized,
{
    platform.remove_member_role(guild.id, user_id, role.id).await?;
    debug!(
        "Removed role {} ({}) from user {} in guild {}",
        role.name, role.id, user_id, guild.id
    );

    let members = platform.members(guild.id).await?;
    registry::delete_if_empty(platform, guild, role, &members, user_id).await
}

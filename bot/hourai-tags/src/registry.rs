use crate::platform::{GuildMember, GuildPlatform, GuildSnapshot, RoleEdit, TagRole, UserId};
use anyhow::Result;
use hourai::{commands::CommandError, prelude::*};

/// A role resolved for a grant, and whether this command created it.
#[derive(Clone, Debug)]
pub struct ResolvedRole {
    pub role: TagRole,
    pub created: bool,
}

/// Refuses to touch any role that grants permissions or can't be mentioned.
pub fn check_invariants(role: &TagRole) -> Result<(), CommandError> {
    if !role.permissions.is_empty() {
        Err(CommandError::InvalidPermissions(role.name.clone()))
    } else if !role.mentionable {
        Err(CommandError::NotMentionable(role.name.clone()))
    } else {
        Ok(())
    }
}

/// Looks up an existing tag role without ever creating one.
pub fn find_existing<'a>(
    guild: &'a GuildSnapshot,
    name: &str,
) -> Result<&'a TagRole, CommandError> {
    let role = guild
        .role_named(name)
        .ok_or_else(|| CommandError::UnknownRole(name.to_owned()))?;
    check_invariants(role)?;
    Ok(role)
}

/// Finds the named role, creating it when the guild has none.
///
/// Creation takes two requests: an empty role is created, then edited into a
/// tag role. If the edit fails, the empty role stays in the guild and the edit
/// error is returned as is.
pub async fn fetch_or_create<P>(
    platform: &P,
    guild: &GuildSnapshot,
    name: &str,
    color: u32,
) -> Result<ResolvedRole>
where
    P: GuildPlatform + ?Sized,
{
    if let Some(role) = guild.role_named(name) {
        check_invariants(role)?;
        return Ok(ResolvedRole {
            role: role.clone(),
            created: false,
        });
    }

    let skeleton = platform.create_role(guild.id).await?;
    debug!(
        "Created role {} in guild {}, applying tag settings",
        skeleton.id, guild.id
    );
    let role = platform
        .edit_role(guild.id, skeleton.id, &RoleEdit::tag(name, color))
        .await?;
    info!(
        "Created tag role {} ({}) with color {:06x} in guild {}",
        role.name, role.id, role.color, guild.id
    );
    metrics::increment_counter!("hourai_tags_roles_created_total");

    Ok(ResolvedRole {
        role,
        created: true,
    })
}

/// Deletes the role if nobody but `revoked` still holds it.
///
/// `members` is a snapshot that may or may not already reflect the revoke, so
/// the revoked user is never counted as a holder. Returns whether the role was
/// deleted.
pub async fn delete_if_empty<P>(
    platform: &P,
    guild: &GuildSnapshot,
    role: &TagRole,
    members: &[GuildMember],
    revoked: UserId,
) -> Result<bool>
where
    P: GuildPlatform + ?Sized,
{
    let in_use = members
        .iter()
        .any(|member| member.id != revoked && member.has_role(role.id));
    if in_use {
        return Ok(false);
    }

    platform.delete_role(guild.id, role.id).await?;
    info!(
        "Deleted empty tag role {} ({}) in guild {}",
        role.name, role.id, guild.id
    );
    metrics::increment_counter!("hourai_tags_roles_deleted_total");
    Ok(true)
}

use anyhow::Result;
use async_trait::async_trait;
use hourai::models::{
    channel::message::Mention,
    guild::{Member, Permissions, Role},
    user::User,
};

pub use hourai::models::{ChannelId, GuildId, RoleId, UserId};

/// The parts of a guild role the bot cares about.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TagRole {
    pub id: RoleId,
    pub name: String,
    pub color: u32,
    pub permissions: Permissions,
    pub mentionable: bool,
}

impl From<&Role> for TagRole {
    fn from(value: &Role) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            color: value.color,
            permissions: value.permissions,
            mentionable: value.mentionable,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GuildMember {
    pub id: UserId,
    pub username: String,
    pub roles: Vec<RoleId>,
}

impl GuildMember {
    pub fn has_role(&self, role_id: RoleId) -> bool {
        self.roles.contains(&role_id)
    }
}

impl From<&Member> for GuildMember {
    fn from(value: &Member) -> Self {
        Self {
            id: value.user.id,
            username: value.user.name.clone(),
            roles: value.roles.clone(),
        }
    }
}

/// A user as referenced by a message, either its author or a mention.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserRef {
    pub id: UserId,
    pub name: String,
    pub bot: bool,
}

impl From<&User> for UserRef {
    fn from(value: &User) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            bot: value.bot,
        }
    }
}

impl From<&Mention> for UserRef {
    fn from(value: &Mention) -> Self {
        Self {
            id: value.id,
            name: value.name.clone(),
            bot: value.bot,
        }
    }
}

/// A point-in-time view of a guild's roles, fetched once per command.
///
/// Nothing keeps this in sync with Discord. Later steps of the same command
/// must not assume it still matches the live guild.
#[derive(Clone, Debug)]
pub struct GuildSnapshot {
    pub id: GuildId,
    pub roles: Vec<TagRole>,
}

impl GuildSnapshot {
    /// Finds a role by exact, case-sensitive name.
    pub fn role_named(&self, name: &str) -> Option<&TagRole> {
        self.roles.iter().find(|role| role.name == name)
    }
}

/// The full set of fields written to a freshly created tag role.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleEdit<'a> {
    pub name: &'a str,
    pub color: u32,
    pub permissions: Permissions,
    pub mentionable: bool,
}

impl<'a> RoleEdit<'a> {
    pub fn tag(name: &'a str, color: u32) -> Self {
        Self {
            name,
            color,
            permissions: Permissions::empty(),
            mentionable: true,
        }
    }
}

/// Every guild operation the tag commands need from Discord.
///
/// Each call is a single request/response exchange. Implementations must not
/// retry or cache: a failed call fails the command that issued it.
#[async_trait]
pub trait GuildPlatform: Send + Sync {
    async fn guild_id(&self, channel_id: ChannelId) -> Result<GuildId>;
    async fn guild(&self, guild_id: GuildId) -> Result<GuildSnapshot>;
    async fn members(&self, guild_id: GuildId) -> Result<Vec<GuildMember>>;
    async fn create_role(&self, guild_id: GuildId) -> Result<TagRole>;
    async fn edit_role(
        &self,
        guild_id: GuildId,
        role_id: RoleId,
        edit: &RoleEdit<'_>,
    ) -> Result<TagRole>;
    async fn delete_role(&self, guild_id: GuildId, role_id: RoleId) -> Result<()>;
    async fn add_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<()>;
    async fn remove_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<()>;
    async fn send_message(&self, channel_id: ChannelId, content: &str) -> Result<()>;
}

/// Where command failures become visible to users.
#[async_trait]
pub trait StatusSurface: Send + Sync {
    async fn set_status(&self, text: &str) -> Result<()>;

    /// Removes any presence text, leaving the bot online with no activity.
    async fn clear_status(&self) -> Result<()>;
}

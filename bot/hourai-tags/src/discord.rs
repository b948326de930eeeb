use crate::platform::*;
use anyhow::Result;
use async_trait::async_trait;
use hourai::{
    commands::CommandError,
    gateway::cluster::Cluster,
    http::Client,
    models::{
        channel::message::AllowedMentions,
        gateway::{
            payload::outgoing::{update_presence::UpdatePresencePayload, UpdatePresence},
            presence::{Activity, ActivityType, MinimalActivity, Status},
            OpCode,
        },
    },
    prelude::*,
};

const MEMBER_PAGE_SIZE: u16 = 1000;

/// The tag commands' view of Discord, backed by the REST API.
#[derive(Clone)]
pub struct DiscordPlatform {
    http: Arc<Client>,
}

impl DiscordPlatform {
    pub fn new(http: Arc<Client>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl GuildPlatform for DiscordPlatform {
    async fn guild_id(&self, channel_id: ChannelId) -> Result<GuildId> {
        let channel = self.http.channel(channel_id).exec().await?.model().await?;
        Ok(channel.guild_id.ok_or(CommandError::NotInGuild)?)
    }

    async fn guild(&self, guild_id: GuildId) -> Result<GuildSnapshot> {
        let guild = self.http.guild(guild_id).exec().await?.model().await?;
        Ok(GuildSnapshot {
            id: guild.id,
            roles: guild.roles.iter().map(TagRole::from).collect(),
        })
    }

    async fn members(&self, guild_id: GuildId) -> Result<Vec<GuildMember>> {
        let mut members = Vec::new();
        let mut after: Option<UserId> = None;
        loop {
            let mut request = self.http.guild_members(guild_id).limit(MEMBER_PAGE_SIZE)?;
            if let Some(user_id) = after {
                request = request.after(user_id);
            }
            let page = request.exec().await?.models().await?;
            members.extend(page.iter().map(GuildMember::from));
            match page.last() {
                Some(last) if page.len() == MEMBER_PAGE_SIZE as usize => {
                    after = Some(last.user.id);
                }
                _ => break,
            }
        }
        debug!("Fetched {} members from guild {}", members.len(), guild_id);
        Ok(members)
    }

    async fn create_role(&self, guild_id: GuildId) -> Result<TagRole> {
        let role = self.http.create_role(guild_id).exec().await?.model().await?;
        Ok(TagRole::from(&role))
    }

    async fn edit_role(
        &self,
        guild_id: GuildId,
        role_id: RoleId,
        edit: &RoleEdit<'_>,
    ) -> Result<TagRole> {
        let role = self
            .http
            .update_role(guild_id, role_id)
            .name(Some(edit.name))
            .color(Some(edit.color))
            .permissions(edit.permissions)
            .mentionable(edit.mentionable)
            .exec()
            .await?
            .model()
            .await?;
        Ok(TagRole::from(&role))
    }

    async fn delete_role(&self, guild_id: GuildId, role_id: RoleId) -> Result<()> {
        self.http.delete_role(guild_id, role_id).exec().await?;
        Ok(())
    }

    async fn add_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<()> {
        self.http
            .add_guild_member_role(guild_id, user_id, role_id)
            .exec()
            .await?;
        Ok(())
    }

    async fn remove_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<()> {
        self.http
            .remove_guild_member_role(guild_id, user_id, role_id)
            .exec()
            .await?;
        Ok(())
    }

    async fn send_message(&self, channel_id: ChannelId, content: &str) -> Result<()> {
        // Role names are user input. Never let a reply ping anyone.
        let no_pings = AllowedMentions::default();
        self.http
            .create_message(channel_id)
            .content(content)?
            .allowed_mentions(Some(&no_pings))
            .exec()
            .await?;
        Ok(())
    }
}

/// Shows command failures as the presence of the shard that received them.
pub struct ShardStatus {
    gateway: Arc<Cluster>,
    shard_id: u64,
}

impl ShardStatus {
    pub fn new(gateway: Arc<Cluster>, shard_id: u64) -> Self {
        Self { gateway, shard_id }
    }
}

#[async_trait]
impl StatusSurface for ShardStatus {
    async fn set_status(&self, text: &str) -> Result<()> {
        let activity = Activity::from(MinimalActivity {
            kind: ActivityType::Playing,
            name: text.to_owned(),
            url: None,
        });
        let presence = UpdatePresence::new(vec![activity], false, None::<u64>, Status::Online)?;
        self.gateway.command(self.shard_id, &presence).await?;
        Ok(())
    }

    async fn clear_status(&self) -> Result<()> {
        // UpdatePresence::new refuses an empty activity list, the gateway does not.
        let presence = UpdatePresence {
            d: UpdatePresencePayload {
                activities: Vec::new(),
                afk: false,
                since: None,
                status: Status::Online,
            },
            op: OpCode::PresenceUpdate,
        };
        self.gateway.command(self.shard_id, &presence).await?;
        Ok(())
    }
}

//! An in-memory guild used to exercise commands without Discord.

use crate::platform::*;
use anyhow::{bail, Result};
use async_trait::async_trait;
use hourai::models::guild::Permissions;
use std::collections::HashSet;
use std::sync::Mutex;

const GUILD_ID: u64 = 1;
const FIRST_CREATED_ROLE: u64 = 1000;

#[derive(Default)]
struct State {
    roles: Vec<TagRole>,
    members: Vec<GuildMember>,
    next_role_id: u64,
    failures: HashSet<&'static str>,
    messages: Vec<(ChannelId, String)>,
    statuses: Vec<String>,
    calls: Vec<&'static str>,
}

#[derive(Default)]
pub struct MockPlatform {
    state: Mutex<State>,
}

impl MockPlatform {
    pub fn new() -> Self {
        let platform = Self::default();
        platform.state.lock().unwrap().next_role_id = FIRST_CREATED_ROLE;
        platform
    }

    pub fn guild_id() -> GuildId {
        GuildId::new(GUILD_ID)
    }

    pub fn tag_role(id: u64, name: &str) -> TagRole {
        TagRole {
            id: RoleId::new(id),
            name: name.to_owned(),
            color: 0,
            permissions: Permissions::empty(),
            mentionable: true,
        }
    }

    pub fn insert_role(&self, role: TagRole) {
        self.state.lock().unwrap().roles.push(role);
    }

    pub fn insert_member(&self, id: u64, name: &str, roles: &[u64]) {
        self.state.lock().unwrap().members.push(GuildMember {
            id: UserId::new(id),
            username: name.to_owned(),
            roles: roles.iter().copied().map(RoleId::new).collect(),
        });
    }

    /// Makes every later call of the named operation fail.
    pub fn fail_on(&self, operation: &'static str) {
        self.state.lock().unwrap().failures.insert(operation);
    }

    pub fn snapshot(&self) -> GuildSnapshot {
        GuildSnapshot {
            id: Self::guild_id(),
            roles: self.state.lock().unwrap().roles.clone(),
        }
    }

    pub fn member_list(&self) -> Vec<GuildMember> {
        self.state.lock().unwrap().members.clone()
    }

    pub fn role(&self, name: &str) -> Option<TagRole> {
        let state = self.state.lock().unwrap();
        state.roles.iter().find(|role| role.name == name).cloned()
    }

    pub fn role_count(&self) -> usize {
        self.state.lock().unwrap().roles.len()
    }

    pub fn member_roles(&self, user_id: u64) -> Vec<RoleId> {
        let state = self.state.lock().unwrap();
        state
            .members
            .iter()
            .find(|member| member.id.get() == user_id)
            .map(|member| member.roles.clone())
            .unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<(ChannelId, String)> {
        self.state.lock().unwrap().messages.clone()
    }

    pub fn statuses(&self) -> Vec<String> {
        self.state.lock().unwrap().statuses.clone()
    }

    /// Every mutating request made so far, in order.
    pub fn mutations(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    fn begin(&self, operation: &'static str) -> Result<std::sync::MutexGuard<'_, State>> {
        let state = self.state.lock().unwrap();
        if state.failures.contains(operation) {
            bail!("Simulated failure in {}", operation);
        }
        Ok(state)
    }

    fn begin_mutation(&self, operation: &'static str) -> Result<std::sync::MutexGuard<'_, State>> {
        let mut state = self.begin(operation)?;
        state.calls.push(operation);
        Ok(state)
    }
}

fn check_guild(guild_id: GuildId) -> Result<()> {
    if guild_id.get() != GUILD_ID {
        bail!("Unknown Guild {}", guild_id);
    }
    Ok(())
}

#[async_trait]
impl GuildPlatform for MockPlatform {
    async fn guild_id(&self, _channel_id: ChannelId) -> Result<GuildId> {
        self.begin("guild_id")?;
        Ok(Self::guild_id())
    }

    async fn guild(&self, guild_id: GuildId) -> Result<GuildSnapshot> {
        check_guild(guild_id)?;
        self.begin("guild")?;
        Ok(self.snapshot())
    }

    async fn members(&self, guild_id: GuildId) -> Result<Vec<GuildMember>> {
        check_guild(guild_id)?;
        let state = self.begin("members")?;
        Ok(state.members.clone())
    }

    async fn create_role(&self, guild_id: GuildId) -> Result<TagRole> {
        check_guild(guild_id)?;
        let mut state = self.begin_mutation("create_role")?;
        let role = TagRole {
            id: RoleId::new(state.next_role_id),
            name: String::from("new role"),
            color: 0,
            permissions: Permissions::VIEW_CHANNEL,
            mentionable: false,
        };
        state.next_role_id += 1;
        state.roles.push(role.clone());
        Ok(role)
    }

    async fn edit_role(
        &self,
        guild_id: GuildId,
        role_id: RoleId,
        edit: &RoleEdit<'_>,
    ) -> Result<TagRole> {
        check_guild(guild_id)?;
        let mut state = self.begin_mutation("edit_role")?;
        match state.roles.iter_mut().find(|role| role.id == role_id) {
            Some(role) => {
                role.name = edit.name.to_owned();
                role.color = edit.color;
                role.permissions = edit.permissions;
                role.mentionable = edit.mentionable;
                Ok(role.clone())
            }
            None => bail!("Unknown Role {}", role_id),
        }
    }

    async fn delete_role(&self, guild_id: GuildId, role_id: RoleId) -> Result<()> {
        check_guild(guild_id)?;
        let mut state = self.begin_mutation("delete_role")?;
        let before = state.roles.len();
        state.roles.retain(|role| role.id != role_id);
        if state.roles.len() == before {
            bail!("Unknown Role {}", role_id);
        }
        for member in state.members.iter_mut() {
            member.roles.retain(|id| *id != role_id);
        }
        Ok(())
    }

    async fn add_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<()> {
        check_guild(guild_id)?;
        let mut state = self.begin_mutation("add_member_role")?;
        if !state.roles.iter().any(|role| role.id == role_id) {
            bail!("Unknown Role {}", role_id);
        }
        match state.members.iter_mut().find(|member| member.id == user_id) {
            Some(member) => {
                if !member.roles.contains(&role_id) {
                    member.roles.push(role_id);
                }
                Ok(())
            }
            None => bail!("Unknown Member {}", user_id),
        }
    }

    async fn remove_member_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<()> {
        check_guild(guild_id)?;
        let mut state = self.begin_mutation("remove_member_role")?;
        match state.members.iter_mut().find(|member| member.id == user_id) {
            Some(member) => {
                member.roles.retain(|id| *id != role_id);
                Ok(())
            }
            None => bail!("Unknown Member {}", user_id),
        }
    }

    async fn send_message(&self, channel_id: ChannelId, content: &str) -> Result<()> {
        let mut state = self.begin("send_message")?;
        state.messages.push((channel_id, content.to_owned()));
        Ok(())
    }
}

#[async_trait]
impl StatusSurface for MockPlatform {
    async fn set_status(&self, text: &str) -> Result<()> {
        let mut state = self.begin("set_status")?;
        state.statuses.push(text.to_owned());
        Ok(())
    }

    async fn clear_status(&self) -> Result<()> {
        let mut state = self.begin("clear_status")?;
        state.statuses.push(String::new());
        Ok(())
    }
}

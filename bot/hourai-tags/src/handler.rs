use crate::{
    color, listing, membership,
    parser::{Parser, Polarity},
    platform::{ChannelId, GuildId, GuildPlatform, UserRef},
    registry,
    validator::{self, Command, CommandKind},
};
use anyhow::Result;
use hourai::{commands::CommandError, models::channel::Message, prelude::*};

/// The parts of a gateway message a command is built from.
#[derive(Clone, Debug)]
pub struct IncomingMessage {
    pub channel_id: ChannelId,
    pub guild_id: Option<GuildId>,
    pub author: UserRef,
    pub mentions: Vec<UserRef>,
    pub content: String,
}

impl From<&Message> for IncomingMessage {
    fn from(value: &Message) -> Self {
        Self {
            channel_id: value.channel_id,
            guild_id: value.guild_id,
            author: UserRef::from(&value.author),
            mentions: value.mentions.iter().map(UserRef::from).collect(),
            content: value.content.clone(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The message was not a command.
    Ignored,
    Granted { role: String, created: bool },
    Revoked { role: String, deleted: bool },
    Listed { role: String, holders: usize },
}

/// Runs a single message through the whole command pipeline.
///
/// Every call is independent. Nothing is shared between concurrent calls
/// except the platform, and all guild state is read from and written to
/// Discord directly.
pub async fn handle_message<P>(
    platform: &P,
    parser: &Parser,
    message: &IncomingMessage,
) -> Result<Outcome>
where
    P: GuildPlatform + ?Sized,
{
    let parsed = match parser.parse(&message.content, message.author.bot) {
        Some(parsed) => parsed,
        None => return Ok(Outcome::Ignored),
    };

    let verb = parsed.verb.name();
    let polarity = match parsed.polarity {
        Polarity::Grant => "grant",
        Polarity::Revoke => "revoke",
    };
    let result = match validator::validate(parsed, &message.author, &message.mentions) {
        Ok(command) => {
            info!(
                "Received command from {} ({}) in channel {}: {} {}",
                message.author.name,
                message.author.id,
                message.channel_id,
                command.kind.name(),
                command.role_name
            );
            execute(platform, parser.prefix(), message, &command).await
        }
        Err(err) => Err(err.into()),
    };

    metrics::increment_counter!(
        "hourai_tags_commands_total",
        "verb" => verb,
        "polarity" => polarity,
        "outcome" => outcome_label(&result)
    );
    result
}

async fn execute<P>(
    platform: &P,
    prefix: char,
    message: &IncomingMessage,
    command: &Command,
) -> Result<Outcome>
where
    P: GuildPlatform + ?Sized,
{
    let guild_id = resolve_guild(platform, message).await?;
    let guild = platform.guild(guild_id).await?;
    let role_name = command.role_name.as_str();

    match command.kind {
        CommandKind::ListMembers => {
            let holders =
                listing::list(platform, &guild, message.channel_id, role_name, prefix).await?;
            Ok(Outcome::Listed {
                role: command.role_name.clone(),
                holders,
            })
        }
        CommandKind::AddSelf | CommandKind::AddMention => {
            let color = color::resolve(command.color.as_deref(), &mut rand::thread_rng())?;
            let resolved = registry::fetch_or_create(platform, &guild, role_name, color).await?;
            membership::grant(platform, &guild, command.target.id, &resolved.role).await?;
            Ok(Outcome::Granted {
                role: command.role_name.clone(),
                created: resolved.created,
            })
        }
        CommandKind::RemoveSelf | CommandKind::RemoveMention => {
            if let Some(hex) = command.color.as_deref() {
                color::parse_hex(hex)?;
            }
            let role = registry::find_existing(&guild, role_name)?.clone();
            let deleted = membership::revoke(platform, &guild, command.target.id, &role).await?;
            Ok(Outcome::Revoked {
                role: command.role_name.clone(),
                deleted,
            })
        }
    }
}

async fn resolve_guild<P>(platform: &P, message: &IncomingMessage) -> Result<GuildId>
where
    P: GuildPlatform + ?Sized,
{
    if let Some(guild_id) = message.guild_id {
        return Ok(guild_id);
    }

    match platform.guild_id(message.channel_id).await {
        Ok(guild_id) => Ok(guild_id),
        Err(err) => {
            debug!(
                "Failed to find guild for channel {}: {}",
                message.channel_id, err
            );
            Err(CommandError::NotInGuild.into())
        }
    }
}

fn outcome_label(result: &Result<Outcome>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(err) => err
            .downcast_ref::<CommandError>()
            .map(CommandError::kind)
            .unwrap_or("platform_error"),
    }
}

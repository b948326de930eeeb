use crate::{
    parser::{ParsedCommand, Polarity, Verb},
    platform::UserRef,
};
use hourai::commands::CommandError;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CommandKind {
    AddSelf,
    RemoveSelf,
    AddMention,
    RemoveMention,
    ListMembers,
}

impl CommandKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::AddSelf => "add_self",
            Self::RemoveSelf => "remove_self",
            Self::AddMention => "add_mention",
            Self::RemoveMention => "remove_mention",
            Self::ListMembers => "list_members",
        }
    }
}

/// A fully validated command, ready to run against a guild.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Command {
    pub kind: CommandKind,
    pub role_name: String,
    pub color: Option<String>,
    /// The member whose roles change. For `who` this is the author.
    pub target: UserRef,
}

/// Checks argument and mention counts, and maps positional arguments.
pub fn validate(
    parsed: ParsedCommand,
    author: &UserRef,
    mentions: &[UserRef],
) -> Result<Command, CommandError> {
    let ParsedCommand {
        verb,
        polarity,
        mut args,
    } = parsed;

    match verb {
        Verb::Me => {
            if !mentions.is_empty() {
                return Err(CommandError::UnexpectedMentions);
            }
            require_args(&args, 1)?;
            let color = take_optional(&mut args, 1);
            Ok(Command {
                kind: match polarity {
                    Polarity::Grant => CommandKind::AddSelf,
                    Polarity::Revoke => CommandKind::RemoveSelf,
                },
                role_name: args.swap_remove(0),
                color,
                target: author.clone(),
            })
        }
        Verb::Em => {
            let target = match mentions {
                [target] => target.clone(),
                _ => {
                    return Err(CommandError::InvalidMentionCount {
                        expected: 1,
                        found: mentions.len(),
                    })
                }
            };
            // The first argument is the mention itself.
            require_args(&args, 2)?;
            let color = take_optional(&mut args, 2);
            Ok(Command {
                kind: match polarity {
                    Polarity::Grant => CommandKind::AddMention,
                    Polarity::Revoke => CommandKind::RemoveMention,
                },
                role_name: args.swap_remove(1),
                color,
                target,
            })
        }
        Verb::Who => {
            if !mentions.is_empty() {
                return Err(CommandError::InvalidMentionCount {
                    expected: 0,
                    found: mentions.len(),
                });
            }
            require_args(&args, 1)?;
            if args.len() > 1 {
                return Err(CommandError::ExcessArguments);
            }
            Ok(Command {
                kind: CommandKind::ListMembers,
                role_name: args.swap_remove(0),
                color: None,
                target: author.clone(),
            })
        }
    }
}

fn require_args(args: &[String], count: usize) -> Result<(), CommandError> {
    if args.len() < count {
        Err(CommandError::MissingArgument)
    } else {
        Ok(())
    }
}

fn take_optional(args: &mut Vec<String>, idx: usize) -> Option<String> {
    if args.len() > idx {
        Some(args.remove(idx))
    } else {
        None
    }
}

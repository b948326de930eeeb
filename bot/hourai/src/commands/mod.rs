use thiserror::Error;

/// The sum type of all user-facing errors a text command can fail with.
///
/// These never touch guild state: every variant is raised before the first
/// mutating request is made. Failures from the Discord API itself are not
/// represented here and are propagated verbatim through `anyhow`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unable to fetch guild")]
    NotInGuild,
    #[error("Found mentions")]
    UnexpectedMentions,
    #[error("Invalid number of mentions: expected {expected}, found {found}")]
    InvalidMentionCount { expected: usize, found: usize },
    #[error("Not enough args")]
    MissingArgument,
    #[error("Too many args")]
    ExcessArguments,
    #[error("Invalid hex color: {}", .0)]
    InvalidColor(String),
    #[error("{} is not an existing role", .0)]
    UnknownRole(String),
    #[error("{} has invalid permissions", .0)]
    InvalidPermissions(String),
    #[error("{} is not mentionable", .0)]
    NotMentionable(String),
}

impl CommandError {
    /// A short, stable label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotInGuild => "not_in_guild",
            Self::UnexpectedMentions | Self::InvalidMentionCount { .. } => "mentions",
            Self::MissingArgument | Self::ExcessArguments => "arguments",
            Self::InvalidColor(_) => "color",
            Self::UnknownRole(_) => "unknown_role",
            Self::InvalidPermissions(_) | Self::NotMentionable(_) => "invalid_role",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CommandError;

    #[test]
    fn test_role_errors_name_the_role() {
        assert_eq!(
            CommandError::InvalidPermissions("artist".into()).to_string(),
            "artist has invalid permissions"
        );
        assert_eq!(
            CommandError::NotMentionable("artist".into()).to_string(),
            "artist is not mentionable"
        );
        assert_eq!(
            CommandError::UnknownRole("Artist".into()).to_string(),
            "Artist is not an existing role"
        );
    }

    #[test]
    fn test_mention_count_message() {
        let err = CommandError::InvalidMentionCount {
            expected: 1,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "Invalid number of mentions: expected 1, found 2"
        );
        assert_eq!(err.kind(), "mentions");
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = CommandError::ExcessArguments.into();
        assert_eq!(
            err.downcast_ref::<CommandError>(),
            Some(&CommandError::ExcessArguments)
        );
    }
}

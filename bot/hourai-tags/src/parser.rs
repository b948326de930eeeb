use hourai::prelude::*;
use regex::Regex;
use std::borrow::Cow;

lazy_static! {
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"[\s\p{Zs}]+").unwrap();
}

/// The family of a text command, independent of whether it grants or revokes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Verb {
    /// Tag yourself.
    Me,
    /// Tag the single mentioned user.
    Em,
    /// List the holders of a tag.
    Who,
}

impl Verb {
    pub fn name(self) -> &'static str {
        match self {
            Self::Me => "me",
            Self::Em => "em",
            Self::Who => "who",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "me" => Some(Self::Me),
            "em" => Some(Self::Em),
            "who" => Some(Self::Who),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Polarity {
    Grant,
    Revoke,
}

/// A recognized command whose arguments have not been checked yet.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsedCommand {
    pub verb: Verb,
    pub polarity: Polarity,
    pub args: Vec<String>,
}

/// Collapses every run of whitespace into a single space.
pub fn normalize_whitespace(text: &str) -> Cow<'_, str> {
    WHITESPACE_REGEX.replace_all(text, " ")
}

#[derive(Clone, Debug)]
pub struct Parser {
    prefix: char,
}

impl Parser {
    pub fn new(prefix: char) -> Self {
        Self { prefix }
    }

    pub fn prefix(&self) -> char {
        self.prefix
    }

    /// Decodes a raw message into a command.
    ///
    /// Messages from users must start with the prefix. Bot messages are always
    /// inspected, but still have to name a known verb after their first
    /// character to be accepted. The prefix doubles as the revoke marker
    /// inside the verb token: `!me` grants, `!!me` revokes.
    pub fn parse(&self, content: &str, author_is_bot: bool) -> Option<ParsedCommand> {
        if !content.starts_with(self.prefix) && !author_is_bot {
            return None;
        }

        let normalized = normalize_whitespace(content);
        let mut tokens = normalized.split(' ').filter(|token| !token.is_empty());
        let head = tokens.next()?;

        let mut chars = head.chars();
        chars.next();
        let (verb, polarity) = match self.decode_verb(chars.as_str()) {
            Some(decoded) => decoded,
            None => {
                debug!("Valid command not detected in message: {}", content);
                return None;
            }
        };

        Some(ParsedCommand {
            verb,
            polarity,
            args: tokens.map(String::from).collect(),
        })
    }

    fn decode_verb(&self, raw: &str) -> Option<(Verb, Polarity)> {
        let (polarity, name) = match raw.strip_prefix(self.prefix) {
            Some(name) => (Polarity::Revoke, name),
            None => (Polarity::Grant, raw),
        };
        Verb::from_name(name).map(|verb| (verb, polarity))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new('!')
    }
}

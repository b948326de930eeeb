use crate::{handler::Outcome, platform::StatusSurface};
use anyhow::Result;
use hourai::prelude::*;

/// Discord rejects activity names longer than this.
const MAX_STATUS_LENGTH: usize = 128;

/// Publishes the result of a command.
///
/// Failures are logged and shown as the bot's presence. Successes reset the
/// presence to `idle` when one is configured and clear it otherwise. `who`
/// listings have already been sent to the channel by the time this runs.
pub async fn report<S>(surface: &S, idle: Option<&str>, result: &Result<Outcome>) -> Result<()>
where
    S: StatusSurface + ?Sized,
{
    match result {
        Ok(Outcome::Ignored) => Ok(()),
        Ok(outcome) => {
            debug!("Command succeeded: {:?}", outcome);
            match idle {
                Some(idle) => surface.set_status(idle).await,
                None => surface.clear_status().await,
            }
        }
        Err(err) => {
            error!("Error while running command: {} ({:?})", err, err);
            surface.set_status(&status_text(err)).await
        }
    }
}

fn status_text(err: &anyhow::Error) -> String {
    let text = err.to_string();
    match text.char_indices().nth(MAX_STATUS_LENGTH) {
        Some((idx, _)) => text[..idx].to_owned(),
        None => text,
    }
}

#[macro_use]
extern crate lazy_static;

mod color;
mod discord;
mod handler;
mod listing;
mod membership;
mod parser;
mod platform;
mod registry;
mod reply;
mod validator;

#[cfg(test)]
mod testing;

use crate::{
    discord::{DiscordPlatform, ShardStatus},
    handler::IncomingMessage,
    parser::Parser,
};
use anyhow::Result;
use clap::Parser as _;
use futures::stream::StreamExt;
use hourai::{
    config,
    gateway::{cluster::*, Event, EventTypeFlags, Intents},
    init,
    models::channel::Message,
    prelude::*,
};
use std::path::PathBuf;

const BOT_INTENTS: Intents = Intents::from_bits_truncate(
    Intents::GUILDS.bits()
        | Intents::GUILD_MESSAGES.bits()
        | Intents::GUILD_MEMBERS.bits()
        | Intents::MESSAGE_CONTENT.bits(),
);

const BOT_EVENTS: EventTypeFlags = EventTypeFlags::from_bits_truncate(
    EventTypeFlags::READY.bits() | EventTypeFlags::MESSAGE_CREATE.bits(),
);

/// Self-service tag roles for Discord servers.
#[derive(clap::Parser, Debug)]
#[command(name = "hourai-tags", version)]
struct Args {
    /// Bot token. Overrides discord.bot_token from the config.
    #[arg(short = 't', long = "token")]
    token: Option<String>,

    /// JSON config to load instead of /etc/hourai/$HOURAI_ENV.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = match args.config {
        Some(ref path) => config::load_config(path)?,
        None => config::load_config(config::get_config_path().as_ref())?,
    };

    init::init(&config)?;
    let token = config.bot_token(args.token.as_deref())?;
    let parser = Parser::new(config.prefix()?);
    let http_client = Arc::new(init::http_client(&config, token.clone()));

    let (gateway, mut events) = Cluster::builder(token, BOT_INTENTS)
        .http_client(http_client.clone())
        .event_types(BOT_EVENTS)
        .build()
        .await?;
    let gateway = Arc::new(gateway);

    let client = Client(Arc::new(ClientRef {
        gateway: gateway.clone(),
        platform: DiscordPlatform::new(http_client),
        parser,
        idle_status: config.status.idle.clone(),
    }));

    info!("Starting gateway...");
    gateway.up().await;
    info!("Client started.");

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => { break; }
            res = events.next() => {
                if let Some((shard_id, evt)) = res {
                    tokio::spawn(client.clone().consume_event(shard_id, evt));
                } else {
                    break;
                }
            }
        }
    }

    info!("Shutting down gateway...");
    gateway.down();
    info!("Client stopped.");
    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};
    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = terminate.recv() => {}
            }
        }
        Err(err) => {
            warn!("Cannot listen for SIGTERM: {}", err);
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

struct ClientRef {
    pub gateway: Arc<Cluster>,
    pub platform: DiscordPlatform,
    pub parser: Parser,
    pub idle_status: Option<String>,
}

#[derive(Clone)]
pub struct Client(Arc<ClientRef>);

impl Client {
    async fn consume_event(self, shard_id: u64, event: Event) {
        let kind = event.kind();
        let result = match event {
            Event::Ready(evt) => {
                info!("Shard {} ready as {}", shard_id, evt.user.name);
                Ok(())
            }
            Event::MessageCreate(evt) => self.on_message_create(shard_id, evt.0).await,
            _ => {
                error!("Unexpected event type: {:?}", event);
                Ok(())
            }
        };

        if let Err(err) = result {
            error!(
                "Error while running event with {:?}: {} ({:?})",
                kind, err, err
            );
        }
    }

    async fn on_message_create(&self, shard_id: u64, evt: Message) -> Result<()> {
        let message = IncomingMessage::from(&evt);
        let result = handler::handle_message(&self.0.platform, &self.0.parser, &message).await;
        let status = ShardStatus::new(self.0.gateway.clone(), shard_id);
        reply::report(&status, self.0.idle_status.as_deref(), &result).await
    }
}

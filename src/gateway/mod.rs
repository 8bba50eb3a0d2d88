//! Gateway: the event loop joining channels, the video source, the settings
//! store and the translator.

mod replies;


use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use ytinfo_core::config::RepliesConfig;
use ytinfo_core::message::{ChannelEvent, Interaction, OutgoingMessage};
use ytinfo_core::settings::EffectiveSettings;
use ytinfo_core::traits::{Channel, VideoSource};
use ytinfo_i18n::Translator;
use ytinfo_store::Store;

use crate::commands::{self, Command, CommandContext};
use crate::locale::pick_language;

/// Routes channel events to auto-replies and command handlers.
pub struct Gateway {
    pub(super) channels: HashMap<String, Arc<dyn Channel>>,
    pub(super) source: Arc<dyn VideoSource>,
    pub(super) store: Store,
    pub(super) translator: Arc<Translator>,
    pub(super) replies: RepliesConfig,
}

impl Gateway {
    pub fn new(
        channels: HashMap<String, Arc<dyn Channel>>,
        source: Arc<dyn VideoSource>,
        store: Store,
        translator: Arc<Translator>,
        replies: RepliesConfig,
    ) -> Self {
        Self {
            channels,
            source,
            store,
            translator,
            replies,
        }
    }

    /// Run the main event loop until every channel closes or a shutdown
    /// signal arrives.
    pub async fn run(&self) -> anyhow::Result<()> {
        info!(
            "ytinfo gateway running | source: {} | channels: {} | languages: {}",
            self.source.name(),
            self.channels.keys().cloned().collect::<Vec<_>>().join(", "),
            self.translator.languages().join(", "),
        );

        let (tx, mut rx) = mpsc::channel::<(String, ChannelEvent)>(256);

        for (name, channel) in &self.channels {
            let mut channel_rx = channel
                .start()
                .await
                .map_err(|e| anyhow::anyhow!("failed to start channel {name}: {e}"))?;
            let tx = tx.clone();
            let channel_name = name.clone();

            tokio::spawn(async move {
                while let Some(event) = channel_rx.recv().await {
                    if tx.send((channel_name.clone(), event)).await.is_err() {
                        info!("gateway receiver dropped, stopping {channel_name} forwarder");
                        break;
                    }
                }
            });

            info!("Channel started: {name}");
        }

        drop(tx);

        loop {
            tokio::select! {
                event = rx.recv() => match event {
                    Some((channel, event)) => self.handle_event(&channel, event).await,
                    None => {
                        info!("All channels closed");
                        break;
                    }
                },
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        self.shutdown().await;
        Ok(())
    }

    /// Handle one event from `channel_name` and deliver the reply, if any.
    pub async fn handle_event(&self, channel_name: &str, event: ChannelEvent) {
        let Some(channel) = self.channels.get(channel_name) else {
            warn!("event from unknown channel {channel_name}");
            return;
        };

        match event {
            ChannelEvent::Message(message) => {
                if let Some(reply) = self.reply_to_message(&message).await {
                    if let Err(e) = channel.send(reply).await {
                        error!("failed to send reply to {}: {e}", message.id);
                    }
                }
            }
            ChannelEvent::Interaction(interaction) => {
                let reply = self.answer_interaction(&interaction).await;
                if let Err(e) = channel.respond(&interaction.id, reply).await {
                    error!("failed to answer interaction {}: {e}", interaction.id);
                }
            }
        }
    }

    /// The response to a command invocation.
    pub async fn answer_interaction(&self, interaction: &Interaction) -> OutgoingMessage {
        let settings = self
            .settings_for(interaction.guild_id.as_deref(), &interaction.user_id)
            .await;
        let language = pick_language(
            &self.translator,
            [
                settings.locale.as_deref(),
                interaction.locale.as_deref(),
                interaction.guild_locale.as_deref(),
            ],
        );

        let ctx = CommandContext {
            store: &self.store,
            translator: &self.translator,
            source: self.source.as_ref(),
            replies: &self.replies,
            interaction,
            language: &language,
            settings: &settings,
        };

        match Command::parse(&interaction.data, &self.translator) {
            Some(cmd) => {
                debug!("interaction {}: {cmd:?}", interaction.id);
                commands::handle(cmd, &ctx).await
            }
            None => {
                warn!("unknown command in interaction {}", interaction.id);
                ctx.private_reply(ctx.t("errors.unknown_command"))
            }
        }
    }

    /// Effective settings, or config defaults when the store is unavailable.
    pub(super) async fn settings_for(
        &self,
        guild_id: Option<&str>,
        user_id: &str,
    ) -> EffectiveSettings {
        match self
            .store
            .effective_settings(&self.replies, guild_id, user_id)
            .await
        {
            Ok(settings) => settings,
            Err(e) => {
                warn!("settings lookup failed, using defaults: {e}");
                EffectiveSettings::resolve(&self.replies, None, None)
            }
        }
    }

    /// Stop all channels.
    async fn shutdown(&self) {
        info!("Shutting down...");
        for (name, channel) in &self.channels {
            if let Err(e) = channel.stop().await {
                warn!("failed to stop channel {name}: {e}");
            }
        }
        info!("Shutdown complete.");
    }
}

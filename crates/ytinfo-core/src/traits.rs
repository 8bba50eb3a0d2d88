use crate::{
    error::BotError,
    message::{ChannelEvent, OutgoingMessage},
    video::VideoInfo,
};
use async_trait::async_trait;

/// Chat platform channel.
///
/// A platform adapter (gateway connection plus REST client) implements this
/// trait so the bot can receive events and answer them.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for events.
    /// Returns a receiver that yields messages and interactions.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<ChannelEvent>, BotError>;

    /// Post a message.
    async fn send(&self, message: OutgoingMessage) -> Result<(), BotError>;

    /// Answer an interaction.
    async fn respond(&self, interaction_id: &str, message: OutgoingMessage)
        -> Result<(), BotError>;

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), BotError>;
}

/// Video metadata provider.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Human-readable source name.
    fn name(&self) -> &str;

    /// Fetch metadata for the given video IDs.
    ///
    /// IDs the source does not know are left out of the result; order follows
    /// the request.
    async fn fetch(&self, ids: &[String]) -> Result<Vec<VideoInfo>, BotError>;
}

//! Slash and context-menu commands: the localized manifest and the handlers.

mod info;
pub mod manifest;
mod settings;


use ytinfo_core::config::RepliesConfig;
use ytinfo_core::message::{IncomingMessage, Interaction, InteractionData, OutgoingMessage};
use ytinfo_core::settings::EffectiveSettings;
use ytinfo_core::traits::VideoSource;
use ytinfo_i18n::{Args, Translator};
use ytinfo_store::Store;

pub use manifest::{build_manifest, CommandChoice, CommandDefinition, CommandOption};

/// Grouped context for command execution.
pub struct CommandContext<'a> {
    pub store: &'a Store,
    pub translator: &'a Translator,
    pub source: &'a dyn VideoSource,
    pub replies: &'a RepliesConfig,
    pub interaction: &'a Interaction,
    /// Language replies are written in.
    pub language: &'a str,
    /// Settings that apply to the invoking user where the command was run.
    pub settings: &'a EffectiveSettings,
}

impl CommandContext<'_> {
    pub(crate) fn t(&self, key: &str) -> String {
        self.translator.t(self.language, key)
    }

    pub(crate) fn t_with(&self, key: &str, args: &Args) -> String {
        self.translator.t_with(self.language, key, args)
    }

    /// A reply only the invoking user sees.
    pub(crate) fn private_reply(&self, text: String) -> OutgoingMessage {
        OutgoingMessage {
            ephemeral: true,
            ..OutgoingMessage::text(&self.interaction.channel_id, text)
        }
    }
}

/// Which settings a `/settings` command changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Guild,
    User,
}

/// A `/settings <scope> …` subcommand with its raw option values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsAction {
    Show,
    InfoLevel(String),
    NumberFormat(String),
    Locale(String),
    AutoReply(bool),
    Reset { confirm: bool },
}

/// Known commands.
#[derive(Debug, Clone)]
pub enum Command {
    Info {
        video: String,
        level: Option<String>,
    },
    Settings {
        scope: Scope,
        action: SettingsAction,
    },
    /// The "Video info" message command.
    VideoInfo(IncomingMessage),
}

/// Name a command element is registered under: its name in the active language.
///
/// The platform always reports invocations by these names, whatever the
/// invoking user's locale.
pub fn registered_name(tr: &Translator, key: &str) -> String {
    tr.resolve(None, key, &Args::none())
}

impl Command {
    /// Parse an invocation. Returns `None` for anything the bot did not register.
    pub fn parse(data: &InteractionData, tr: &Translator) -> Option<Self> {
        match data {
            InteractionData::MessageCommand { name, target } => {
                if *name == registered_name(tr, "commands.video_info.name") {
                    Some(Self::VideoInfo(target.clone()))
                } else {
                    None
                }
            }
            InteractionData::Command { path, .. } => {
                let segments: Vec<&str> = path.iter().map(String::as_str).collect();
                Self::parse_command(data, &segments, tr)
            }
        }
    }

    fn parse_command(data: &InteractionData, segments: &[&str], tr: &Translator) -> Option<Self> {
        let is = |segment: &str, key: &str| segment == registered_name(tr, key);
        let option = |key: &str| registered_name(tr, key);

        match *segments {
            [cmd] if is(cmd, "commands.info.name") => Some(Self::Info {
                video: data
                    .string_option(&option("commands.info.options.video.name"))
                    .unwrap_or_default()
                    .to_string(),
                level: data
                    .string_option(&option("commands.info.options.level.name"))
                    .map(str::to_string),
            }),
            [cmd, scope, action] if is(cmd, "commands.settings.name") => {
                let scope = if is(scope, "commands.settings.guild.name") {
                    Scope::Guild
                } else if is(scope, "commands.settings.user.name") {
                    Scope::User
                } else {
                    return None;
                };

                let value = || {
                    data.string_option(&option("commands.settings.options.value.name"))
                        .unwrap_or_default()
                        .to_string()
                };
                let action = if is(action, "commands.settings.show.name") {
                    SettingsAction::Show
                } else if is(action, "commands.settings.info_level.name") {
                    SettingsAction::InfoLevel(value())
                } else if is(action, "commands.settings.number_format.name") {
                    SettingsAction::NumberFormat(value())
                } else if is(action, "commands.settings.locale.name") {
                    SettingsAction::Locale(value())
                } else if is(action, "commands.settings.auto_reply.name") {
                    SettingsAction::AutoReply(data.bool_option(&option(
                        "commands.settings.options.enabled.name",
                    ))?)
                } else if is(action, "commands.settings.reset.name") {
                    SettingsAction::Reset {
                        confirm: data
                            .bool_option(&option("commands.settings.options.confirm.name"))
                            .unwrap_or(false),
                    }
                } else {
                    return None;
                };
                Some(Self::Settings { scope, action })
            }
            _ => None,
        }
    }
}

/// Handle a command and return the response.
pub async fn handle(cmd: Command, ctx: &CommandContext<'_>) -> OutgoingMessage {
    match cmd {
        Command::Info { video, level } => info::handle_info(ctx, &video, level.as_deref()).await,
        Command::VideoInfo(target) => info::handle_video_info(ctx, &target).await,
        Command::Settings { scope, action } => {
            settings::handle_settings(ctx, scope, action).await
        }
    }
}

//! The command manifest pushed to the platform's command registration API.
//!
//! Names and descriptions carry a localization map for every loaded language,
//! so each user sees the commands in their own client language.

use serde::Serialize;
use std::collections::BTreeMap;
use ytinfo_core::settings::{InfoLevel, NumberFormat};
use ytinfo_i18n::Translator;

use super::registered_name;

/// Application command types.
pub const CHAT_INPUT: u8 = 1;
pub const MESSAGE: u8 = 3;

/// Command option types.
pub const SUB_COMMAND: u8 = 1;
pub const SUB_COMMAND_GROUP: u8 = 2;
pub const STRING: u8 = 3;
pub const BOOLEAN: u8 = 5;

/// One top-level application command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandDefinition {
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub name_localizations: BTreeMap<String, String>,
    pub description: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub description_localizations: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
}

/// A subcommand, subcommand group or value option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandOption {
    #[serde(rename = "type")]
    pub kind: u8,
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub name_localizations: BTreeMap<String, String>,
    pub description: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub description_localizations: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<CommandChoice>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
}

/// A fixed value a string option may take.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandChoice {
    pub name: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub name_localizations: BTreeMap<String, String>,
    pub value: String,
}

/// Every command the bot registers.
pub fn build_manifest(tr: &Translator) -> Vec<CommandDefinition> {
    vec![info_command(tr), settings_command(tr), video_info_command(tr)]
}

fn option(tr: &Translator, kind: u8, key: &str) -> CommandOption {
    CommandOption {
        kind,
        name: registered_name(tr, &format!("{key}.name")),
        name_localizations: tr.localization_map(&format!("{key}.name"), None),
        description: registered_name(tr, &format!("{key}.description")),
        description_localizations: tr.localization_map(&format!("{key}.description"), None),
        required: false,
        choices: Vec::new(),
        options: Vec::new(),
    }
}

fn choice(tr: &Translator, key: &str, value: &str) -> CommandChoice {
    CommandChoice {
        name: registered_name(tr, key),
        name_localizations: tr.localization_map(key, None),
        value: value.to_string(),
    }
}

fn info_level_choices(tr: &Translator) -> Vec<CommandChoice> {
    InfoLevel::ALL
        .iter()
        .map(|l| choice(tr, &format!("choices.info_level.{}", l.as_str()), l.as_str()))
        .collect()
}

fn number_format_choices(tr: &Translator) -> Vec<CommandChoice> {
    NumberFormat::ALL
        .iter()
        .map(|f| choice(tr, &format!("choices.number_format.{}", f.as_str()), f.as_str()))
        .collect()
}

/// Each loaded language, named in itself. Not localized further.
fn language_choices(tr: &Translator) -> Vec<CommandChoice> {
    tr.languages()
        .into_iter()
        .map(|code| CommandChoice {
            name: tr.t(code, "language_name"),
            name_localizations: BTreeMap::new(),
            value: code.to_string(),
        })
        .collect()
}

fn info_command(tr: &Translator) -> CommandDefinition {
    let video = CommandOption {
        required: true,
        ..option(tr, STRING, "commands.info.options.video")
    };
    let level = CommandOption {
        choices: info_level_choices(tr),
        ..option(tr, STRING, "commands.info.options.level")
    };
    CommandDefinition {
        kind: CHAT_INPUT,
        name: registered_name(tr, "commands.info.name"),
        name_localizations: tr.localization_map("commands.info.name", None),
        description: registered_name(tr, "commands.info.description"),
        description_localizations: tr.localization_map("commands.info.description", None),
        options: vec![video, level],
    }
}

/// The subcommands shared by the guild and user groups.
fn settings_subcommands(tr: &Translator) -> Vec<CommandOption> {
    let value = |choices: Vec<CommandChoice>| CommandOption {
        required: true,
        choices,
        ..option(tr, STRING, "commands.settings.options.value")
    };

    vec![
        option(tr, SUB_COMMAND, "commands.settings.show"),
        CommandOption {
            options: vec![value(info_level_choices(tr))],
            ..option(tr, SUB_COMMAND, "commands.settings.info_level")
        },
        CommandOption {
            options: vec![value(number_format_choices(tr))],
            ..option(tr, SUB_COMMAND, "commands.settings.number_format")
        },
        CommandOption {
            options: vec![value(language_choices(tr))],
            ..option(tr, SUB_COMMAND, "commands.settings.locale")
        },
        CommandOption {
            options: vec![CommandOption {
                required: true,
                ..option(tr, BOOLEAN, "commands.settings.options.enabled")
            }],
            ..option(tr, SUB_COMMAND, "commands.settings.auto_reply")
        },
        CommandOption {
            options: vec![option(tr, BOOLEAN, "commands.settings.options.confirm")],
            ..option(tr, SUB_COMMAND, "commands.settings.reset")
        },
    ]
}

fn settings_command(tr: &Translator) -> CommandDefinition {
    let group = |key: &str| CommandOption {
        options: settings_subcommands(tr),
        ..option(tr, SUB_COMMAND_GROUP, key)
    };
    CommandDefinition {
        kind: CHAT_INPUT,
        name: registered_name(tr, "commands.settings.name"),
        name_localizations: tr.localization_map("commands.settings.name", None),
        description: registered_name(tr, "commands.settings.description"),
        description_localizations: tr.localization_map("commands.settings.description", None),
        options: vec![
            group("commands.settings.guild"),
            group("commands.settings.user"),
        ],
    }
}

/// Message commands have no description.
fn video_info_command(tr: &Translator) -> CommandDefinition {
    CommandDefinition {
        kind: MESSAGE,
        name: registered_name(tr, "commands.video_info.name"),
        name_localizations: tr.localization_map("commands.video_info.name", None),
        description: String::new(),
        description_localizations: BTreeMap::new(),
        options: Vec::new(),
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::{
    ApplicationCommandType, ButtonStyle, ChannelId, ComponentType, GuildId, InteractionId,
    InteractionType, TextInputStyle, UserSummary,
};

/// An inbound interaction, already authenticated by the transport.
///
/// On the wire `type` selects the shape of `data`; the typed form keeps the
/// two in lock-step so a command payload can never carry a `custom_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInteraction", into = "RawInteraction")]
pub struct InteractionEnvelope {
    pub id: InteractionId,
    pub data: InteractionData,
    pub guild_id: Option<GuildId>,
    pub channel_id: Option<ChannelId>,
    pub user: Option<UserSummary>,
}

impl InteractionEnvelope {
    pub fn new(id: impl Into<String>, data: InteractionData) -> Self {
        Self {
            id: InteractionId(id.into()),
            data,
            guild_id: None,
            channel_id: None,
            user: None,
        }
    }

    pub fn interaction_type(&self) -> InteractionType {
        self.data.interaction_type()
    }

    /// The string route patterns are matched against: the command name for
    /// commands, the custom id for components and modals.
    pub fn candidate(&self) -> &str {
        match &self.data {
            InteractionData::ApplicationCommand(command)
            | InteractionData::ApplicationCommandAutocomplete(command) => &command.name,
            InteractionData::MessageComponent(component) => &component.custom_id,
            InteractionData::ModalSubmit(modal) => &modal.custom_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InteractionData {
    ApplicationCommand(CommandData),
    ApplicationCommandAutocomplete(CommandData),
    MessageComponent(ComponentData),
    ModalSubmit(ModalSubmitData),
}

impl InteractionData {
    pub fn interaction_type(&self) -> InteractionType {
        match self {
            Self::ApplicationCommand(_) => InteractionType::ApplicationCommand,
            Self::ApplicationCommandAutocomplete(_) => InteractionType::ApplicationCommandAutocomplete,
            Self::MessageComponent(_) => InteractionType::MessageComponent,
            Self::ModalSubmit(_) => InteractionType::ModalSubmit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandData {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOption {
    pub name: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentData {
    pub custom_id: String,
    pub component_type: ComponentType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalSubmitData {
    pub custom_id: String,
    #[serde(default)]
    pub components: Vec<SubmittedRow>,
}

impl ModalSubmitData {
    /// Looks up a submitted text value by the custom id of its input.
    pub fn field(&self, custom_id: &str) -> Option<&str> {
        self.components
            .iter()
            .flat_map(|row| row.components.iter())
            .find(|field| field.custom_id == custom_id)
            .map(|field| field.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedRow {
    #[serde(default)]
    pub components: Vec<SubmittedField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedField {
    pub custom_id: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct RawInteraction {
    id: InteractionId,
    #[serde(rename = "type")]
    interaction_type: InteractionType,
    #[serde(default)]
    data: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    guild_id: Option<GuildId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    channel_id: Option<ChannelId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<UserSummary>,
}

impl TryFrom<RawInteraction> for InteractionEnvelope {
    type Error = serde_json::Error;

    fn try_from(raw: RawInteraction) -> Result<Self, Self::Error> {
        let data = match raw.interaction_type {
            InteractionType::ApplicationCommand => {
                InteractionData::ApplicationCommand(serde_json::from_value(raw.data)?)
            }
            InteractionType::ApplicationCommandAutocomplete => {
                InteractionData::ApplicationCommandAutocomplete(serde_json::from_value(raw.data)?)
            }
            InteractionType::MessageComponent => {
                InteractionData::MessageComponent(serde_json::from_value(raw.data)?)
            }
            InteractionType::ModalSubmit => {
                InteractionData::ModalSubmit(serde_json::from_value(raw.data)?)
            }
        };
        Ok(Self {
            id: raw.id,
            data,
            guild_id: raw.guild_id,
            channel_id: raw.channel_id,
            user: raw.user,
        })
    }
}

impl From<InteractionEnvelope> for RawInteraction {
    fn from(envelope: InteractionEnvelope) -> Self {
        let interaction_type = envelope.interaction_type();
        let data = match envelope.data {
            InteractionData::ApplicationCommand(command)
            | InteractionData::ApplicationCommandAutocomplete(command) => {
                serde_json::to_value(command)
            }
            InteractionData::MessageComponent(component) => serde_json::to_value(component),
            InteractionData::ModalSubmit(modal) => serde_json::to_value(modal),
        };
        Self {
            id: envelope.id,
            interaction_type,
            data: data.unwrap_or(serde_json::Value::Null),
            guild_id: envelope.guild_id,
            channel_id: envelope.channel_id,
            user: envelope.user,
        }
    }
}

/// What a handler sends back for one interaction. "No response" is the
/// absence of a value, never a variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum InteractionResponse {
    Message(MessageData),
    Modal(ModalData),
    DeferredMessage,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ActionRow>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ephemeral: bool,
}

impl MessageData {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalData {
    pub custom_id: String,
    pub title: String,
    pub components: Vec<ActionRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Embed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionRow {
    pub components: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Component {
    Button(Button),
    StringSelect(StringSelect),
    TextInput(TextInput),
}

impl Component {
    pub fn custom_id(&self) -> &str {
        match self {
            Self::Button(button) => &button.custom_id,
            Self::StringSelect(select) => &select.custom_id,
            Self::TextInput(input) => &input.custom_id,
        }
    }

    pub fn component_type(&self) -> ComponentType {
        match self {
            Self::Button(_) => ComponentType::Button,
            Self::StringSelect(_) => ComponentType::StringSelect,
            Self::TextInput(_) => ComponentType::TextInput,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub custom_id: String,
    pub label: String,
    pub style: ButtonStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringSelect {
    pub custom_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub options: Vec<SelectOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextInput {
    pub custom_id: String,
    pub label: String,
    pub style: TextInputStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
}

/// Declares which interactions of one type a feature accepts. Commands are
/// matched by `names`, components and modals by `ids`. A trailing `*` turns
/// an entry into a prefix match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePattern {
    #[serde(rename = "type")]
    pub interaction_type: InteractionType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,
}

impl RoutePattern {
    pub fn names<I, S>(interaction_type: InteractionType, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            interaction_type,
            names: names.into_iter().map(Into::into).collect(),
            ids: Vec::new(),
        }
    }

    pub fn ids<I, S>(interaction_type: InteractionType, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            interaction_type,
            names: Vec::new(),
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// The globs relevant to this pattern's interaction type.
    pub fn globs(&self) -> &[String] {
        match self.interaction_type {
            InteractionType::ApplicationCommand
            | InteractionType::ApplicationCommandAutocomplete => &self.names,
            InteractionType::MessageComponent | InteractionType::ModalSubmit => &self.ids,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionMetadata {
    pub manifest: MiniAppManifest,
    pub supported_interactions: Vec<RoutePattern>,
    pub application_commands: Vec<ApplicationCommandSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiniAppManifest {
    pub app_id: String,
    pub developer: String,
    pub name: String,
    pub platforms: Vec<String>,
    pub short_name: String,
    pub version: ManifestVersion,
    pub website: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestVersion {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationCommandSpec {
    pub metadata: CommandMetadata,
    #[serde(rename = "type")]
    pub command_type: ApplicationCommandType,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandMetadata {
    pub name: String,
    pub short_name: String,
    pub supported_envs: Vec<String>,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;

//! The `/poll` action: a command opens a modal asking for a question and
//! one option per line, the submission posts one button per option, and a
//! button click answers with the chosen option's index.

use shared::{
    domain::{ApplicationCommandType, ButtonStyle, ComponentType, InteractionType, TextInputStyle},
    protocol::{
        ActionMetadata, ActionRow, ApplicationCommandSpec, Button, CommandMetadata, Component,
        Embed, InteractionData, InteractionEnvelope, InteractionResponse, ManifestVersion,
        MessageData, MiniAppManifest, ModalData, ModalSubmitData, RoutePattern, TextInput,
    },
};
use tracing::debug;

use crate::{
    custom_id::{self, CustomId},
    dispatch::{HandleError, InteractionHandler},
};

pub const NAMESPACE: &str = "poll";
pub const COMMAND_NAME: &str = "poll";

const MODAL_KIND: &str = "modal";
const TEXT_KIND: &str = "text";
const BUTTON_KIND: &str = "button";

const DESCRIPTION_FIELD: &str = "description";
const OPTIONS_FIELD: &str = "options";

const MAX_BUTTONS_PER_ROW: usize = 5;
const MAX_CHOICES: usize = 25;

/// Every (interaction type, custom id kind) pair this action answers.
#[derive(Debug)]
enum PollRoute<'a> {
    OpenModal,
    SubmitModal(&'a ModalSubmitData),
    Vote { index: usize },
}

impl<'a> PollRoute<'a> {
    fn resolve(envelope: &'a InteractionEnvelope) -> Result<Self, HandleError> {
        match &envelope.data {
            InteractionData::ApplicationCommand(command) if command.name == COMMAND_NAME => {
                Ok(Self::OpenModal)
            }
            InteractionData::ModalSubmit(modal) => {
                let id = own_id(&modal.custom_id)?;
                match id.as_ref().map(|id| id.kind.as_str()) {
                    Some(MODAL_KIND) => Ok(Self::SubmitModal(modal)),
                    _ => Err(HandleError::unhandled(envelope)),
                }
            }
            InteractionData::MessageComponent(component) => {
                let id = own_id(&component.custom_id)?;
                match (id, component.component_type) {
                    (Some(id), ComponentType::Button) if id.kind == BUTTON_KIND => id
                        .discriminator
                        .parse()
                        .map(|index| Self::Vote { index })
                        .map_err(|_| HandleError::unhandled(envelope)),
                    _ => Err(HandleError::unhandled(envelope)),
                }
            }
            _ => Err(HandleError::unhandled(envelope)),
        }
    }
}

/// Decodes `raw` and keeps it only when it belongs to this action.
fn own_id(raw: &str) -> Result<Option<CustomId>, HandleError> {
    let id = custom_id::decode(raw)?;
    Ok((id.namespace == NAMESPACE).then_some(id))
}

#[derive(Debug, Clone, Default)]
pub struct PollAction;

impl PollAction {
    pub fn new() -> Self {
        Self
    }

    fn open_modal(&self) -> Result<InteractionResponse, HandleError> {
        let text_input = |field: &str, label: &str, placeholder: &str| {
            custom_id::encode(NAMESPACE, TEXT_KIND, field).map(|custom_id| ActionRow {
                components: vec![Component::TextInput(TextInput {
                    custom_id,
                    label: label.to_string(),
                    style: TextInputStyle::Paragraph,
                    placeholder: Some(placeholder.to_string()),
                    required: true,
                })],
            })
        };

        Ok(InteractionResponse::Modal(ModalData {
            custom_id: custom_id::encode(NAMESPACE, MODAL_KIND, MODAL_KIND)?,
            title: "Example modal".to_string(),
            components: vec![
                text_input(DESCRIPTION_FIELD, "Poll Description", "Hello")?,
                text_input(OPTIONS_FIELD, "Options for the poll", "World")?,
            ],
        }))
    }

    fn submit_modal(&self, modal: &ModalSubmitData) -> Result<InteractionResponse, HandleError> {
        let description = submitted(modal, DESCRIPTION_FIELD)?;
        let options = submitted(modal, OPTIONS_FIELD)?.trim();
        let choices: Vec<&str> = options
            .lines()
            .map(str::trim)
            .filter(|choice| !choice.is_empty())
            .collect();
        debug!(choices = choices.len(), "poll submitted");

        if choices.is_empty() {
            return Ok(ephemeral("A poll needs at least one option, one per line."));
        }
        if choices.len() > MAX_CHOICES {
            return Ok(ephemeral(format!(
                "A poll supports at most {MAX_CHOICES} options, got {}.",
                choices.len()
            )));
        }

        let buttons = choices
            .iter()
            .enumerate()
            .map(|(index, choice)| {
                custom_id::encode(NAMESPACE, BUTTON_KIND, index).map(|custom_id| {
                    Component::Button(Button {
                        custom_id,
                        label: choice.to_string(),
                        style: ButtonStyle::Success,
                    })
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(InteractionResponse::Message(MessageData {
            content: None,
            embeds: vec![Embed {
                title: Some(description.to_string()),
                description: Some(options.to_string()),
            }],
            components: buttons
                .chunks(MAX_BUTTONS_PER_ROW)
                .map(|row| ActionRow {
                    components: row.to_vec(),
                })
                .collect(),
            ephemeral: false,
        }))
    }

    fn vote(&self, index: usize) -> InteractionResponse {
        InteractionResponse::Message(MessageData::text(index.to_string()))
    }
}

fn submitted<'a>(modal: &'a ModalSubmitData, field: &str) -> Result<&'a str, HandleError> {
    let custom_id = custom_id::encode(NAMESPACE, TEXT_KIND, field)?;
    modal
        .field(&custom_id)
        .ok_or_else(|| HandleError::Malformed(format!("modal submission lacks `{custom_id}`")))
}

fn ephemeral(content: impl Into<String>) -> InteractionResponse {
    InteractionResponse::Message(MessageData {
        ephemeral: true,
        ..MessageData::text(content)
    })
}

impl InteractionHandler for PollAction {
    fn supported_interactions(&self) -> Vec<RoutePattern> {
        let command_glob = format!("{COMMAND_NAME}*");
        let id_glob = format!("{NAMESPACE}{}*", custom_id::DELIMITER);
        vec![
            RoutePattern::names(InteractionType::ApplicationCommand, [command_glob.clone()]),
            RoutePattern::names(InteractionType::ApplicationCommandAutocomplete, [command_glob]),
            RoutePattern::ids(InteractionType::MessageComponent, [id_glob.clone()]),
            RoutePattern::ids(InteractionType::ModalSubmit, [id_glob]),
        ]
    }

    fn metadata(&self) -> ActionMetadata {
        ActionMetadata {
            manifest: MiniAppManifest {
                app_id: "poll-action".to_string(),
                developer: "collab.land".to_string(),
                name: "PollAction".to_string(),
                platforms: vec!["discord".to_string()],
                short_name: "poll-action".to_string(),
                version: ManifestVersion {
                    name: "0.0.1".to_string(),
                },
                website: "https://collab.land".to_string(),
                description: "An example Collab action to illustrate various Discord UI elements"
                    .to_string(),
            },
            supported_interactions: self.supported_interactions(),
            application_commands: vec![ApplicationCommandSpec {
                metadata: CommandMetadata {
                    name: "PollAction".to_string(),
                    short_name: "poll-action".to_string(),
                    supported_envs: ["poll", "qa", "staging"].map(String::from).to_vec(),
                },
                command_type: ApplicationCommandType::ChatInput,
                name: COMMAND_NAME.to_string(),
                description: "Poll command".to_string(),
            }],
        }
    }

    fn handle(&self, envelope: &InteractionEnvelope) -> Result<InteractionResponse, HandleError> {
        match PollRoute::resolve(envelope)? {
            PollRoute::OpenModal => self.open_modal(),
            PollRoute::SubmitModal(modal) => self.submit_modal(modal),
            PollRoute::Vote { index } => Ok(self.vote(index)),
        }
    }
}

#[cfg(test)]
#[path = "tests/poll_tests.rs"]
mod tests;

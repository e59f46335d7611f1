//! Wire models for the Discord interactions API.
//!
//! Inbound payloads (interactions delivered to the webhook) and outbound
//! shapes (messages, components, interaction responses). Field names follow
//! the platform wire format; numeric discriminators are kept on the wire and
//! mapped to enums at the edge.

use serde::{Deserialize, Serialize};

/// Message flag marking a reply visible only to the requesting user.
pub const EPHEMERAL: u32 = 1 << 6;

/// Button styles.
pub mod button_style {
    pub const PRIMARY: u8 = 1;
    pub const SECONDARY: u8 = 2;
    pub const SUCCESS: u8 = 3;
    pub const DANGER: u8 = 4;
    pub const LINK: u8 = 5;
}

// =============================================================================
// Inbound: interactions
// =============================================================================

/// Interaction kind, decoded from the wire discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Ping,
    Command,
    Component,
    ModalSubmit,
    Unknown,
}

/// One inbound interaction (slash command, button click, modal submission).
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub application_id: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub guild_id: Option<String>,
    #[serde(default)]
    pub channel: Option<Channel>,
    #[serde(default)]
    pub member: Option<GuildMember>,
    #[serde(default)]
    pub data: Option<InteractionData>,
}

impl Interaction {
    pub fn kind(&self) -> InteractionKind {
        match self.kind {
            1 => InteractionKind::Ping,
            2 => InteractionKind::Command,
            3 => InteractionKind::Component,
            5 => InteractionKind::ModalSubmit,
            _ => InteractionKind::Unknown,
        }
    }

    /// The acting user, when the interaction came from a guild member.
    pub fn user(&self) -> Option<&User> {
        self.member.as_ref().and_then(|m| m.user.as_ref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Channel {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuildMember {
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

/// The `data` object of a command, component, or modal interaction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InteractionData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub custom_id: Option<String>,
    #[serde(default)]
    pub options: Vec<CommandOption>,
    #[serde(default)]
    pub components: Vec<SubmittedRow>,
}

impl InteractionData {
    /// Find a subcommand option by name.
    pub fn subcommand(&self, name: &str) -> Option<&CommandOption> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Value of a submitted modal field, by its input custom id.
    pub fn modal_value(&self, custom_id: &str) -> Option<String> {
        self.components
            .iter()
            .flat_map(|row| row.components.iter())
            .find(|field| field.custom_id == custom_id)
            .and_then(|field| field.value.clone())
    }
}

/// A slash-command option (possibly a subcommand carrying nested options).
#[derive(Debug, Clone, Deserialize)]
pub struct CommandOption {
    pub name: String,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

impl CommandOption {
    /// Look up a nested option's value as a string.
    ///
    /// Channel options arrive as string snowflakes; numbers are stringified
    /// so callers see one shape.
    pub fn get_str(&self, name: &str) -> Option<String> {
        let value = self
            .options
            .iter()
            .find(|o| o.name == name)
            .and_then(|o| o.value.as_ref())?;
        match value {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedRow {
    #[serde(default)]
    pub components: Vec<SubmittedField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedField {
    pub custom_id: String,
    #[serde(default)]
    pub value: Option<String>,
}

// =============================================================================
// Outbound: messages and components
// =============================================================================

/// A channel message: content plus a declarative tree of controls.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Message {
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ActionRow>,
}

impl Message {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            components: Vec::new(),
        }
    }

    pub fn with_components(content: impl Into<String>, components: Vec<ActionRow>) -> Self {
        Self {
            content: content.into(),
            components,
        }
    }
}

/// A row of interactive components (wire type 1).
#[derive(Debug, Clone, Serialize)]
pub struct ActionRow {
    #[serde(rename = "type")]
    kind: u8,
    pub components: Vec<Component>,
}

impl ActionRow {
    pub fn new(components: Vec<Component>) -> Self {
        Self {
            kind: 1,
            components,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Component {
    Button(Button),
    TextInput(TextInput),
}

impl From<Button> for Component {
    fn from(button: Button) -> Self {
        Component::Button(button)
    }
}

impl From<TextInput> for Component {
    fn from(input: TextInput) -> Self {
        Component::TextInput(input)
    }
}

/// A button (wire type 2), either action-encoded or URL-linked.
#[derive(Debug, Clone, Serialize)]
pub struct Button {
    #[serde(rename = "type")]
    kind: u8,
    pub style: u8,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub disabled: bool,
}

impl Button {
    pub fn new(style: u8, label: impl Into<String>, custom_id: impl Into<String>) -> Self {
        Self {
            kind: 2,
            style,
            label: label.into(),
            custom_id: Some(custom_id.into()),
            url: None,
            disabled: false,
        }
    }

    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            kind: 2,
            style: button_style::LINK,
            label: label.into(),
            custom_id: None,
            url: Some(url.into()),
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// A modal text input (wire type 4).
#[derive(Debug, Clone, Serialize)]
pub struct TextInput {
    #[serde(rename = "type")]
    kind: u8,
    pub custom_id: String,
    pub style: u8,
    pub label: String,
    pub required: bool,
    pub max_length: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

impl TextInput {
    pub fn short(custom_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: 4,
            custom_id: custom_id.into(),
            style: 1,
            label: label.into(),
            required: true,
            max_length: 100,
            placeholder: None,
        }
    }

    pub fn paragraph(custom_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            kind: 4,
            custom_id: custom_id.into(),
            style: 2,
            label: label.into(),
            required: true,
            max_length: 1000,
            placeholder: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn max_length(mut self, max_length: u32) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }
}

// =============================================================================
// Outbound: interaction responses
// =============================================================================

/// The synchronous reply to an interaction.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

/// Payload of a content reply or modal-display instruction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResponseData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ActionRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl InteractionResponse {
    /// Liveness ack for a `ping` interaction.
    pub fn pong() -> Self {
        Self {
            kind: 1,
            data: None,
        }
    }

    /// Plain content reply, visible to the channel.
    pub fn content(text: impl Into<String>) -> Self {
        Self {
            kind: 4,
            data: Some(ResponseData {
                content: Some(text.into()),
                ..Default::default()
            }),
        }
    }

    /// Content reply visible only to the requesting user.
    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            kind: 4,
            data: Some(ResponseData {
                content: Some(text.into()),
                flags: Some(EPHEMERAL),
                ..Default::default()
            }),
        }
    }

    /// Full message reply (content + components), with the given data.
    pub fn message(data: ResponseData) -> Self {
        Self {
            kind: 4,
            data: Some(data),
        }
    }

    /// Deferred ack; the real reply follows via the follow-up webhook.
    pub fn deferred_ephemeral() -> Self {
        Self {
            kind: 5,
            data: Some(ResponseData {
                flags: Some(EPHEMERAL),
                ..Default::default()
            }),
        }
    }

    /// Modal-display instruction.
    pub fn modal(
        custom_id: impl Into<String>,
        title: impl Into<String>,
        inputs: Vec<TextInput>,
    ) -> Self {
        Self {
            kind: 9,
            data: Some(ResponseData {
                custom_id: Some(custom_id.into()),
                title: Some(title.into()),
                components: inputs
                    .into_iter()
                    .map(|input| ActionRow::new(vec![Component::TextInput(input)]))
                    .collect(),
                ..Default::default()
            }),
        }
    }
}

/// Response body of a successful message post; only the id is needed for
/// the back-fill.
#[derive(Debug, Clone, Deserialize)]
pub struct PostedMessage {
    pub id: String,
}

//! Message contracts between the UI panel and the controller.
//!
//! The two sides share nothing but these types. Each direction is a closed
//! tagged union serialized as `{"type": "...", "payload": ...}`; unit
//! variants carry no payload. Across the host boundary a message may be
//! wrapped in an [`Envelope`] (`{"pluginMessage": ...}`).

use crate::model::{Rgb, ShapeType};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Payloads ────────────────────────────────────────────────────────────

/// A row of generated shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeSpec {
    pub shape_type: ShapeType,
    pub width: f32,
    pub height: f32,
    pub color: Rgb,
    pub count: u32,
    pub spacing: f32,
}

impl ShapeSpec {
    /// Build a validated spec.
    pub fn new(
        shape_type: ShapeType,
        width: f32,
        height: f32,
        color: Rgb,
        count: u32,
        spacing: f32,
    ) -> Result<Self, SpecError> {
        let spec = Self {
            shape_type,
            width,
            height,
            color,
            count,
            spacing,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<(), SpecError> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        if self.count < 1 {
            return Err(SpecError::ZeroCount);
        }
        if self.spacing < 0.0 || self.spacing.is_nan() {
            return Err(SpecError::NegativeSpacing(self.spacing));
        }
        Ok(())
    }

    /// Horizontal distance between consecutive shape origins.
    pub fn pitch(&self) -> f32 {
        self.width + self.spacing
    }
}

/// One icon to place on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IconInsertSpec {
    /// Complete SVG document.
    pub svg: String,
    /// Display name for the inserted node, e.g. `lucide:house`.
    pub name: String,
    /// Edge length of the square the icon is fitted to.
    pub size: f32,
    /// Hex recolor target; `None` keeps the icon's own colors.
    #[serde(default)]
    pub color: Option<String>,
}

impl IconInsertSpec {
    pub fn new(
        svg: impl Into<String>,
        name: impl Into<String>,
        size: f32,
        color: Option<String>,
    ) -> Result<Self, SpecError> {
        let spec = Self {
            svg: svg.into(),
            name: name.into(),
            size,
            color,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<(), SpecError> {
        positive("size", self.size)
    }
}

/// Snapshot of the host selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionInfo {
    pub count: usize,
    /// Distinct node types, in first-seen order.
    pub types: Vec<String>,
}

impl SelectionInfo {
    /// Build from the type of every selected node.
    pub fn from_types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut count = 0;
        let mut distinct: Vec<String> = Vec::new();
        for ty in types {
            count += 1;
            let ty = ty.as_ref();
            if !distinct.iter().any(|d| d == ty) {
                distinct.push(ty.to_string());
            }
        }
        Self {
            count,
            types: distinct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpecError {
    #[error("{field} must be greater than 0 (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("count must be at least 1")]
    ZeroCount,
    #[error("spacing must not be negative (got {0})")]
    NegativeSpacing(f32),
}

fn positive(field: &'static str, value: f32) -> Result<(), SpecError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(SpecError::NotPositive { field, value })
    }
}

// ─── Messages ────────────────────────────────────────────────────────────

/// Intent messages sent from the UI panel to the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UiMessage {
    CreateShapes(ShapeSpec),
    InsertIcon(IconInsertSpec),
    InsertIconsBatch(Vec<IconInsertSpec>),
    GetSelection,
    Cancel,
}

impl UiMessage {
    pub fn tag(&self) -> &'static str {
        match self {
            UiMessage::CreateShapes(_) => "CREATE_SHAPES",
            UiMessage::InsertIcon(_) => "INSERT_ICON",
            UiMessage::InsertIconsBatch(_) => "INSERT_ICONS_BATCH",
            UiMessage::GetSelection => "GET_SELECTION",
            UiMessage::Cancel => "CANCEL",
        }
    }
}

/// Results and state pushed from the controller to the UI panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PluginMessage {
    ShapesCreated { count: u32 },
    IconInserted { name: String },
    SelectionChanged(SelectionInfo),
    Error { message: String },
}

impl PluginMessage {
    pub fn error(message: impl Into<String>) -> Self {
        PluginMessage::Error {
            message: message.into(),
        }
    }
}

/// Host transport wrapper around a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub plugin_message: T,
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid payload: {0}")]
    Spec(#[from] SpecError),
}

/// Serialize a message to its JSON wire form.
pub fn encode<T: Serialize>(message: &T) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(message)?)
}

/// Serialize a message wrapped in an [`Envelope`].
pub fn encode_enveloped<T: Serialize>(message: &T) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(&Envelope {
        plugin_message: message,
    })?)
}

/// Parse a message, accepting both the bare and the enveloped form.
pub fn decode<T: DeserializeOwned>(json: &str) -> Result<T, ProtocolError> {
    let mut value: serde_json::Value = serde_json::from_str(json)?;
    if let Some(inner) = value
        .as_object_mut()
        .and_then(|obj| obj.remove("pluginMessage"))
    {
        value = inner;
    }
    Ok(serde_json::from_value(value)?)
}

/// Parse a UI message and validate its payloads.
pub fn decode_ui(json: &str) -> Result<UiMessage, ProtocolError> {
    let message: UiMessage = decode(json)?;
    match &message {
        UiMessage::CreateShapes(spec) => spec.validate()?,
        UiMessage::InsertIcon(spec) => spec.validate()?,
        UiMessage::InsertIconsBatch(specs) => {
            for spec in specs {
                spec.validate()?;
            }
        }
        UiMessage::GetSelection | UiMessage::Cancel => {}
    }
    Ok(message)
}

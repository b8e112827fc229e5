//! Message dispatch.
//!
//! [`Controller`] owns the host, handles one UI message to completion and
//! answers over the host's message channel. Every failure becomes a single
//! `ERROR` reply; nothing ends the session except `CANCEL`.

use crate::host::{Host, HostError, PanelOptions};
use crate::icons::{BATCH_GAP, insert_batch, insert_icon};
use crate::shapes::create_shapes;
use vd_core::protocol::{self, PluginMessage, SelectionInfo, UiMessage};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    pub panel: PanelOptions,
    pub batch_gap: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            panel: PanelOptions::default(),
            batch_gap: BATCH_GAP,
        }
    }
}

pub struct Controller<H: Host> {
    host: H,
    config: ControllerConfig,
}

impl<H: Host> Controller<H> {
    /// Take over `host` and show the UI panel.
    pub fn start(mut host: H, config: ControllerConfig) -> Self {
        host.show_ui(config.panel);
        Self { host, config }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Handle a raw JSON message from the UI. Malformed input is answered
    /// with an `ERROR`.
    pub fn handle_json(&mut self, json: &str) {
        match protocol::decode_ui(json) {
            Ok(message) => self.handle(message),
            Err(e) => {
                log::warn!("rejected UI message: {e}");
                self.reply(PluginMessage::error(e.to_string()));
            }
        }
    }

    pub fn handle(&mut self, message: UiMessage) {
        let tag = message.tag();
        log::debug!("handling {tag}");
        match self.dispatch(message) {
            Ok(Some(reply)) => self.reply(reply),
            Ok(None) => {}
            Err(message) => {
                log::error!("{tag} failed: {message}");
                self.reply(PluginMessage::Error { message });
            }
        }
    }

    /// The host reported a selection change.
    pub fn on_selection_change(&mut self) {
        match self.selection_info() {
            Ok(info) => self.reply(PluginMessage::SelectionChanged(info)),
            Err(e) => log::warn!("could not read selection: {e}"),
        }
    }

    fn dispatch(&mut self, message: UiMessage) -> Result<Option<PluginMessage>, String> {
        match message {
            UiMessage::CreateShapes(spec) => {
                let count = create_shapes(&mut self.host, &spec).map_err(|e| e.to_string())?;
                self.host.notify(&format!("Created {count} shape(s)!"));
                Ok(Some(PluginMessage::ShapesCreated { count }))
            }
            UiMessage::InsertIcon(spec) => {
                insert_icon(&mut self.host, &spec).map_err(|e| match e {
                    HostError::Import(detail) => {
                        log::warn!("import of {} failed: {detail}", spec.name);
                        format!("Failed to insert icon {}", spec.name)
                    }
                    other => other.to_string(),
                })?;
                self.host.notify(&format!("Inserted {}", spec.name));
                Ok(Some(PluginMessage::IconInserted { name: spec.name }))
            }
            UiMessage::InsertIconsBatch(specs) => {
                let placed = insert_batch(&mut self.host, &specs, self.config.batch_gap)
                    .map_err(|e| e.to_string())?;
                if placed.is_empty() {
                    return Err("Failed to insert icons".to_string());
                }
                let names: Vec<&str> = placed.iter().map(|p| p.name.as_str()).collect();
                self.host.notify(&format!("Inserted {} icon(s)", placed.len()));
                Ok(Some(PluginMessage::IconInserted {
                    name: names.join(", "),
                }))
            }
            UiMessage::GetSelection => {
                let info = self.selection_info().map_err(|e| e.to_string())?;
                Ok(Some(PluginMessage::SelectionChanged(info)))
            }
            UiMessage::Cancel => {
                self.host.close_plugin();
                Ok(None)
            }
        }
    }

    fn selection_info(&self) -> Result<SelectionInfo, HostError> {
        let types = self
            .host
            .selection()?
            .into_iter()
            .map(|id| self.host.type_name(id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SelectionInfo::from_types(types))
    }

    fn reply(&mut self, message: PluginMessage) {
        self.host.post_message(&message);
    }
}

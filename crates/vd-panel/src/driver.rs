//! The panel's event loop.
//!
//! One task owns the [`IconPanel`]: it takes user events, keeps the
//! search debounce, runs searches as separate tasks and exchanges JSON
//! messages with the controller.

use crate::app::IconPanel;
use crate::config::PanelConfig;
use crate::debounce::{Debounce, sleep_until};
use crate::search::{CollectionFilter, SearchOutcome, run_search};
use crate::shape_form::ShapeEdit;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio::time::Instant;
use vd_core::protocol::{self, PluginMessage, UiMessage};
use vd_icons::IconSource;

/// User input.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    Query(String),
    Collection(CollectionFilter),
    /// Click on the `n`-th icon of the grid.
    InsertIcon(usize),
    SetSize(u32),
    /// Custom color on (with its hex) or off.
    SetColor(Option<String>),
    EditShapes(ShapeEdit),
    SubmitShapes,
    RequestSelection,
    Close,
}

/// Something observable happened.
#[derive(Debug)]
pub enum PanelUpdate<'a> {
    Results,
    Sent(&'a UiMessage),
    Received(&'a PluginMessage),
}

pub struct Driver<S: IconSource + 'static> {
    panel: IconPanel,
    source: Arc<S>,
    debounce: Debounce<String>,
    searches: JoinSet<SearchOutcome>,
}

impl<S: IconSource + 'static> Driver<S> {
    pub fn new(source: Arc<S>, config: &PanelConfig) -> Self {
        Self {
            panel: IconPanel::new(config),
            source,
            debounce: Debounce::new(config.debounce),
            searches: JoinSet::new(),
        }
    }

    pub fn panel(&self) -> &IconPanel {
        &self.panel
    }

    /// Run until the user closes the panel or the event stream ends.
    /// Returns the final panel state.
    pub async fn run<F>(
        mut self,
        mut events: mpsc::UnboundedReceiver<PanelEvent>,
        mut from_controller: mpsc::UnboundedReceiver<String>,
        to_controller: mpsc::UnboundedSender<String>,
        mut observe: F,
    ) -> IconPanel
    where
        F: FnMut(PanelUpdate<'_>, &IconPanel),
    {
        // the grid starts out showing the default collection
        self.start_search();
        let mut controller_open = true;

        loop {
            let deadline = self.debounce.deadline();
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else { break };
                    let closing = event == PanelEvent::Close;
                    if let Some(message) = self.on_event(event) {
                        send(&to_controller, &message);
                        observe(PanelUpdate::Sent(&message), &self.panel);
                    }
                    if closing {
                        break;
                    }
                }
                json = from_controller.recv(), if controller_open => {
                    let Some(json) = json else {
                        log::warn!("controller channel closed");
                        controller_open = false;
                        continue;
                    };
                    match protocol::decode::<PluginMessage>(&json) {
                        Ok(message) => {
                            self.panel.apply(message.clone(), Instant::now());
                            observe(PanelUpdate::Received(&message), &self.panel);
                        }
                        Err(e) => log::error!("bad controller message: {e}"),
                    }
                }
                () = sleep_until(deadline) => {
                    if let Some(query) = self.debounce.take_due(Instant::now()) {
                        self.panel.search.set_query(query);
                        self.start_search();
                    }
                }
                Some(joined) = self.searches.join_next(), if !self.searches.is_empty() => {
                    match joined {
                        Ok(outcome) => {
                            if self.panel.search.finish(outcome) {
                                observe(PanelUpdate::Results, &self.panel);
                            }
                        }
                        Err(e) => log::error!("search task failed: {e}"),
                    }
                }
            }
        }

        self.searches.abort_all();
        self.panel
    }

    /// Apply one event; returns the message to send, if any.
    fn on_event(&mut self, event: PanelEvent) -> Option<UiMessage> {
        match event {
            PanelEvent::Query(query) => {
                self.debounce.push(query);
                None
            }
            PanelEvent::Collection(collection) => {
                self.panel.search.set_collection(collection);
                self.start_search();
                None
            }
            PanelEvent::InsertIcon(index) => {
                let message = self.panel.insert_icon(index);
                if message.is_none() {
                    log::warn!("no icon at position {index}");
                }
                message
            }
            PanelEvent::SetSize(size) => {
                self.panel.set_size(size);
                None
            }
            PanelEvent::SetColor(color) => {
                self.panel.set_custom_color(color.is_some());
                if let Some(hex) = color {
                    self.panel.set_color(hex);
                }
                None
            }
            PanelEvent::EditShapes(edit) => {
                self.panel.shapes.edit(edit);
                None
            }
            PanelEvent::SubmitShapes => self.panel.shapes.submit(),
            PanelEvent::RequestSelection => Some(UiMessage::GetSelection),
            PanelEvent::Close => {
                self.debounce.cancel();
                Some(self.panel.close())
            }
        }
    }

    fn start_search(&mut self) {
        let request = self.panel.search.begin();
        log::debug!(
            "searching {:?} in {} (#{})",
            request.query,
            request.collection,
            request.generation
        );
        let source = Arc::clone(&self.source);
        self.searches.spawn(async move {
            let result = run_search(source.as_ref(), &request).await;
            SearchOutcome { request, result }
        });
    }
}

fn send(to_controller: &mpsc::UnboundedSender<String>, message: &UiMessage) {
    match protocol::encode_enveloped(message) {
        Ok(json) => {
            if to_controller.send(json).is_err() {
                log::warn!("controller is gone, dropped {}", message.tag());
            }
        }
        Err(e) => log::error!("could not encode {}: {e}", message.tag()),
    }
}

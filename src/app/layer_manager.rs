use std::ops::{Deref, DerefMut};

use crate::{
    actions::{Action, LayerManageAction, Layers},
    page::{Layer, help_popup::HelpPopup, home::Home},
    tui::Event,
};
use color_eyre::Result;
use ratatui::Frame;
use tracing::{info, warn};

use super::RootState;

pub(super) struct BoxedLayer(Box<dyn Layer>);
impl Deref for BoxedLayer {
    type Target = dyn Layer;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
impl DerefMut for BoxedLayer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.0
    }
}
impl From<Box<dyn Layer>> for BoxedLayer {
    fn from(layer: Box<dyn Layer>) -> Self {
        Self(layer)
    }
}

/// Layers below the top one keep rendering, so popups draw over their page.
pub(super) struct LayerManager {
    layers: Vec<BoxedLayer>,
}

impl LayerManager {
    pub(super) fn new(state: &RootState) -> Self {
        Self {
            layers: vec![Self::get_home(state)],
        }
    }

    pub(super) fn render(&mut self, f: &mut Frame) {
        let area = f.area();
        self.layers
            .iter_mut()
            .for_each(|layer| layer.render(f, area));
    }

    /// Terminal events only go to the top layer.
    pub(super) fn handle_event(&self, event: Event) -> Result<()> {
        match self.layers.last() {
            Some(top) => top.handle_events(event),
            None => Ok(()),
        }
    }

    /// Handle LayerManageAction for root app, updating the layer stack
    pub(super) fn handle_layer_action(&mut self, action: &LayerManageAction, state: &RootState) {
        match action {
            LayerManageAction::Push(target) => {
                let Some(layer) = Self::get_layer(target, state) else {
                    return;
                };
                self.layers.push(layer);
                info!(
                    "Pushing a {} layer, new layer stack length {}",
                    target,
                    self.layers.len()
                );
            }
            LayerManageAction::Pop => {
                self.layers.pop();
                if self.layers.is_empty() {
                    self.layers.push(Self::get_home(state));
                }
                info!(
                    "Popping layer, current layer stack length {}",
                    self.layers.len()
                );
            }
        }
    }

    /// Passing the action to the layer who is interested in it (the top layer)
    pub(super) fn handle_action(&mut self, action: Action) {
        if let Some(top) = self.layers.last_mut() {
            top.update(action);
        }
    }

    fn get_home(state: &RootState) -> BoxedLayer {
        let mut home: Box<dyn Layer> = Box::new(Home::new(
            state.action_tx.clone().into(),
            &state.config.picker,
        ));
        home.init();
        home.into()
    }

    /// Get a new layer based on the given layer type
    fn get_layer(layer: &Layers, state: &RootState) -> Option<BoxedLayer> {
        let mut page = match layer {
            Layers::Help(help_msg) => {
                match HelpPopup::new(state.action_tx.clone().into(), help_msg.clone()) {
                    Some(help) => Box::new(help) as Box<dyn Layer>,
                    None => {
                        warn!("Help message is empty");
                        return None;
                    }
                }
            }
        };
        page.init();
        Some(page.into())
    }
}

impl Deref for LayerManager {
    type Target = Vec<BoxedLayer>;

    fn deref(&self) -> &Self::Target {
        &self.layers
    }
}

use color_eyre::eyre::Context;

use crate::{
    component::time_selector::TimeSelectorAction, page::help_popup::HelpPopupAction,
    utils::help_msg::HelpMsg,
};

#[derive(Clone, Debug)]
pub enum Action {
    Tick,
    Render,
    Quit,
    Suspend,

    Layer(LayerManageAction),
    HelpPopup(HelpPopupAction),

    Comp((CompAction, u64)),
}

#[derive(Clone, Debug)]
pub enum CompAction {
    TimeSelector(TimeSelectorAction),
}

#[derive(Clone, Debug, strum::Display)]
pub enum Layers {
    Help(HelpMsg),
}

#[derive(Clone, Debug)]
pub enum LayerManageAction {
    /// Put a layer on top of the stack, it will receive events from now on
    Push(Layers),
    Pop,
}

impl From<LayerManageAction> for Action {
    fn from(value: LayerManageAction) -> Self {
        Action::Layer(value)
    }
}

#[derive(Clone, Debug)]
pub struct ActionSender(pub tokio::sync::mpsc::UnboundedSender<Action>);

impl ActionSender {
    pub fn send<T: Into<Action>>(&self, action: T) {
        if let Err(e) = self.0.send(action.into()).with_context(|| {
            "Action Receiver is dropped or closed, which should not happen if app is still running."
        }) {
            tracing::error!("{e:?}");
        }
    }
}
impl From<tokio::sync::mpsc::UnboundedSender<Action>> for ActionSender {
    fn from(value: tokio::sync::mpsc::UnboundedSender<Action>) -> Self {
        ActionSender(value)
    }
}

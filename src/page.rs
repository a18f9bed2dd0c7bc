//! Pages and overlays that make up the layer stack.
//!
//! A layer is rendered into the whole frame, receives terminal events while it
//! is on top of the stack and reacts to actions coming back through the action
//! channel.

use crate::actions::Action;
use crate::tui::Event;
use color_eyre::eyre::Result;
use downcast_rs::{DowncastSync, impl_downcast};
use ratatui::Frame;
use ratatui::layout::Rect;

pub(crate) mod help_popup;
pub(crate) mod home;

/// A trait that represents a UI layer/page in the application.
///
/// # Type Requirements
/// - Must implement [`WidgetExt`]
/// - Must implement [`EventLoopParticipant`]
/// - Must implement [`DowncastSync`]
pub(crate) trait Layer: WidgetExt + EventLoopParticipant + DowncastSync {
    /// Initialize the page
    fn init(&mut self) {}
}
impl_downcast!(sync Layer);

/// Extension trait for widgets that can be rendered to the screen.
pub(crate) trait WidgetExt {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Trait for components that participate in the event loop.
///
/// Events are turned into actions in [`EventLoopParticipant::handle_events`],
/// state only changes in [`EventLoopParticipant::update`].
pub(crate) trait EventLoopParticipant {
    fn handle_events(&self, event: Event) -> Result<()>;

    fn update(&mut self, action: Action);

    #[cfg(test)]
    /// Feed one event, then drain and apply every action it caused.
    fn event_loop_once(
        &mut self,
        rx: &mut tokio::sync::mpsc::UnboundedReceiver<Action>,
        event: Event,
    ) {
        self.handle_events(event).unwrap();
        while let Ok(action) = rx.try_recv() {
            self.update(action);
        }
    }
}

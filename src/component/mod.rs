pub(crate) mod time_selector;

use color_eyre::eyre::Result;

use crate::{actions::Action, page::WidgetExt};

/// A widget embedded in a layer.
///
/// Components talk to their owner only through actions tagged with their id.
pub(crate) trait Component: WidgetExt {
    #[allow(dead_code)]
    fn get_id(&self) -> u64;

    fn handle_events(&self, event: &crate::tui::Event) -> Result<()>;

    fn update(&mut self, action: &Action) -> Result<()>;
}

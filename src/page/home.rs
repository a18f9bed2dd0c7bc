use color_eyre::eyre::Result;
use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tracing::error;

use crate::{
    actions::{Action, ActionSender, LayerManageAction, Layers},
    component::{Component, time_selector::TimeSelector},
    config::PickerConfig,
    libs::time_value::SelectedTime,
    tui::Event,
    utils::help_msg::{HelpEntry, HelpMsg},
};

use super::{EventLoopParticipant, Layer, WidgetExt};

/// Host page: the time selector plus the last confirmed selection.
pub(crate) struct Home {
    tx: ActionSender,
    picker: TimeSelector,
    last_selection: Option<SelectedTime>,
}

impl Home {
    pub fn new(tx: ActionSender, picker_config: &PickerConfig) -> Self {
        let mut picker = TimeSelector::new(rand::random::<u64>(), tx.clone());
        picker.mount(
            picker_config.hour.as_deref(),
            picker_config.minute.as_deref(),
        );
        Self {
            tx,
            picker,
            last_selection: None,
        }
    }

    pub fn get_help_msg(&self) -> HelpMsg {
        let mut msg = self.picker.get_help_msg();
        msg.push(HelpEntry::new('?', "Help"));
        msg.push(HelpEntry::new('q', "Quit"));
        msg
    }

    fn status_text(&self) -> String {
        match &self.last_selection {
            Some(selection) => format!("Selected: {selection}"),
            None => "No time selected yet".to_string(),
        }
    }
}

impl EventLoopParticipant for Home {
    fn handle_events(&self, event: Event) -> Result<()> {
        // neither key can ever be valid field input
        if let Event::Key(key) = &event {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.tx.send(Action::Quit);
                    return Ok(());
                }
                KeyCode::Char('?') => {
                    self.tx
                        .send(LayerManageAction::Push(Layers::Help(self.get_help_msg())));
                    return Ok(());
                }
                _ => {}
            }
        }
        self.picker.handle_events(&event)
    }

    fn update(&mut self, action: Action) {
        if let Some(selection) = self.picker.parse_selected_action(&action) {
            self.last_selection = Some(selection);
        }
        if let Err(e) = self.picker.update(&action) {
            error!("Time selector failed to update: {e:?}");
        }
    }
}

impl Layer for Home {}

impl WidgetExt for Home {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [main_area, status_area, help_area] = Layout::vertical([
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .areas(area);

        let block = Block::default()
            .title("Time Picker")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(Color::Cyan));
        let picker_area = block.inner(main_area);
        frame.render_widget(block, main_area);
        self.picker.render(frame, picker_area);

        frame.render_widget(
            Paragraph::new(self.status_text())
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded),
                ),
            status_area,
        );

        self.get_help_msg().render(frame, help_area);
    }
}

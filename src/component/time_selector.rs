use color_eyre::Result;
use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Padding, Paragraph},
};
use tracing::{debug, info, trace};
use tui_input::{Input, InputRequest, backend::crossterm::EventHandler};

use crate::{
    actions::{Action, ActionSender, CompAction},
    libs::time_value::{MAX_FIELD_LEN, SelectedTime, TimeField, TimeValue, pad_two},
    page::WidgetExt,
    tui::Event,
    utils::help_msg::{HelpEntry, HelpMsg},
    utils::key_events::KeyEvent,
};

/// Border, padding and two characters of text.
const FIELD_WIDTH: u16 = 6;
const SELECTOR_WIDTH: u16 = 25;
const SELECTOR_HEIGHT: u16 = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Focus {
    #[default]
    Hour,
    Minute,
    Cancel,
    Ok,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Hour => Focus::Minute,
            Focus::Minute => Focus::Cancel,
            Focus::Cancel => Focus::Ok,
            Focus::Ok => Focus::Hour,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Hour => Focus::Ok,
            Focus::Minute => Focus::Hour,
            Focus::Cancel => Focus::Minute,
            Focus::Ok => Focus::Cancel,
        }
    }

    fn field(self) -> Option<TimeField> {
        match self {
            Focus::Hour => Some(TimeField::Hour),
            Focus::Minute => Some(TimeField::Minute),
            Focus::Cancel | Focus::Ok => None,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) enum TimeSelectorAction {
    /// Moving away from a field normalizes it
    MoveFocus(Focus),
    HandleKey(KeyEvent),
    HandlePaste(String),
    /// The terminal lost focus while a field was being edited
    Blur,
    Cancel,
    Confirm,

    /// the event owner should pay attention to
    Selected(SelectedTime),
}

/// A hour/minute picker with Cancel and OK buttons
///
/// Initial values: [`TimeSelector::mount`]
///
/// Get the confirmed time: parse an action with [`TimeSelector::parse_selected_action`]
#[derive(Clone, Debug)]
pub(crate) struct TimeSelector {
    id: u64,
    tx: ActionSender,

    value: TimeValue,
    hour_input: Input,
    minute_input: Input,
    focus: Focus,
}

impl TimeSelector {
    pub fn new(id: u64, tx: ActionSender) -> Self {
        let value = TimeValue::default();
        Self {
            id,
            tx,
            hour_input: Input::new(value.get(TimeField::Hour).to_string()),
            minute_input: Input::new(value.get(TimeField::Minute).to_string()),
            value,
            focus: Focus::default(),
        }
    }

    /// Apply externally supplied initial values.
    ///
    /// A value is only taken when it is a whole number above zero, within
    /// the field's bound and at most two characters long. Anything else keeps
    /// the default.
    pub fn mount(&mut self, hour: Option<&str>, minute: Option<&str>) {
        for (field, supplied) in [(TimeField::Hour, hour), (TimeField::Minute, minute)] {
            let Some(supplied) = supplied else {
                continue;
            };
            if !field.accepts_initial(supplied) {
                debug!("Ignoring initial {field} value {supplied:?}");
                continue;
            }
            match field {
                TimeField::Hour => self.set_hour(supplied),
                TimeField::Minute => self.set_minute(supplied),
            }
        }
    }

    pub fn hour(&self) -> &str {
        self.value.get(TimeField::Hour)
    }

    /// Pads to two characters, no range check.
    pub fn set_hour<T: AsRef<str>>(&mut self, hour: T) {
        self.set_field(TimeField::Hour, hour.as_ref());
    }

    pub fn minute(&self) -> &str {
        self.value.get(TimeField::Minute)
    }

    /// Pads to two characters, no range check.
    pub fn set_minute<T: AsRef<str>>(&mut self, minute: T) {
        self.set_field(TimeField::Minute, minute.as_ref());
    }

    pub fn parse_selected_action(&self, action: &Action) -> Option<SelectedTime> {
        match self.unwrap_action(action)? {
            TimeSelectorAction::Selected(selection) => Some(selection),
            _ => None,
        }
    }

    pub fn get_help_msg(&self) -> HelpMsg {
        let mut msg: HelpMsg = vec![
            HelpEntry::new(KeyCode::Tab, "Next"),
            HelpEntry::new(KeyCode::BackTab, "Previous"),
        ]
        .into();
        match self.focus {
            Focus::Hour | Focus::Minute => {
                msg.push(HelpEntry::new_plain("0-9", "Type"));
                msg.push(HelpEntry::new(KeyCode::Enter, "Done"));
            }
            Focus::Cancel => msg.push(HelpEntry::new(KeyCode::Enter, "Reset to 00:00")),
            Focus::Ok => msg.push(HelpEntry::new(KeyCode::Enter, "Confirm")),
        }
        msg
    }

    fn get_action(&self, action: TimeSelectorAction) -> Action {
        Action::Comp((CompAction::TimeSelector(action), self.id))
    }

    fn unwrap_action(&self, action: &Action) -> Option<TimeSelectorAction> {
        let Action::Comp((CompAction::TimeSelector(action), id)) = action else {
            return None;
        };
        (*id == self.id).then(|| action.clone())
    }

    fn input(&self, field: TimeField) -> &Input {
        match field {
            TimeField::Hour => &self.hour_input,
            TimeField::Minute => &self.minute_input,
        }
    }

    fn input_mut(&mut self, field: TimeField) -> &mut Input {
        match field {
            TimeField::Hour => &mut self.hour_input,
            TimeField::Minute => &mut self.minute_input,
        }
    }

    /// Write `value` to both the state and the displayed field.
    fn sync_field(&mut self, field: TimeField, value: String) {
        *self.input_mut(field) = Input::new(value.clone());
        self.value.set(field, value);
    }

    fn set_field(&mut self, field: TimeField, value: &str) {
        self.sync_field(field, pad_two(value));
    }

    /// Keep the typed text if it can still become a valid value, otherwise
    /// put back the last one that was.
    fn validate_input(&mut self, field: TimeField) {
        let raw = self.input(field).value().to_string();
        if field.accepts_keystroke(&raw) {
            self.value.set(field, raw);
        } else {
            trace!("Rejected {field} input {raw:?}");
            let last = self.value.get(field).to_string();
            *self.input_mut(field) = Input::new(last);
        }
    }

    fn format_input(&mut self, field: TimeField) {
        let normalized = field.normalize(self.value.get(field));
        self.sync_field(field, normalized);
    }

    fn cancel(&mut self) {
        self.value.reset();
        self.hour_input = Input::new(self.hour().to_string());
        self.minute_input = Input::new(self.minute().to_string());
        self.focus = Focus::Hour;
    }

    fn render_field(&self, frame: &mut Frame, field: TimeField, area: Rect) {
        let focused = self.focus.field() == Some(field);
        let style = if focused {
            Color::Yellow.into()
        } else {
            Style::default()
        };

        let input = self.input(field);
        let widget = Paragraph::new(input.value()).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .padding(Padding::horizontal(1)),
        );
        frame.render_widget(widget, area);

        if focused && area.width >= FIELD_WIDTH && area.height >= 3 {
            let x = input.visual_cursor().min(MAX_FIELD_LEN) as u16;
            frame.set_cursor_position((area.x + 2 + x, area.y + 1));
        }
    }

    fn button_style(&self, button: Focus, bg: Color) -> Style {
        let style = Style::default().fg(Color::White).bg(bg);
        if self.focus == button {
            style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            style
        }
    }
}

impl super::Component for TimeSelector {
    fn get_id(&self) -> u64 {
        self.id
    }

    fn handle_events(&self, event: &Event) -> Result<()> {
        match event {
            Event::Key(key) => match (self.focus.field(), key.code) {
                (_, KeyCode::Tab) => self
                    .tx
                    .send(self.get_action(TimeSelectorAction::MoveFocus(self.focus.next()))),
                (_, KeyCode::BackTab) => self
                    .tx
                    .send(self.get_action(TimeSelectorAction::MoveFocus(self.focus.prev()))),
                (Some(_), KeyCode::Enter) => self
                    .tx
                    .send(self.get_action(TimeSelectorAction::MoveFocus(self.focus.next()))),
                (Some(_), _) => self
                    .tx
                    .send(self.get_action(TimeSelectorAction::HandleKey((*key).into()))),
                (None, KeyCode::Enter) => {
                    if self.focus == Focus::Ok {
                        self.tx.send(self.get_action(TimeSelectorAction::Confirm))
                    } else {
                        self.tx.send(self.get_action(TimeSelectorAction::Cancel))
                    }
                }
                (None, KeyCode::Left) => self
                    .tx
                    .send(self.get_action(TimeSelectorAction::MoveFocus(Focus::Cancel))),
                (None, KeyCode::Right) => self
                    .tx
                    .send(self.get_action(TimeSelectorAction::MoveFocus(Focus::Ok))),
                (None, _) => (),
            },
            Event::Paste(s) if self.focus.field().is_some() => self
                .tx
                .send(self.get_action(TimeSelectorAction::HandlePaste(s.clone()))),
            Event::FocusLost => self.tx.send(self.get_action(TimeSelectorAction::Blur)),
            _ => (),
        };
        Ok(())
    }

    fn update(&mut self, action: &Action) -> Result<()> {
        let Some(action) = self.unwrap_action(action) else {
            return Ok(());
        };

        match action {
            TimeSelectorAction::MoveFocus(target) => {
                if let Some(field) = self.focus.field() {
                    if target != self.focus {
                        self.format_input(field);
                    }
                }
                self.focus = target;
            }
            TimeSelectorAction::HandleKey(key_event) => {
                if let Some(field) = self.focus.field() {
                    let changed = self
                        .input_mut(field)
                        .handle_event(&crossterm::event::Event::Key(key_event.into()));
                    if changed.is_some_and(|c| c.value) {
                        self.validate_input(field);
                    }
                }
            }
            TimeSelectorAction::HandlePaste(string) => {
                if let Some(field) = self.focus.field() {
                    let input = self.input_mut(field);
                    string.chars().for_each(|c| {
                        input.handle(InputRequest::InsertChar(c));
                    });
                    self.validate_input(field);
                }
            }
            TimeSelectorAction::Blur => {
                if let Some(field) = self.focus.field() {
                    self.format_input(field);
                }
            }
            TimeSelectorAction::Cancel => {
                debug!("Time selection cancelled");
                self.cancel();
            }
            TimeSelectorAction::Confirm => {
                let selection = self.value.selection();
                info!("Time selected: {selection}");
                self.tx
                    .send(self.get_action(TimeSelectorAction::Selected(selection)));
            }
            TimeSelectorAction::Selected(_) => (),
        }
        Ok(())
    }
}

impl WidgetExt for TimeSelector {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [area] = Layout::vertical([Constraint::Length(SELECTOR_HEIGHT)])
            .flex(Flex::Center)
            .areas(area);
        let [area] = Layout::horizontal([Constraint::Length(SELECTOR_WIDTH)])
            .flex(Flex::Center)
            .areas(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title("Select time");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [fields_area, labels_area, _, footer_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let columns = Layout::horizontal([
            Constraint::Length(FIELD_WIDTH),
            Constraint::Length(3),
            Constraint::Length(FIELD_WIDTH),
        ])
        .flex(Flex::Center);
        let [hour_area, colon_area, minute_area] = columns.areas(fields_area);
        let [hour_label, _, minute_label] = columns.areas(labels_area);

        self.render_field(frame, TimeField::Hour, hour_area);
        self.render_field(frame, TimeField::Minute, minute_area);

        let [_, colon_area, _] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(colon_area);
        frame.render_widget(Paragraph::new(":").centered(), colon_area);

        frame.render_widget(
            Paragraph::new(TimeField::Hour.to_string()).centered(),
            hour_label,
        );
        frame.render_widget(
            Paragraph::new(TimeField::Minute.to_string()).centered(),
            minute_label,
        );

        let [cancel_area, _, ok_area] = Layout::horizontal([
            Constraint::Length(8),
            Constraint::Length(1),
            Constraint::Length(4),
        ])
        .flex(Flex::End)
        .areas(footer_area);
        frame.render_widget(
            Paragraph::new("Cancel")
                .centered()
                .style(self.button_style(Focus::Cancel, Color::Red)),
            cancel_area,
        );
        frame.render_widget(
            Paragraph::new("OK")
                .centered()
                .style(self.button_style(Focus::Ok, Color::Blue)),
            ok_area,
        );
    }
}

#[cfg(test)]
impl TimeSelector {
    pub fn get_focus(&self) -> Focus {
        self.focus
    }
    pub fn get_displayed(&self, field: TimeField) -> &str {
        self.input(field).value()
    }
}

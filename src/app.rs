pub(crate) mod layer_manager;

use crate::config::Config;
use crate::{
    actions::{Action, CompAction},
    component::time_selector::TimeSelectorAction,
    libs::time_value::SelectedTime,
    tui::{self, TuiEnum},
};
use color_eyre::eyre::{Context, Result};
use crossterm::event::{KeyCode, KeyModifiers};
use layer_manager::LayerManager;
use tracing::info;

pub struct RootState {
    pub should_quit: bool,
    pub action_tx: tokio::sync::mpsc::UnboundedSender<Action>,
    pub action_rx: tokio::sync::mpsc::UnboundedReceiver<Action>,
    /// The most recent confirmed selection, from any time selector
    pub last_selection: Option<SelectedTime>,

    pub config: Config,
}

impl RootState {
    pub fn new(config: Config) -> Self {
        let (action_tx, action_rx) = tokio::sync::mpsc::unbounded_channel();
        Self {
            should_quit: false,
            action_tx,
            action_rx,
            last_selection: None,
            config,
        }
    }
}

pub struct App {
    layers: LayerManager,
    pub state: RootState,
    pub tui: TuiEnum,
}

impl App {
    pub fn new(state: RootState, tui: TuiEnum) -> Self {
        Self {
            layers: LayerManager::new(&state),
            state,
            tui,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.tui.enter()?;

        loop {
            let e = self.tui.next().await?;
            self.handle_event(e)?;

            while let Ok(action) = self.state.action_rx.try_recv() {
                self.perform_action(action)?;
            }

            // application exit
            if self.state.should_quit {
                break;
            }
        }

        self.tui.exit()?;
        Ok(())
    }

    /// Convert a [`tui::Event`] to actions
    ///
    /// Application-wide events (timers, quitting, suspending) become actions
    /// here, the rest is delegated to the top layer.
    fn handle_event(&self, event: tui::Event) -> Result<()> {
        let action = match event {
            tui::Event::Tick => Action::Tick,
            tui::Event::Render | tui::Event::Resize(_, _) => Action::Render,
            tui::Event::Error => Action::Quit,
            tui::Event::Key(key) if key.modifiers.contains(KeyModifiers::CONTROL) => {
                match key.code {
                    KeyCode::Char('c') => Action::Quit,
                    KeyCode::Char('z') => Action::Suspend,
                    _ => return Ok(()),
                }
            }
            other => return self.layers.handle_event(other),
        };
        self.state
            .action_tx
            .send(action)
            .context("Action channel closed")?;
        Ok(())
    }

    /// Perform an action
    ///
    /// This SHOULD be the only place where the state of the application is changed.
    fn perform_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.state.should_quit = true;
            }
            Action::Tick => {}
            Action::Render => {
                self.tui.draw(|f| self.layers.render(f))?;
            }
            Action::Suspend => {
                self.tui.suspend()?;
                self.tui.resume()?;
            }
            Action::Layer(layer_action) => {
                self.layers.handle_layer_action(&layer_action, &self.state);
            }
            _ => {
                self.observe_selection(&action);
                self.layers.handle_action(action);
            }
        }
        Ok(())
    }

    /// Confirmed selections travel past their owning page up to the root.
    fn observe_selection(&mut self, action: &Action) {
        let Action::Comp((CompAction::TimeSelector(TimeSelectorAction::Selected(selection)), _)) =
            action
        else {
            return;
        };
        info!("Selection confirmed: {selection}");
        self.state.last_selection = Some(selection.clone());
        if self.state.config.picker.exit_on_confirm {
            self.state.should_quit = true;
        }
    }
}

#[cfg(test)]
mod test {
    use crossterm::event::KeyEvent;

    use super::*;
    use crate::{
        config::{AppConfig, PickerConfig},
        page::home::Home,
        tui::{Event, TestTui},
    };

    fn get_app(picker: PickerConfig) -> App {
        let config = Config {
            config: AppConfig::default(),
            picker,
        };
        App::new(RootState::new(config), TestTui::new().into())
    }

    impl App {
        fn event_loop_once(&mut self, event: Event) {
            self.handle_event(event).unwrap();
            while let Ok(action) = self.state.action_rx.try_recv() {
                self.perform_action(action).unwrap();
            }
        }

        fn feed<I: IntoIterator<Item = Event>>(&mut self, events: I) {
            events.into_iter().for_each(|e| self.event_loop_once(e));
        }

        fn screen(&self) -> String {
            self.tui
                .backend()
                .buffer()
                .content()
                .iter()
                .map(|c| c.symbol())
                .collect()
        }
    }

    fn confirm_keys() -> Vec<Event> {
        vec![
            Event::from(KeyCode::Tab),
            Event::from(KeyCode::Tab),
            Event::from(KeyCode::Tab),
            Event::from(KeyCode::Enter),
        ]
    }

    #[test]
    fn test_type_and_confirm() {
        let mut app = get_app(PickerConfig::default());
        app.feed([
            Event::from(KeyCode::Backspace),
            Event::from(KeyCode::Backspace),
            Event::from('9'),
            Event::from(KeyCode::Tab),
            Event::from(KeyCode::Backspace),
            Event::from(KeyCode::Backspace),
            Event::from('5'),
        ]);
        app.feed(confirm_keys().into_iter().skip(1));

        let selection = app.state.last_selection.clone().unwrap();
        assert_eq!(selection.hour, "09");
        assert_eq!(selection.minute, "05");
        assert_eq!(selection.total_minutes, 545);
        assert!(!app.state.should_quit);

        app.event_loop_once(Event::Render);
        assert!(app.screen().contains("Selected: 09:05 (545 minutes)"));
    }

    #[test]
    fn test_exit_on_confirm() {
        let mut app = get_app(PickerConfig {
            hour: Some("13".into()),
            minute: Some("37".into()),
            exit_on_confirm: true,
            ..Default::default()
        });
        app.feed(confirm_keys());
        assert!(app.state.should_quit);
        assert_eq!(app.state.last_selection.unwrap().total_minutes, 817);
    }

    #[test]
    fn test_cancel_emits_nothing() {
        let mut app = get_app(PickerConfig {
            hour: Some("13".into()),
            ..Default::default()
        });
        app.feed([
            Event::from(KeyCode::Tab),
            Event::from(KeyCode::Tab),
            Event::from(KeyCode::Enter),
        ]);
        assert!(app.state.last_selection.is_none());

        let home = app.layers.last().unwrap().downcast_ref::<Home>().unwrap();
        assert!(home.get_help_msg().to_string().contains("Type: 0-9"));
    }

    #[test]
    fn test_help_layer() {
        let mut app = get_app(PickerConfig::default());
        app.event_loop_once(Event::from('?'));
        assert_eq!(app.layers.len(), 2);
        assert!(app.layers.last().unwrap().downcast_ref::<Home>().is_none());

        app.event_loop_once(Event::Render);
        let screen = app.screen();
        assert!(screen.contains("Close help: esc"));
        assert!(screen.contains("Quit: q"));

        // keys reach the popup, not the picker
        app.event_loop_once(Event::from('q'));
        assert!(!app.state.should_quit);

        app.event_loop_once(Event::from(KeyCode::Esc));
        assert_eq!(app.layers.len(), 1);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = get_app(PickerConfig::default());
        app.event_loop_once(Event::from('q'));
        assert!(app.state.should_quit);

        let mut app = get_app(PickerConfig::default());
        app.event_loop_once(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.state.should_quit);
    }
}

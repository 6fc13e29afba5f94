use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{
    Component, ResultPanel, ResultPanelProps, SearchField, SearchFieldProps, ACCENT_TEAL, BG_BASE,
};
use crate::action::Action;
use crate::sprite_backend::SharedSprites;
use crate::state::AppState;

pub const TITLE: &str = "POKESEARCH";

/// Props for SearchScreen - read-only view of state
pub struct SearchScreenProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole screen: result panel, input field and key hints
pub struct SearchScreen {
    results: ResultPanel,
    field: SearchField,
    status_bar: StatusBar,
}

impl Default for SearchScreen {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SearchScreen {
    /// `sprites` is the registry the terminal backend draws from; without
    /// one the sprite panel falls back to text.
    pub fn new(sprites: Option<SharedSprites>) -> Self {
        Self {
            results: ResultPanel::new(sprites),
            field: SearchField::new(),
            status_bar: StatusBar::new(),
        }
    }
}

fn field_props<'a>(state: &'a AppState, is_focused: bool) -> SearchFieldProps<'a> {
    SearchFieldProps {
        value: state.input.as_str(),
        error: state.fetch.error(),
        flagged: state.input_flagged,
        is_focused,
    }
}

impl Component<Action> for SearchScreen {
    type Props<'a> = SearchScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                vec![Action::Quit]
            }
            KeyCode::Esc => vec![Action::SearchClear],
            KeyCode::Enter => vec![Action::SearchSubmit(props.state.input.as_str().to_string())],
            _ => self
                .field
                .handle_event(event, field_props(props.state, true))
                .into_iter()
                .collect(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);

        let [title_area, results_area, field_area, hints_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .areas(area);

        frame.render_widget(
            Paragraph::new(TITLE).alignment(Alignment::Center).style(
                Style::default()
                    .fg(ACCENT_TEAL)
                    .add_modifier(Modifier::BOLD),
            ),
            title_area,
        );

        self.results.render(
            frame,
            results_area,
            ResultPanelProps { state: props.state },
        );
        self.field.render(
            frame,
            field_area,
            field_props(props.state, props.is_focused),
        );

        <StatusBar as Component<Action>>::render(
            &mut self.status_bar,
            frame,
            hints_area,
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("Enter", "search"),
                    StatusBarHint::new("Esc", "clear"),
                    StatusBarHint::new("Ctrl+C", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use tui_dispatch::assert_emitted;
    use tui_dispatch::testing::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> EventKind {
        EventKind::Key(KeyEvent::new(code, modifiers))
    }

    fn handle(screen: &mut SearchScreen, state: &AppState, event: EventKind) -> Vec<Action> {
        screen
            .handle_event(
                &event,
                SearchScreenProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    #[test]
    fn test_enter_submits_current_input() {
        let mut screen = SearchScreen::default();
        let mut state = AppState::default();
        state.input.set_text("Pikachu");

        let actions = handle(&mut screen, &state, press(KeyCode::Enter, KeyModifiers::NONE));

        actions.assert_count(1);
        actions.assert_first(Action::SearchSubmit("Pikachu".into()));
    }

    #[test]
    fn test_esc_clears() {
        let mut screen = SearchScreen::default();
        let state = AppState::default();

        let actions = handle(&mut screen, &state, press(KeyCode::Esc, KeyModifiers::NONE));

        actions.assert_first(Action::SearchClear);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut screen = SearchScreen::default();
        let state = AppState::default();

        let actions = handle(
            &mut screen,
            &state,
            press(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );

        actions.assert_first(Action::Quit);
    }

    #[test]
    fn test_typing_edits_input() {
        let mut screen = SearchScreen::default();
        let mut state = AppState::default();
        state.input.set_text("pik");

        let actions = handle(&mut screen, &state, press(KeyCode::Char('a'), KeyModifiers::NONE));

        assert_emitted!(actions, Action::InputChange(_));
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut screen = SearchScreen::default();
        let state = AppState::default();

        let actions: Vec<_> = screen
            .handle_event(
                &press(KeyCode::Enter, KeyModifiers::NONE),
                SearchScreenProps {
                    state: &state,
                    is_focused: false,
                },
            )
            .into_iter()
            .collect();

        actions.assert_empty();
    }

    #[test]
    fn test_render_idle_screen() {
        let mut render = RenderHarness::new(60, 24);
        let mut screen = SearchScreen::default();
        let state = AppState::default();

        let output = render.render_to_string_plain(|frame| {
            screen.render(
                frame,
                frame.area(),
                SearchScreenProps {
                    state: &state,
                    is_focused: true,
                },
            );
        });

        assert!(output.contains(TITLE));
        assert!(output.contains("No Pokemon"));
        assert!(output.contains("ENTER NAME OR NUMBER"));
        assert!(output.contains("search"));
    }
}

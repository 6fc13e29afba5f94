use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Borders, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::{Component, ACCENT_TEAL, BG_PANEL, ERROR_RED, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::error::SearchError;

pub const INPUT_LABEL: &str = "ENTER NAME OR NUMBER";
pub const INPUT_PLACEHOLDER: &str = "Pokemon name/id";

/// Labelled text input bound to the search input
pub struct SearchField {
    input: TextInput,
}

pub struct SearchFieldProps<'a> {
    pub value: &'a str,
    /// Current failure; its headline is the placeholder while the field is flagged
    pub error: Option<&'a SearchError>,
    pub flagged: bool,
    pub is_focused: bool,
}

impl Default for SearchField {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

impl SearchField {
    pub fn new() -> Self {
        Self::default()
    }
}

fn input_style(flagged: bool) -> TextInputStyle {
    let (border, focused, placeholder_style) = if flagged {
        let red = Style::default().fg(ERROR_RED);
        (red, red, Some(red))
    } else {
        (
            Style::default().fg(TEXT_DIM),
            Style::default().fg(ACCENT_TEAL),
            None,
        )
    };
    TextInputStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: border,
                focused_style: Some(focused),
            }),
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
        placeholder_style,
        cursor_style: None,
    }
}

fn placeholder(props: &SearchFieldProps<'_>) -> String {
    match props.error {
        Some(error) if props.flagged => error.headline().to_string(),
        _ => INPUT_PLACEHOLDER.to_string(),
    }
}

impl Component<Action> for SearchField {
    type Props<'a> = SearchFieldProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }
        let placeholder = placeholder(&props);
        let input_props = TextInputProps {
            value: props.value,
            placeholder: &placeholder,
            is_focused: true,
            style: input_style(props.flagged),
            on_change: Action::InputChange,
            on_submit: Action::SearchSubmit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let [label_area, input_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(3)]).areas(area);

        frame.render_widget(
            Paragraph::new(INPUT_LABEL)
                .alignment(Alignment::Center)
                .style(Style::default().fg(TEXT_MAIN).add_modifier(Modifier::BOLD)),
            label_area,
        );

        let placeholder = placeholder(&props);
        let input_props = TextInputProps {
            value: props.value,
            placeholder: &placeholder,
            is_focused: props.is_focused,
            style: input_style(props.flagged),
            on_change: Action::InputChange,
            on_submit: Action::SearchSubmit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, input_area, input_props);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    fn render(props: SearchFieldProps<'_>) -> String {
        let mut render = RenderHarness::new(40, 4);
        let mut field = SearchField::new();
        render.render_to_string_plain(|frame| {
            field.render(frame, frame.area(), props);
        })
    }

    #[test]
    fn test_flagged_field_shows_short_error() {
        let error = SearchError::Transport(
            "error sending request for url (https://pokeapi.co/api/v2/pokemon/pikachu)".into(),
        );
        let output = render(SearchFieldProps {
            value: "",
            error: Some(&error),
            flagged: true,
            is_focused: false,
        });

        assert!(output.contains("Request failed"), "output:\n{output}");
        assert!(!output.contains("error sending"), "output:\n{output}");
    }

    #[test]
    fn test_unflagged_field_shows_hint() {
        let error = SearchError::Validation;
        let output = render(SearchFieldProps {
            value: "",
            error: Some(&error),
            flagged: false,
            is_focused: false,
        });

        assert!(output.contains(INPUT_PLACEHOLDER), "output:\n{output}");
        assert!(output.contains(INPUT_LABEL));
    }
}

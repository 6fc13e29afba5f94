use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{Component, ACCENT_GOLD, ACCENT_TEAL, BG_PANEL, ERROR_RED, TEXT_DIM, TEXT_MAIN};
use crate::action::Action;
use crate::sprite::{kitty_sequence, sprite_fit, SPRITE_IMAGE_ID};
use crate::sprite_backend::SharedSprites;
use crate::state::{AppState, FetchState};

pub const IDLE_PLACEHOLDER: &str = "No Pokemon";
const RECORD_LINES: u16 = 5;

/// Map the fetch state to the lines shown under the sprite.
///
/// Exactly one branch per state; nothing else in the panel depends on the
/// fetch state.
pub fn result_lines(fetch: &FetchState, spinner: &str) -> Vec<Line<'static>> {
    match fetch {
        FetchState::Idle => vec![Line::styled(
            IDLE_PLACEHOLDER,
            Style::default()
                .fg(TEXT_DIM)
                .add_modifier(Modifier::ITALIC),
        )],
        FetchState::Loading => vec![Line::styled(
            format!("{spinner} Loading..."),
            Style::default().fg(ACCENT_GOLD),
        )],
        FetchState::Failure(error) => vec![Line::styled(
            error.message(),
            Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD),
        )],
        FetchState::Success(record) => vec![
            Line::styled(
                record.display_name(),
                Style::default()
                    .fg(ACCENT_TEAL)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::from(record.display_id()),
            Line::from(record.type_line()),
            Line::from(record.height_line()),
            Line::from(record.weight_line()),
        ],
    }
}

/// Display region: sprite on top, record lines below
pub struct ResultPanel {
    sprites: Option<SharedSprites>,
}

pub struct ResultPanelProps<'a> {
    pub state: &'a AppState,
}

impl ResultPanel {
    pub fn new(sprites: Option<SharedSprites>) -> Self {
        Self { sprites }
    }

    fn clear_sprite(&self) {
        if let Some(Ok(mut registry)) = self.sprites.as_ref().map(|s| s.lock()) {
            registry.clear();
        }
    }

    /// Hand the sprite to the backend; false when it has to be drawn as text
    fn place_sprite(&self, area: Rect, state: &AppState) -> bool {
        let (Some(sprites), Some(sprite)) = (self.sprites.as_ref(), state.sprite.as_ref()) else {
            return false;
        };
        if area.width == 0 || area.height == 0 {
            return false;
        }
        let (cols, rows) = sprite_fit(sprite, area.width, area.height);
        let sequence = kitty_sequence(sprite, cols, rows, SPRITE_IMAGE_ID);
        let x = area.x.saturating_add(area.width.saturating_sub(cols) / 2);
        let y = area.y.saturating_add(area.height.saturating_sub(rows) / 2);
        match sprites.lock() {
            Ok(mut registry) => {
                registry.set(x, y, sequence);
                true
            }
            Err(_) => false,
        }
    }

    fn render_sprite(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        if self.place_sprite(area, state) {
            return;
        }
        self.clear_sprite();

        let record = state.fetch.record();
        let content = match record.and_then(|r| r.sprite_url.as_deref()) {
            None => "[no sprite]".to_string(),
            Some(url) if !state.config.show_sprites => url.to_string(),
            Some(_) if state.sprite_loading => "[loading sprite]".to_string(),
            Some(_) if state.sprite.is_some() => "[sprite]".to_string(),
            Some(_) => "[no sprite]".to_string(),
        };
        let [_, line] = Layout::vertical([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);
        frame.render_widget(
            Paragraph::new(content)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: false })
                .style(Style::default().fg(TEXT_DIM)),
            line,
        );
    }
}

impl Component<Action> for ResultPanel {
    type Props<'a> = ResultPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let block = Block::default()
            .borders(Borders::ALL)
            .title("POKEDEX")
            .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = result_lines(&state.fetch, state.spinner_frame());

        if state.fetch.is_success() {
            let [sprite_area, text_area] =
                Layout::vertical([Constraint::Min(1), Constraint::Length(RECORD_LINES)])
                    .areas(inner);
            self.render_sprite(frame, sprite_area, state);
            frame.render_widget(
                Paragraph::new(Text::from(lines)).alignment(Alignment::Center),
                text_area,
            );
            return;
        }

        self.clear_sprite();
        let paragraph = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        // rows after wrapping, so long errors stay whole
        let rows = u16::try_from(paragraph.line_count(inner.width))
            .unwrap_or(u16::MAX)
            .min(inner.height);
        let [_, text_area, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(rows),
            Constraint::Fill(1),
        ])
        .areas(inner);
        frame.render_widget(paragraph, text_area);
    }
}

//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::api;
use crate::effect::Effect;
use crate::error::SearchError;
use crate::state::{AppState, FetchState, Record};

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            let Some(query) = state.config.initial_query.clone() else {
                return DispatchResult::unchanged();
            };
            state.input.set_text(query.clone());
            search(state, &query)
        }

        // ===== Input =====
        Action::InputChange(text) => {
            state.input.set_text(text);
            state.input_flagged = false;
            DispatchResult::changed()
        }

        // ===== Search =====
        Action::SearchSubmit(raw) => search(state, &raw),

        Action::SearchClear => {
            state.next_request();
            state.input.clear();
            state.fetch = FetchState::Idle;
            state.input_flagged = false;
            state.sprite = None;
            state.sprite_loading = false;
            DispatchResult::changed()
        }

        // ===== Results =====
        Action::PokemonDidLoad { request, record } => {
            if !accepts(state, request) {
                return DispatchResult::unchanged();
            }
            commit_record(state, record)
        }

        Action::PokemonDidError { request, error } => {
            if !accepts(state, request) {
                return DispatchResult::unchanged();
            }
            fail(state, error);
            DispatchResult::changed()
        }

        Action::SpriteDidLoad { id, sprite } => {
            if !shows_record(state, id) {
                return DispatchResult::unchanged();
            }
            state.sprite = Some(sprite);
            state.sprite_loading = false;
            DispatchResult::changed()
        }

        Action::SpriteDidError { id, error: _ } => {
            if !shows_record(state, id) {
                return DispatchResult::unchanged();
            }
            state.sprite_loading = false;
            DispatchResult::changed()
        }

        // ===== UI =====
        Action::Render => DispatchResult::changed(),

        Action::Tick => {
            if state.fetch.is_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn search(state: &mut AppState, raw: &str) -> DispatchResult<Effect> {
    // supersedes whatever is in flight, even when nothing is sent
    let request = state.next_request();
    state.sprite = None;
    state.sprite_loading = false;

    if raw.trim().is_empty() {
        fail(state, SearchError::Validation);
        return DispatchResult::changed();
    }

    state.fetch = FetchState::Loading;
    state.tick_count = 0;
    let url = api::pokemon_url(&state.config.api_base, raw);
    DispatchResult::changed_with(Effect::FetchPokemon { request, url })
}

fn commit_record(state: &mut AppState, record: Record) -> DispatchResult<Effect> {
    let sprite_url = record.sprite_url.clone().filter(|_| state.config.show_sprites);
    let id = record.id;
    state.fetch = FetchState::Success(record);
    state.input_flagged = false;
    state.sprite = None;

    match sprite_url {
        Some(url) => {
            state.sprite_loading = true;
            DispatchResult::changed_with(Effect::LoadSprite { id, url })
        }
        None => {
            state.sprite_loading = false;
            DispatchResult::changed()
        }
    }
}

fn fail(state: &mut AppState, error: SearchError) {
    state.fetch = FetchState::Failure(error);
    state.input_flagged = true;
    state.sprite = None;
    state.sprite_loading = false;
}

fn accepts(state: &AppState, request: u64) -> bool {
    let accepted = state
        .config
        .ordering
        .accepts(request, state.latest_request);
    if !accepted {
        log::debug!(
            "discarding stale response {request} (latest is {})",
            state.latest_request
        );
    }
    accepted
}

fn shows_record(state: &AppState, id: u32) -> bool {
    state.fetch.record().is_some_and(|record| record.id == id)
}

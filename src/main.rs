//! Pokesearch - look up one Pokemon by name or number

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{layout::Rect, Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use pokesearch::action::Action;
use pokesearch::api;
use pokesearch::components::{Component, SearchScreen, SearchScreenProps};
use pokesearch::config::{ResponseOrdering, SearchConfig, DEFAULT_API_BASE};
use pokesearch::effect::Effect;
use pokesearch::logging;
use pokesearch::reducer::reducer;
use pokesearch::sprite;
use pokesearch::sprite_backend::{shared_sprites, SharedSprites, SpriteBackend};
use pokesearch::state::{AppState, LOADING_TICK_MS};

/// Pokemon search TUI backed by PokeAPI
#[derive(Parser, Debug)]
#[command(name = "pokesearch")]
#[command(about = "Look up a Pokemon by name or National Dex number")]
struct Args {
    /// Search to run on startup
    #[arg(long, short)]
    query: Option<String>,

    /// Catalog base URL
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Which completion wins when searches overlap
    #[arg(long, value_enum, default_value_t = ResponseOrdering::LatestIssued)]
    ordering: ResponseOrdering,

    /// Show the sprite URL instead of drawing the image
    #[arg(long)]
    no_sprites: bool,

    /// Append log output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum SearchComponentId {
    Screen,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum SearchContext {
    Main,
}

impl EventRoutingState<SearchComponentId, SearchContext> for AppState {
    fn focused(&self) -> Option<SearchComponentId> {
        Some(SearchComponentId::Screen)
    }

    fn modal(&self) -> Option<SearchComponentId> {
        None
    }

    fn binding_context(&self, _id: SearchComponentId) -> SearchContext {
        SearchContext::Main
    }

    fn default_context(&self) -> SearchContext {
        SearchContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        query,
        api_base,
        ordering,
        no_sprites,
        log_file,
        debug: debug_args,
    } = Args::parse();

    logging::init(log_file.as_deref())?;

    let config = SearchConfig {
        api_base,
        initial_query: query,
        ordering,
        show_sprites: !no_sprites,
    };
    log::info!(
        "api_base={} ordering={:?} sprites={}",
        config.api_base,
        config.ordering,
        config.show_sprites
    );

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(move || async move {
            Ok::<AppState, io::Error>(AppState::new(config))
        })
        .await
        .map_err(debug_error)?;
    let show_sprites = state.config.show_sprites;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let sprites = shared_sprites();
    let backend = SpriteBackend::new(stdout, sprites.clone());
    let mut terminal = Terminal::new(backend)?;

    // Inline graphics only make sense on a live terminal
    let screen_sprites = (show_sprites && use_alt_screen).then_some(sprites);

    let result = run_app(
        &mut terminal,
        &debug,
        store,
        screen_sprites,
        replay_actions,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    log::info!("=== pokesearch session ended ===");
    Ok(())
}

struct SearchUi {
    screen: SearchScreen,
}

impl SearchUi {
    fn new(sprites: Option<SharedSprites>) -> Self {
        Self {
            screen: SearchScreen::new(sprites),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<SearchComponentId>,
    ) {
        event_ctx.set_component_area(SearchComponentId::Screen, area);

        let props = SearchScreenProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.screen.render(frame, area, props);
    }

    fn handle_event(&mut self, event: &EventKind, state: &AppState) -> HandlerResponse<Action> {
        let props = SearchScreenProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .screen
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    sprites: Option<SharedSprites>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(SearchUi::new(sprites)));
    let mut bus: EventBus<AppState, Action, SearchComponentId, SearchContext> = EventBus::new();
    let keybindings: Keybindings<SearchContext> = Keybindings::new();

    let ui_screen = Rc::clone(&ui);
    bus.register(SearchComponentId::Screen, move |event, state| {
        ui_screen.borrow_mut().handle_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime.subscriptions().interval(
                    "tick",
                    Duration::from_millis(LOADING_TICK_MS),
                    || Action::Tick,
                );
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::FetchPokemon { request, url } => {
            let key = format!("pokemon_{request}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match api::fetch_pokemon(&url).await {
                    Ok(record) => Action::PokemonDidLoad { request, record },
                    Err(error) => {
                        log::info!("request {request} failed: {error}");
                        Action::PokemonDidError { request, error }
                    }
                }
            });
        }
        Effect::LoadSprite { id, url } => {
            let key = format!("sprite_{id}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                let loaded = match api::fetch_bytes(&url).await {
                    Ok(bytes) => sprite::decode_sprite(&bytes),
                    Err(error) => Err(error),
                };
                match loaded {
                    Ok(sprite) => Action::SpriteDidLoad { id, sprite },
                    Err(error) => {
                        log::warn!("sprite {id} from {url}: {error}");
                        Action::SpriteDidError { id, error }
                    }
                }
            });
        }
    }
}

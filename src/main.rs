//! Terminal runner (default binary).
//!
//! It uses crossterm for keyboard and mouse input and a custom
//! framebuffer-based renderer (no widget/layout library).

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseEvent};

use falling_blocks::core::rng::clock_seed;
use falling_blocks::core::{GameSession, GameSnapshot, SessionConfig, ShapeSet};
use falling_blocks::input::{
    handle_key_event, is_click_in, settings_key, should_quit, CellRect, GestureTracker,
    PointerEvent, PointerMapper, SettingsKey,
};
use falling_blocks::store::{
    load_bool_preference, load_shape_set, save_bool_preference, JsonFileStore, MemoryStore,
    Persistence,
};
use falling_blocks::term::{
    BellAudio, FrameBuffer, GameView, Layout, Rect, TerminalRenderer, Theme, Viewport,
};
use falling_blocks::types::{DYNAMIC_SPEED_KEY, SFX_MUTED_KEY, THEME_KEY, TICK_MS};
use falling_blocks::AppConfig;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = AppConfig::from_env();
    config.apply_args(&args)?;

    let mut app = App::load(&config)?;

    let mut term = TerminalRenderer::new().with_mouse(true);
    term.enter()?;

    let result = app.run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

struct App {
    session: GameSession,
    store: Box<dyn Persistence>,
    view: GameView,
    audio: BellAudio,
    gestures: GestureTracker,
    started: Instant,
}

fn cell_rect(r: Rect) -> CellRect {
    CellRect {
        x: r.x,
        y: r.y,
        w: r.w,
        h: r.h,
    }
}

impl App {
    fn load(config: &AppConfig) -> Result<Self> {
        let mut store: Box<dyn Persistence> = match &config.data_path {
            Some(path) => Box::new(JsonFileStore::open(path)),
            None => Box::new(MemoryStore::new()),
        };

        let shapes = match &config.shapes_path {
            Some(path) => load_shape_set(path)?,
            None => ShapeSet::canonical(),
        };

        let theme = store
            .load_preference(THEME_KEY)
            .map(|id| Theme::lookup(&id))
            .unwrap_or_default();
        let saved_speed = load_bool_preference(store.as_mut(), DYNAMIC_SPEED_KEY, true);
        let dynamic_speed = config.dynamic_speed.unwrap_or(saved_speed);
        let muted = load_bool_preference(store.as_mut(), SFX_MUTED_KEY, false);

        let seed = config.seed.unwrap_or_else(clock_seed);
        let session = GameSession::new(
            SessionConfig {
                dynamic_speed,
                lock_delay_ms: config.lock_delay_ms,
            },
            seed,
            shapes,
            store.load_high_scores(),
        );

        match &config.data_path {
            Some(path) => eprintln!("[Main] seed {}, data {}", seed, path.display()),
            None => eprintln!("[Main] seed {}, data in memory", seed),
        }

        let mut view = GameView::default().with_theme(theme);
        view.set_muted(muted);

        Ok(Self {
            session,
            store,
            view,
            audio: BellAudio::new(muted),
            gestures: GestureTracker::new(),
            started: Instant::now(),
        })
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn run(&mut self, term: &mut TerminalRenderer) -> Result<()> {
        let mut fb = FrameBuffer::new(0, 0);
        let mut snap = GameSnapshot::default();

        let mut last_tick = Instant::now();
        let tick_duration = Duration::from_millis(TICK_MS as u64);

        loop {
            // Render.
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            let viewport = Viewport::new(w, h);
            let layout = self.view.layout(viewport);
            self.session.snapshot_into(&mut snap);
            self.view.render_into(&snap, viewport, &mut fb);
            term.draw_swap(&mut fb)?;

            // Input with timeout until next tick.
            let timeout = tick_duration
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => match key.kind {
                        KeyEventKind::Press | KeyEventKind::Repeat => {
                            if should_quit(key) {
                                return Ok(());
                            }
                            if let Some(setting) = settings_key(key) {
                                self.apply_setting(setting);
                            } else if let Some(action) = handle_key_event(key) {
                                let now = self.now_ms();
                                self.session.apply_action(action, now);
                            }
                        }
                        KeyEventKind::Release => {}
                    },
                    Event::Mouse(mouse) => self.handle_mouse(mouse, &layout),
                    Event::Resize(..) => term.invalidate(),
                    _ => {}
                }
            }

            // Tick.
            if last_tick.elapsed() >= tick_duration {
                last_tick = Instant::now();
                let now = self.now_ms();
                self.session.tick(now);
            }

            self.session.drain_cues_into(&mut self.audio);
            if self.session.take_high_scores_changed() {
                self.store.save_high_scores(self.session.high_scores());
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, layout: &Layout) {
        if is_click_in(&mouse, cell_rect(layout.next_preview)) {
            self.session.swap();
            return;
        }

        let (cell_w, cell_h) = self.view.cell_size();
        let mapper = PointerMapper::new(cell_rect(layout.board), cell_w, cell_h);
        let now = self.now_ms();
        match mapper.map(mouse) {
            Some(PointerEvent::Press { x, y }) => {
                self.gestures.begin(&self.session, x, y, now);
            }
            Some(PointerEvent::Move { x, y }) => {
                self.gestures.update(&mut self.session, x, y);
            }
            Some(PointerEvent::Release { x, y }) => {
                self.gestures.end(&mut self.session, x, y, now);
            }
            None => {}
        }
    }

    fn apply_setting(&mut self, setting: SettingsKey) {
        match setting {
            SettingsKey::CycleTheme => {
                let theme = self.view.theme().next();
                self.store.save_preference(THEME_KEY, theme.id);
                self.view.set_theme(theme);
            }
            SettingsKey::ToggleDynamicSpeed => {
                let enabled = !self.session.dynamic_speed();
                self.session.set_dynamic_speed(enabled);
                save_bool_preference(self.store.as_mut(), DYNAMIC_SPEED_KEY, enabled);
            }
            SettingsKey::ToggleMute => {
                let muted = !self.audio.muted();
                self.audio.set_muted(muted);
                self.view.set_muted(muted);
                save_bool_preference(self.store.as_mut(), SFX_MUTED_KEY, muted);
            }
        }
    }
}

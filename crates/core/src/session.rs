//! Game session - the state machine tying board, pieces, timing and scoring together
//!
//! The session owns all game state. It is driven by three things only: the
//! host's frame tick (with a monotonic timestamp in milliseconds), input
//! operations, and the lock timer polled by the tick.
//!
//! Side effects for the outside world are queued rather than performed: sound
//! cues accumulate until the host drains them, and a changed high-score list
//! raises a flag the host clears when it has persisted the list.

use arrayvec::ArrayVec;

use crate::audio::AudioSink;
use crate::board::{Board, LineClearInfo, MAX_CLEARED_ROWS};
use crate::high_scores::HighScoreList;
use crate::piece::Piece;
use crate::rng::SimpleRng;
use crate::scoring::{check_level_up, drop_interval_ms, points_for_lines, total_score_for_level};
use crate::shape::ShapeSet;
use crate::snapshot::{AnimationSnapshot, GameSnapshot, PieceSnapshot};
use crate::timer::LockTimer;
use crate::types::{GameAction, GamePhase, LineClearKind, PieceKind, SoundCue, LOCK_DELAY_MS};

/// Line-clear animations kept alive at once; the oldest is dropped beyond this
pub const MAX_ANIMATIONS: usize = 8;

/// Pending sound cues; further cues are dropped until the host drains the queue
pub const MAX_PENDING_CUES: usize = 16;

/// Tunables fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Gravity speeds up with the level when enabled
    pub dynamic_speed: bool,
    pub lock_delay_ms: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dynamic_speed: true,
            lock_delay_ms: LOCK_DELAY_MS,
        }
    }
}

/// A running line-clear flash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClearAnimation {
    pub rows: ArrayVec<usize, MAX_CLEARED_ROWS>,
    pub kind: LineClearKind,
    pub started_ms: u64,
}

impl LineClearAnimation {
    pub fn duration_ms(&self) -> u32 {
        self.kind.duration_ms()
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u32 {
        now_ms
            .saturating_sub(self.started_ms)
            .min(self.duration_ms() as u64) as u32
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.started_ms) >= self.duration_ms() as u64
    }
}

/// Outcome of the last finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameOverSummary {
    pub score: u32,
    /// Best score on record after this game was entered
    pub best: u32,
    pub new_high_score: bool,
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    shapes: ShapeSet,
    rng: SimpleRng,
    current: Option<Piece>,
    next: PieceKind,
    phase: GamePhase,
    score: u32,
    level: u32,
    next_level_score: u32,
    dynamic_speed: bool,
    drop_interval_ms: u32,
    drop_counter_ms: u64,
    last_tick_ms: u64,
    /// Game clock: the timestamp of the latest playing tick or phase change
    now_ms: u64,
    /// Latest timestamp seen in any phase; drives animations
    anim_clock_ms: u64,
    lock_delay_ms: u32,
    lock_timer: LockTimer,
    landed: bool,
    can_swap: bool,
    game_over: bool,
    animations: ArrayVec<LineClearAnimation, MAX_ANIMATIONS>,
    cues: ArrayVec<SoundCue, MAX_PENDING_CUES>,
    high_scores: HighScoreList,
    high_scores_changed: bool,
    last_game: Option<GameOverSummary>,
}

impl GameSession {
    /// Create a session in the menu phase
    pub fn new(config: SessionConfig, seed: u32, shapes: ShapeSet, high_scores: HighScoreList) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = rng.random_kind();

        Self {
            board: Board::new(),
            shapes,
            rng,
            current: None,
            next,
            phase: GamePhase::Menu,
            score: 0,
            level: 0,
            next_level_score: total_score_for_level(1),
            dynamic_speed: config.dynamic_speed,
            drop_interval_ms: drop_interval_ms(0, config.dynamic_speed),
            drop_counter_ms: 0,
            last_tick_ms: 0,
            now_ms: 0,
            anim_clock_ms: 0,
            lock_delay_ms: config.lock_delay_ms,
            lock_timer: LockTimer::new(),
            landed: false,
            can_swap: true,
            game_over: false,
            animations: ArrayVec::new(),
            cues: ArrayVec::new(),
            high_scores,
            high_scores_changed: false,
            last_game: None,
        }
    }

    // ---- accessors ----

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scripted setups (puzzles, tests, benchmarks)
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current_piece(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn next_kind(&self) -> PieceKind {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn next_level_score(&self) -> u32 {
        self.next_level_score
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn dynamic_speed(&self) -> bool {
        self.dynamic_speed
    }

    pub fn is_landed(&self) -> bool {
        self.landed
    }

    pub fn can_swap(&self) -> bool {
        self.can_swap
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Time left on the lock delay, if it is armed
    pub fn lock_remaining_ms(&self) -> Option<u64> {
        self.lock_timer.remaining_ms(self.now_ms)
    }

    pub fn animations(&self) -> &[LineClearAnimation] {
        &self.animations
    }

    pub fn high_scores(&self) -> &HighScoreList {
        &self.high_scores
    }

    pub fn last_game(&self) -> Option<GameOverSummary> {
        self.last_game
    }

    /// Ghost row of the current piece
    pub fn ghost_y(&self) -> Option<i8> {
        let piece = self.current.as_ref()?;
        Some(self.board.ghost_drop_row(piece))
    }

    // ---- host plumbing ----

    /// Take all pending sound cues
    pub fn take_cues(&mut self) -> ArrayVec<SoundCue, MAX_PENDING_CUES> {
        std::mem::take(&mut self.cues)
    }

    /// Play and clear all pending sound cues
    pub fn drain_cues_into(&mut self, sink: &mut dyn AudioSink) {
        for cue in self.take_cues() {
            sink.play(cue);
        }
    }

    /// Returns true once after the high-score list changed
    pub fn take_high_scores_changed(&mut self) -> bool {
        std::mem::take(&mut self.high_scores_changed)
    }

    fn push_cue(&mut self, cue: SoundCue) {
        let _ = self.cues.try_push(cue);
    }

    // ---- lifecycle ----

    /// Reset the board and spawn the first piece.
    ///
    /// `keep_score` carries score and level over (continue after game over).
    pub fn start_new_game(&mut self, keep_score: bool, now_ms: u64) {
        self.board.reset();
        self.game_over = false;
        self.landed = false;
        self.lock_timer.cancel();

        if !keep_score {
            self.score = 0;
            self.level = 0;
            self.next_level_score = total_score_for_level(1);
        }
        self.can_swap = true;
        self.update_drop_speed();

        self.last_tick_ms = now_ms;
        self.now_ms = now_ms;
        self.anim_clock_ms = self.anim_clock_ms.max(now_ms);
        self.drop_counter_ms = 0;
        self.animations.clear();
        self.last_game = None;

        self.next = self.rng.random_kind();
        self.spawn_next();

        if self.game_over {
            self.handle_game_over();
        } else {
            self.phase = GamePhase::Playing;
        }
    }

    /// Start a fresh game from the menu
    pub fn start_game(&mut self, now_ms: u64) -> bool {
        if self.phase != GamePhase::Menu {
            return false;
        }
        self.push_cue(SoundCue::ButtonClick);
        self.start_new_game(false, now_ms);
        true
    }

    /// New game with score and level reset
    pub fn restart(&mut self, now_ms: u64) -> bool {
        if !matches!(
            self.phase,
            GamePhase::Playing | GamePhase::Paused | GamePhase::GameOver
        ) {
            return false;
        }
        self.push_cue(SoundCue::ButtonClick);
        self.start_new_game(false, now_ms);
        true
    }

    /// New game after game over, keeping score and level
    pub fn continue_game(&mut self, now_ms: u64) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.push_cue(SoundCue::ButtonClick);
        self.start_new_game(true, now_ms);
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::Paused;
        self.lock_timer.suspend(self.now_ms);
        true
    }

    /// Resume a paused game. Time spent paused is not credited to gravity
    /// or the lock delay.
    pub fn resume(&mut self, now_ms: u64) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.push_cue(SoundCue::ButtonClick);
        self.phase = GamePhase::Playing;
        self.last_tick_ms = now_ms;
        self.now_ms = now_ms;
        self.anim_clock_ms = self.anim_clock_ms.max(now_ms);
        self.lock_timer.resume(now_ms);
        true
    }

    pub fn toggle_pause(&mut self, now_ms: u64) -> bool {
        match self.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(now_ms),
            _ => false,
        }
    }

    /// Abandon the current game (if any) and return to the menu
    pub fn go_to_menu(&mut self) -> bool {
        if self.phase == GamePhase::Menu {
            return false;
        }
        self.push_cue(SoundCue::ButtonClick);
        self.phase = GamePhase::Menu;
        self.current = None;
        self.landed = false;
        self.lock_timer.cancel();
        true
    }

    pub fn show_high_scores(&mut self) -> bool {
        if self.phase != GamePhase::Menu {
            return false;
        }
        self.push_cue(SoundCue::ButtonClick);
        self.phase = GamePhase::HighScores;
        true
    }

    pub fn close_high_scores(&mut self) -> bool {
        if self.phase != GamePhase::HighScores {
            return false;
        }
        self.push_cue(SoundCue::ButtonClick);
        self.phase = GamePhase::Menu;
        true
    }

    /// Change the gravity mode; takes effect immediately
    pub fn set_dynamic_speed(&mut self, enabled: bool) {
        self.dynamic_speed = enabled;
        self.update_drop_speed();
    }

    fn update_drop_speed(&mut self) {
        self.drop_interval_ms = drop_interval_ms(self.level, self.dynamic_speed);
    }

    // ---- frame tick ----

    /// Advance the session clock to `now_ms`.
    ///
    /// Expires finished animations in every phase. While playing it applies
    /// gravity and fires the lock delay.
    pub fn tick(&mut self, now_ms: u64) {
        self.anim_clock_ms = self.anim_clock_ms.max(now_ms);
        let clock = self.anim_clock_ms;
        self.animations.retain(|a| !a.is_finished(clock));

        if self.phase != GamePhase::Playing {
            return;
        }

        let elapsed = now_ms.saturating_sub(self.last_tick_ms);
        self.last_tick_ms = now_ms;
        self.now_ms = now_ms;

        if !self.landed {
            self.drop_counter_ms += elapsed;
            if self.drop_counter_ms > self.drop_interval_ms as u64 {
                let blocked = match self.current.as_mut() {
                    Some(piece) => piece.move_down(&self.board),
                    None => false,
                };
                if blocked {
                    self.piece_has_landed();
                }
                self.drop_counter_ms = 0;
            }
        }

        if self.lock_timer.poll(now_ms) {
            self.on_lock_delay_elapsed();
        }
    }

    // ---- piece control ----

    pub fn move_left(&mut self) -> bool {
        self.apply_horizontal(Piece::move_left)
    }

    pub fn move_right(&mut self) -> bool {
        self.apply_horizontal(Piece::move_right)
    }

    /// Rotate clockwise. A landed piece gets the same lock-delay treatment as
    /// a horizontal move.
    pub fn rotate(&mut self) -> bool {
        self.apply_horizontal(Piece::rotate)
    }

    fn apply_horizontal(&mut self, op: fn(&mut Piece, &Board) -> bool) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let moved = match self.current.as_mut() {
            Some(piece) => op(piece, &self.board),
            None => false,
        };
        if moved {
            self.handle_landed_interrupt();
        }
        moved
    }

    /// Drop one row; a piece that cannot fall locks immediately
    pub fn soft_drop(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let blocked = match self.current.as_mut() {
            Some(piece) => piece.move_down(&self.board),
            None => return false,
        };
        if blocked {
            self.lock_piece_and_continue();
        }
        self.drop_counter_ms = 0;
        true
    }

    /// Drop to the landing row and start the lock delay
    pub fn hard_drop(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let Some(piece) = self.current.as_mut() else {
            return false;
        };
        while !piece.move_down(&self.board) {}

        self.piece_has_landed();
        self.drop_counter_ms = 0;
        true
    }

    /// Exchange the current and next kinds, once per spawn
    pub fn swap(&mut self) -> bool {
        if self.phase != GamePhase::Playing || !self.can_swap {
            return false;
        }
        let Some(current) = self.current else {
            return false;
        };

        let candidate = Piece::spawn(self.next, &self.shapes);
        self.current = Some(candidate);

        if !candidate.is_valid(&self.board) {
            self.game_over = true;
            self.handle_game_over();
            return true;
        }

        self.next = current.kind;
        self.can_swap = false;
        self.landed = false;
        self.lock_timer.cancel();
        self.drop_counter_ms = 0;
        true
    }

    /// Apply a discrete action, interpreting menu actions per phase
    pub fn apply_action(&mut self, action: GameAction, now_ms: u64) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::Swap => self.swap(),
            GameAction::Pause => self.toggle_pause(now_ms),
            GameAction::Start => match self.phase {
                GamePhase::Menu => self.start_game(now_ms),
                GamePhase::GameOver => self.continue_game(now_ms),
                GamePhase::Paused => self.resume(now_ms),
                GamePhase::Playing | GamePhase::HighScores => false,
            },
            GameAction::Restart => self.restart(now_ms),
            GameAction::Menu => match self.phase {
                GamePhase::HighScores => self.close_high_scores(),
                _ => self.go_to_menu(),
            },
            GameAction::HighScores => self.show_high_scores(),
        }
    }

    // ---- landing and locking ----

    fn piece_has_landed(&mut self) {
        if self.game_over || self.current.is_none() {
            return;
        }
        self.landed = true;
        self.lock_timer.arm(self.now_ms, self.lock_delay_ms);
    }

    /// A landed piece moved sideways or rotated: restart the delay if it is
    /// still resting, otherwise let it fall again.
    fn handle_landed_interrupt(&mut self) {
        if !self.landed {
            return;
        }
        let Some(piece) = self.current.as_ref() else {
            return;
        };

        self.lock_timer.cancel();
        if piece.is_resting(&self.board) {
            self.lock_timer.arm(self.now_ms, self.lock_delay_ms);
        } else {
            self.landed = false;
        }
    }

    fn on_lock_delay_elapsed(&mut self) {
        let can_fall = match self.current.as_ref() {
            Some(piece) => !piece.is_resting(&self.board),
            None => return,
        };
        if can_fall {
            self.landed = false;
        } else {
            self.lock_piece_and_continue();
        }
    }

    fn lock_piece_and_continue(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };

        self.board.fix(&piece);
        let info = self.board.clear_lines();
        self.handle_line_clears(info);

        self.spawn_next();
        if self.game_over {
            self.handle_game_over();
            return;
        }

        self.landed = false;
        self.lock_timer.cancel();
        self.drop_counter_ms = 0;
    }

    fn handle_line_clears(&mut self, info: LineClearInfo) {
        let count = info.count();
        if count == 0 {
            return;
        }

        self.score = self
            .score
            .saturating_add(points_for_lines(count, self.level));
        let up = check_level_up(self.score, self.level, self.next_level_score);
        self.level = up.level;
        self.next_level_score = up.next_level_score;
        if up.changed {
            self.update_drop_speed();
        }

        let kind = LineClearKind::for_count(count);
        self.push_cue(match kind {
            LineClearKind::Tetris => SoundCue::TetrisClear,
            LineClearKind::Normal => SoundCue::LineClear,
        });

        if self.animations.is_full() {
            self.animations.remove(0);
        }
        self.animations.push(LineClearAnimation {
            rows: info.rows,
            kind,
            started_ms: self.now_ms,
        });
    }

    fn spawn_next(&mut self) {
        self.landed = false;
        self.lock_timer.cancel();

        let piece = Piece::spawn(self.next, &self.shapes);
        self.current = Some(piece);
        self.next = self.rng.random_kind();
        self.can_swap = true;

        if !piece.is_valid(&self.board) {
            self.game_over = true;
        }
    }

    fn handle_game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.landed = false;
        self.lock_timer.cancel();

        let new_high_score = self.high_scores.insert(self.score);
        if new_high_score {
            self.high_scores_changed = true;
        }
        let best = self.high_scores.best().unwrap_or(0);

        self.push_cue(if new_high_score {
            SoundCue::NewHighScore
        } else {
            SoundCue::GameOver
        });
        self.last_game = Some(GameOverSummary {
            score: self.score,
            best,
            new_high_score,
        });
    }

    // ---- snapshot ----

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board = self.board.rows();

        let live = !self.game_over;
        out.current = self.current.filter(|_| live).map(PieceSnapshot::from);
        out.ghost_y = if live && self.phase == GamePhase::Playing {
            self.ghost_y()
        } else {
            None
        };
        out.next = if self.phase == GamePhase::Menu {
            None
        } else {
            Some(PieceSnapshot::from(Piece::spawn(self.next, &self.shapes)))
        };

        out.animations.clear();
        for anim in &self.animations {
            out.animations.push(AnimationSnapshot {
                rows: anim.rows.clone(),
                kind: anim.kind,
                elapsed_ms: anim.elapsed_ms(self.anim_clock_ms),
                duration_ms: anim.duration_ms(),
            });
        }

        out.phase = self.phase;
        out.score = self.score;
        out.level = self.level;
        out.next_level_score = self.next_level_score;
        out.high_scores = self.high_scores.clone();
        out.last_game = self.last_game;
        out.can_swap = self.can_swap;
        out.landed = self.landed;
        out.dynamic_speed = self.dynamic_speed;
        out.drop_interval_ms = self.drop_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(
            SessionConfig::default(),
            1,
            ShapeSet::canonical(),
            HighScoreList::new(),
        )
    }
}

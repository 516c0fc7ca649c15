//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world and the session state, processes
//! player commands, runs all systems, and produces `GameStateSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use wordstrike_core::commands::PlayerCommand;
use wordstrike_core::constants::*;
use wordstrike_core::enums::{BonusItemKind, GameMode, GamePhase, Key, RemovalReason};
use wordstrike_core::events::{AchievementEvent, GameEvent};
use wordstrike_core::session::GameState;
use wordstrike_core::state::GameStateSnapshot;
use wordstrike_core::types::{EnemyId, SimTime};
use wordstrike_difficulty::difficulty_bucket;
use wordstrike_typing::text::char_len;
use wordstrike_typing::{KeyContext, TypingMatcher};
use wordstrike_words::builtin::{builtin_library, builtin_trivia};
use wordstrike_words::{TriviaBank, TriviaQuestion, TriviaSource, WordError, WordLibrary, WordSupplier};

use crate::achievements::{AchievementSink, NullSink};
use crate::combat::{self, LevelChange, WordResolution};
use crate::persistence::{MemoryStore, ProfileStore, Settings};
use crate::systems;
use crate::systems::movement::ReachedDefender;
use crate::systems::spawn_scheduler::{SpawnContext, SpawnScheduler};
use crate::systems::typing::{DueCompletion, KeyAction};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// EMP recharge time in ticks.
    pub emp_max_cooldown_ticks: u32,
    /// Delay between typing the last letter and the kill resolving.
    pub completion_delay_secs: f64,
    /// Upper bound on a single tick's delta time.
    pub max_frame_dt: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            emp_max_cooldown_ticks: EMP_MAX_COOLDOWN_TICKS,
            completion_delay_secs: WORD_COMPLETION_DELAY_SECS,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    config: SimConfig,
    session: Option<GameState>,
    scheduler: SpawnScheduler,
    matcher: TypingMatcher,
    /// Never rewound, so ids stay unique across session resets.
    next_enemy_id: u64,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    reached_buffer: Vec<ReachedDefender>,
    events: Vec<GameEvent>,
    trivia: Option<TriviaQuestion>,
    /// Set when the EMP fired during this tick's commands; the cooldown
    /// starts counting down on the following tick.
    emp_fired_this_tick: bool,

    // --- Collaborators ---
    words: Box<dyn WordSupplier>,
    trivia_source: Box<dyn TriviaSource>,
    store: Box<dyn ProfileStore>,
    achievements: Box<dyn AchievementSink>,
}

impl SimulationEngine {
    /// Create an engine with no word packs, no trivia, in-memory persistence
    /// and no achievement tracking. Plug real collaborators in with the
    /// `with_*` methods.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            session: None,
            scheduler: SpawnScheduler::default(),
            matcher: TypingMatcher::new(),
            next_enemy_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            reached_buffer: Vec::new(),
            events: Vec::new(),
            trivia: None,
            emp_fired_this_tick: false,
            words: Box::new(WordLibrary::new(config.seed)),
            trivia_source: Box::new(TriviaBank::empty(config.seed)),
            store: Box::new(MemoryStore::new()),
            achievements: Box::new(NullSink),
            config,
        }
    }

    /// Engine loaded with the built-in word packs and trivia bank.
    pub fn with_builtin_content(config: SimConfig) -> Result<Self, WordError> {
        let seed = config.seed;
        Ok(Self::new(config)
            .with_word_supplier(Box::new(builtin_library(seed)?))
            .with_trivia_source(Box::new(builtin_trivia(seed)?)))
    }

    pub fn with_word_supplier(mut self, words: Box<dyn WordSupplier>) -> Self {
        self.words = words;
        self
    }

    pub fn with_trivia_source(mut self, trivia: Box<dyn TriviaSource>) -> Self {
        self.trivia_source = trivia;
        self
    }

    pub fn with_profile_store(mut self, store: Box<dyn ProfileStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_achievement_sink(mut self, sink: Box<dyn AchievementSink>) -> Self {
        self.achievements = sink;
        self
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one frame of `frame_dt` seconds (clamped to
    /// `[0, max_frame_dt]`) and return the resulting snapshot.
    pub fn tick(&mut self, frame_dt: f64) -> GameStateSnapshot {
        let dt = self.clamp_dt(frame_dt);
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems(dt);
            self.time.advance(dt);
        }
        self.emp_fired_this_tick = false;

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.session.as_ref(),
            self.trivia.as_ref(),
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Scalar state of the current (or just finished) session.
    pub fn session(&self) -> Option<&GameState> {
        self.session.as_ref()
    }

    pub fn matcher(&self) -> &TypingMatcher {
        &self.matcher
    }

    pub fn scheduler(&self) -> &SpawnScheduler {
        &self.scheduler
    }

    pub fn trivia_question(&self) -> Option<&TriviaQuestion> {
        self.trivia.as_ref()
    }

    pub fn profile_store(&self) -> &dyn ProfileStore {
        self.store.as_ref()
    }

    /// Spawn an enemy directly (for tests needing a known word and position).
    #[cfg(test)]
    pub fn spawn_test_enemy(
        &mut self,
        word: &str,
        is_boss: bool,
        position: wordstrike_core::types::Position,
    ) -> EnemyId {
        use wordstrike_core::enums::{EnemyType, SpawnLane};

        let id = EnemyId(self.next_enemy_id);
        self.next_enemy_id += 1;
        let entity = crate::world_setup::spawn_enemy(
            &mut self.world,
            crate::world_setup::EnemySpawn {
                id,
                word: word.to_owned(),
                enemy_type: EnemyType::Basic,
                is_boss,
                lane: SpawnLane::Center,
                speed: 2.0,
                health: wordstrike_difficulty::enemy_health(1, is_boss),
            },
        );
        if let Ok(mut pos) = self.world.get::<&mut wordstrike_core::types::Position>(entity) {
            *pos = position;
        }
        id
    }

    /// Mutable session access for arranging test scenarios.
    #[cfg(test)]
    pub fn session_mut(&mut self) -> Option<&mut GameState> {
        self.session.as_mut()
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[cfg(test)]
    pub fn profile_store_mut(&mut self) -> &mut dyn ProfileStore {
        self.store.as_mut()
    }

    fn clamp_dt(&self, frame_dt: f64) -> f64 {
        if frame_dt.is_finite() {
            frame_dt.clamp(0.0, self.config.max_frame_dt)
        } else {
            0.0
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartSession { mode } => self.start_session(mode),
            PlayerCommand::KeyPress { key } => self.handle_key(key),
            PlayerCommand::UseBonusItem { slot } => {
                if self.phase == GamePhase::Active {
                    self.use_bonus_item(slot);
                }
            }
            PlayerCommand::AnswerTrivia { choice } => {
                if self.phase == GamePhase::TriviaPrompt {
                    self.answer_trivia(choice);
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::ReturnToMenu => {
                self.reset_world();
                self.phase = GamePhase::MainMenu;
                self.time = SimTime::default();
            }
        }
    }

    /// Discard every live enemy, timer and pending completion.
    fn reset_world(&mut self) {
        systems::cleanup::despawn_all(&mut self.world);
        self.scheduler = SpawnScheduler::default();
        self.matcher.release();
        self.despawn_buffer.clear();
        self.reached_buffer.clear();
        self.trivia = None;
        self.session = None;
        self.emp_fired_this_tick = false;
    }

    fn start_session(&mut self, mode: GameMode) {
        self.reset_world();

        let preference = self
            .store
            .load_settings()
            .unwrap_or_else(|err| {
                warn!(%err, "failed to load settings, using defaults");
                Settings::default()
            })
            .difficulty;
        let language = mode.language_key().to_owned();

        self.session = Some(GameState::new(
            mode,
            preference,
            difficulty_bucket(1, preference),
            self.config.emp_max_cooldown_ticks,
        ));
        self.phase = GamePhase::Active;
        self.time = SimTime::default();

        info!(language = %language, ?preference, "session started");
        self.achievements
            .notify(AchievementEvent::LanguagePlayed { language });
    }

    fn handle_key(&mut self, key: Key) {
        match self.phase {
            GamePhase::Active => {}
            GamePhase::Paused if key == Key::Escape => {}
            _ => return,
        }
        let Some(state) = self.session.as_mut() else {
            return;
        };

        let ctx = KeyContext {
            emp_ready: self.phase == GamePhase::Active && state.emp_cooldown == 0,
            pause_allowed: true,
        };
        let action = systems::typing::handle_key(
            &mut self.world,
            &mut self.matcher,
            state,
            key,
            ctx,
            self.config.completion_delay_secs,
            &mut self.events,
        );

        match action {
            KeyAction::None => {}
            KeyAction::FireEmp => self.fire_emp(),
            KeyAction::TogglePause => {
                self.phase = match self.phase {
                    GamePhase::Active => GamePhase::Paused,
                    GamePhase::Paused => GamePhase::Active,
                    other => other,
                };
                debug!(phase = ?self.phase, "pause toggled");
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        if let Some(state) = self.session.as_mut() {
            state.active_secs += dt;
            state.recompute_wpm();
        }

        // 1. Word completions whose delay has elapsed
        for completion in systems::typing::advance_pending(&mut self.world, dt) {
            if self.phase != GamePhase::Active {
                break;
            }
            self.resolve_completion(completion);
        }
        if self.phase != GamePhase::Active {
            return;
        }

        // 2. Spawn scheduling
        if let Some(state) = self.session.as_ref() {
            let mut ctx = SpawnContext {
                world: &mut self.world,
                rng: &mut self.rng,
                words: self.words.as_mut(),
                state,
                next_enemy_id: &mut self.next_enemy_id,
                events: &mut self.events,
            };
            self.scheduler.run(&mut ctx, dt);
        }

        // 3. Movement (held while a freeze is active)
        let frozen = self
            .session
            .as_ref()
            .is_some_and(|s| s.freeze_remaining_secs > 0.0);
        self.reached_buffer.clear();
        if frozen {
            systems::movement::halt(&mut self.world);
        } else {
            systems::movement::run(&mut self.world, dt, &mut self.reached_buffer);
        }

        // 4. Defender hits
        let reached = std::mem::take(&mut self.reached_buffer);
        for hit in &reached {
            if self.phase != GamePhase::Active {
                break;
            }
            self.resolve_defender_hit(*hit);
        }
        self.reached_buffer = reached;
        if self.phase != GamePhase::Active {
            return;
        }

        // 5. Cooldowns
        if let Some(state) = self.session.as_mut() {
            if !self.emp_fired_this_tick {
                combat::tick_emp_cooldown(state);
            }
            state.freeze_remaining_secs = (state.freeze_remaining_secs - dt).max(0.0);
        }

        // 6. Invariant repair
        if let Some(state) = self.session.as_mut() {
            systems::typing::repair_invariants(&mut self.world, &mut self.matcher, state);
        }

        // 7. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer, &mut self.events);
    }

    fn resolve_completion(&mut self, completion: DueCompletion) {
        let Some(state) = self.session.as_mut() else {
            return;
        };
        let length = char_len(&completion.word);
        let resolution =
            combat::resolve_word(state, &completion.word, &completion.typed, completion.is_boss);

        let (boss, level_up) = match resolution {
            WordResolution::Missed => {
                systems::typing::reject_submission(&mut self.world, completion.entity);
                self.matcher.release_if(completion.id);
                state.active_enemy = self.matcher.active();
                warn!(id = %completion.id, typed = %completion.typed, "submitted word did not match, counted as missed");
                self.events.push(GameEvent::WordMissed { id: completion.id });
                self.achievements.notify(AchievementEvent::WordTyped {
                    correct: false,
                    length,
                });
                return;
            }
            WordResolution::Correct {
                points,
                boss,
                level_up,
            } => {
                debug!(id = %completion.id, points, score = state.score, "word completed");
                (boss, level_up)
            }
        };

        systems::cleanup::remove_enemy(
            &mut self.world,
            completion.entity,
            RemovalReason::Destroyed,
            &mut self.events,
        );
        self.achievements.notify(AchievementEvent::WordTyped {
            correct: true,
            length,
        });

        if let Some(kill) = boss {
            info!(
                bosses_defeated = kill.bosses_defeated,
                trivia_due = kill.trivia_due,
                "boss defeated"
            );
            self.events.push(GameEvent::BossDefeated {
                bosses_defeated: kill.bosses_defeated,
                trivia_due: kill.trivia_due,
            });
            self.achievements.notify(AchievementEvent::BossDefeated {
                total: kill.bosses_defeated,
            });
        }

        if level_up {
            let stored = self.store.load_settings();
            let change = match self.session.as_mut() {
                Some(state) => {
                    // The stored preference is read again on every level-up.
                    match stored {
                        Ok(settings) => state.starting_difficulty = settings.difficulty,
                        Err(err) => {
                            warn!(
                                %err,
                                preference = ?state.starting_difficulty,
                                "failed to reload settings, keeping the session preference"
                            );
                        }
                    }
                    combat::advance_level(state)
                }
                None => return,
            };
            match change {
                LevelChange::Advanced { level, difficulty } => {
                    info!(level, ?difficulty, "level advanced");
                    self.events
                        .push(GameEvent::LevelAdvanced { level, difficulty });
                }
                LevelChange::MaxLevelReached => {
                    self.end_session(true);
                    return;
                }
            }
        }

        if boss.is_some_and(|kill| kill.trivia_due) {
            self.open_trivia();
        }
    }

    fn resolve_defender_hit(&mut self, hit: ReachedDefender) {
        // Already gone (cleared or completed earlier this tick): nothing to do.
        if !systems::cleanup::remove_enemy(
            &mut self.world,
            hit.entity,
            RemovalReason::ReachedDefender,
            &mut self.events,
        ) {
            return;
        }
        self.matcher.release_if(hit.id);

        let Some(state) = self.session.as_mut() else {
            return;
        };
        state.active_enemy = self.matcher.active();
        let outcome = combat::apply_defender_hit(state, hit.is_boss);
        debug!(
            id = %hit.id,
            damage = outcome.damage,
            shield_absorbed = outcome.shield_absorbed,
            health = outcome.health,
            "defender hit"
        );
        self.events.push(GameEvent::DefenderHit {
            damage: outcome.damage,
            shield_absorbed: outcome.shield_absorbed,
            health: outcome.health,
        });

        if state.is_defeated() {
            self.end_session(false);
        }
    }

    fn fire_emp(&mut self) {
        let Some(state) = self.session.as_mut() else {
            return;
        };
        if !combat::try_fire_emp(state) {
            debug!(cooldown = state.emp_cooldown, "EMP still cooling down");
            return;
        }
        let cleared = systems::cleanup::remove_where(
            &mut self.world,
            |profile| !profile.is_boss,
            RemovalReason::EmpCleared,
            &mut self.events,
        );
        self.release_removed(&cleared);
        self.emp_fired_this_tick = true;
        info!(cleared = cleared.len(), "EMP fired");
        self.events.push(GameEvent::EmpFired {
            cleared: cleared.len() as u32,
        });
    }

    fn use_bonus_item(&mut self, slot: usize) {
        let Some(state) = self.session.as_mut() else {
            return;
        };
        let Some(kind) = combat::consume_bonus_item(state, slot) else {
            debug!(slot, "no bonus item in slot");
            return;
        };

        match kind {
            BonusItemKind::Heal => combat::heal(state, HEAL_AMOUNT),
            BonusItemKind::Shield => combat::recharge_shield(state, SHIELD_AMOUNT),
            BonusItemKind::Freeze => state.freeze_remaining_secs = FREEZE_DURATION_SECS,
            BonusItemKind::ClearEnemies => {
                let cleared = systems::cleanup::remove_where(
                    &mut self.world,
                    |profile| !profile.is_boss,
                    RemovalReason::BonusCleared,
                    &mut self.events,
                );
                self.release_removed(&cleared);
            }
        }

        info!(?kind, "bonus item used");
        self.events.push(GameEvent::BonusItemUsed { kind });
        self.achievements
            .notify(AchievementEvent::BonusUsed { kind });
    }

    /// Drop focus if the focused enemy was among `removed`.
    fn release_removed(&mut self, removed: &[EnemyId]) {
        for id in removed {
            self.matcher.release_if(*id);
        }
        if let Some(state) = self.session.as_mut() {
            state.active_enemy = self.matcher.active();
        }
    }

    fn open_trivia(&mut self) {
        let Some(state) = self.session.as_ref() else {
            return;
        };
        let language = state.mode.language_key().to_owned();
        match self.trivia_source.next_question(&language) {
            Some(question) => {
                info!(language = %language, "trivia prompt opened");
                self.trivia = Some(question);
                self.phase = GamePhase::TriviaPrompt;
            }
            None => warn!(language = %language, "no trivia question available, prompt skipped"),
        }
    }

    fn answer_trivia(&mut self, choice: usize) {
        let Some(question) = self.trivia.take() else {
            self.phase = GamePhase::Active;
            return;
        };
        let correct = question.is_correct(choice);
        info!(choice, correct, "trivia answered");
        self.events.push(GameEvent::TriviaAnswered { correct });

        if correct {
            let kind = BonusItemKind::ALL[self.rng.gen_range(0..BonusItemKind::ALL.len())];
            if let Some(state) = self.session.as_mut() {
                if combat::award_bonus_item(state, kind) {
                    self.events.push(GameEvent::BonusItemEarned { kind });
                    self.achievements
                        .notify(AchievementEvent::BonusCollected { kind });
                }
            }
        }
        self.phase = GamePhase::Active;
    }

    /// Finish the session: emit final stats, hand them to the store, and
    /// switch to the end screen. The world is left as-is until the next reset.
    fn end_session(&mut self, victory: bool) {
        self.matcher.release();
        self.trivia = None;
        let Some(state) = self.session.as_mut() else {
            return;
        };
        state.active_enemy = None;
        let stats = state.final_stats(victory);

        if let Err(err) = self.store.record_session(&stats) {
            warn!(%err, "failed to record finished session");
        }
        info!(
            score = stats.score,
            level = stats.level,
            victory,
            "session ended"
        );
        self.events.push(GameEvent::SessionEnded { stats });
        self.phase = if victory {
            GamePhase::Victory
        } else {
            GamePhase::GameOver
        };
    }
}

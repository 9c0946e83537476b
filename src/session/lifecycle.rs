//! Round lifecycle.
//!
//! ```text
//!   PreStart ──start──▶ LoadingAssets ──dealt──▶ Active ──win/timeout/end──▶ Ended
//!      ▲                      │                                               │
//!      └──── nothing loaded ──┘◀────────────── restart / home ────────────────┘
//! ```
//!
//! A `Session` owns everything about play: the configuration, the current
//! round, the virtual clock and the queue of player events. Events are
//! handled one at a time, to completion, in arrival order. Leaving a round
//! cancels its countdown and any pending mismatch hide, and every wakeup
//! carries its round id, so nothing from one round can reach the next.
//!
//! The idle watchdog is re-armed by every player event and whenever the end
//! screen is shown. If it fires while the end screen is up, a new round starts.

use std::collections::VecDeque;
use std::time::Duration;

use super::event::{Notice, RoundId, Screen, SessionEvent};
use super::scheduler::{Scheduler, TimerId, Wakeup};
use super::summary::{RoundOutcome, RoundSummary};
use crate::assets::{AssetProbe, AssetResolver, DirectoryProbe, ImageSource, PlaceholderArt};
use crate::cards::DeckBuilder;
use crate::core::{ConfigError, DeckRng, Difficulty, DifficultyProfile, GameConfig, StartError};
use crate::engine::{RoundState, RoundTimer, SelectOutcome, Tick};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Where the session is in the round lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    #[default]
    PreStart,
    LoadingAssets,
    Active,
    Ended,
}

/// The round being played or last played.
#[derive(Clone, Debug)]
struct ActiveRound {
    id: RoundId,
    difficulty: Option<Difficulty>,
    grid: DifficultyProfile,
    state: RoundState,
    timer: RoundTimer,
    tick_timer: Option<TimerId>,
    mismatch_timer: Option<TimerId>,
}

/// A kiosk game session.
#[derive(Debug)]
pub struct Session<P = DirectoryProbe> {
    config: GameConfig,
    resolver: AssetResolver<P>,
    placeholders: PlaceholderArt,
    rng: DeckRng,
    scheduler: Scheduler,
    queue: VecDeque<SessionEvent>,
    phase: LifecyclePhase,
    screen: Screen,
    round: Option<ActiveRound>,
    last_summary: Option<RoundSummary>,
    status_message: Option<String>,
    next_round: u64,
    idle_timer: Option<TimerId>,
}

impl Session<DirectoryProbe> {
    /// Session that looks for images in `config.image_dir`.
    pub fn from_config(config: GameConfig) -> Result<Self, ConfigError> {
        let probe = DirectoryProbe::new(config.image_dir.clone());
        Self::new(config, probe)
    }
}

impl<P: AssetProbe> Session<P> {
    /// Create a session on the start screen.
    ///
    /// Fails if the configuration cannot produce a playable round.
    pub fn new(config: GameConfig, probe: P) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.shuffle_seed {
            Some(seed) => DeckRng::new(seed),
            None => DeckRng::from_entropy(),
        };
        let resolver = AssetResolver::new(probe, config.extension_variants.clone());

        let mut session = Self {
            config,
            resolver,
            placeholders: PlaceholderArt::new(),
            rng,
            scheduler: Scheduler::new(),
            queue: VecDeque::new(),
            phase: LifecyclePhase::PreStart,
            screen: Screen::Start,
            round: None,
            last_summary: None,
            status_message: None,
            next_round: 1,
            idle_timer: None,
        };
        session.rearm_idle();
        Ok(session)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    /// Board of the current or last round. Cleared when returning home or
    /// starting another round.
    #[must_use]
    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref().map(|r| &r.state)
    }

    #[must_use]
    pub fn round_id(&self) -> Option<RoundId> {
        self.round.as_ref().map(|r| r.id)
    }

    #[must_use]
    pub fn timer(&self) -> Option<&RoundTimer> {
        self.round.as_ref().map(|r| &r.timer)
    }

    /// Countdown text; shows the full budget when no round is running.
    #[must_use]
    pub fn timer_display(&self) -> String {
        match self.timer() {
            Some(timer) => timer.display(),
            None => crate::engine::format_countdown(self.config.profile().time_budget_secs),
        }
    }

    #[must_use]
    pub fn last_summary(&self) -> Option<&RoundSummary> {
        self.last_summary.as_ref()
    }

    /// Error text to show instead of a board.
    #[must_use]
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// Time on the session clock.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Face image for the card at `position` in the current round.
    pub fn face_source(&mut self, position: usize) -> Option<ImageSource> {
        let key = self.round.as_ref()?.state.card(position)?.key.clone();
        Some(self.placeholders.source_for(&key, &self.config.image_dir))
    }

    // === Input ===

    /// Queue a player event without handling it yet.
    pub fn enqueue(&mut self, event: SessionEvent) {
        self.queue.push_back(event);
    }

    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Handle every queued event in arrival order.
    pub fn process_queue(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Some(event) = self.queue.pop_front() {
            self.rearm_idle();
            self.handle(event, &mut notices);
        }
        notices
    }

    /// Queue `event` and handle the queue.
    pub fn dispatch(&mut self, event: SessionEvent) -> Vec<Notice> {
        self.enqueue(event);
        self.process_queue()
    }

    /// Let `elapsed` pass on the session clock, firing every wakeup that
    /// falls due in order.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Notice> {
        let target = self.scheduler.now() + elapsed;
        let mut notices = Vec::new();
        while let Some(wakeup) = self.scheduler.pop_due(target) {
            self.on_wakeup(wakeup, &mut notices);
        }
        self.scheduler.advance_to(target);
        notices
    }

    // === Event handling ===

    fn handle(&mut self, event: SessionEvent, notices: &mut Vec<Notice>) {
        tracing::debug!(?event, phase = ?self.phase, "handling event");
        match event {
            SessionEvent::StartRound | SessionEvent::Restart => self.start_round(notices),
            SessionEvent::ReturnHome => self.return_home(notices),
            SessionEvent::EndRound => {
                if self.phase == LifecyclePhase::Active {
                    self.finish(RoundOutcome::Abandoned, notices);
                }
            }
            SessionEvent::SelectDifficulty(difficulty) => {
                self.config.difficulty = difficulty;
                self.config.custom_grid = None;
                notices.push(Notice::DifficultyChanged(difficulty));
            }
            SessionEvent::SelectCard(position) => self.select_card(position, notices),
        }
    }

    fn on_wakeup(&mut self, wakeup: Wakeup, notices: &mut Vec<Notice>) {
        match wakeup {
            Wakeup::RoundTick { round } => self.tick(round, notices),
            Wakeup::HideMismatch { round } => {
                let Some(active) = self.round.as_mut().filter(|r| r.id == round) else {
                    return;
                };
                active.mismatch_timer = None;
                if let Some((first, second)) = active.state.hide_mismatch() {
                    notices.push(Notice::CardsHidden { first, second });
                }
            }
            Wakeup::IdleCheck => {
                self.idle_timer = None;
                if self.screen == Screen::End {
                    tracing::info!("idle on end screen, starting a new round");
                    notices.push(Notice::IdleRestart);
                    self.start_round(notices);
                }
            }
        }
    }

    fn start_round(&mut self, notices: &mut Vec<Notice>) {
        self.teardown_round();
        self.phase = LifecyclePhase::LoadingAssets;
        self.status_message = None;
        self.last_summary = None;
        self.set_screen(Screen::Round, notices);

        if let Err(err) = self.deal(notices) {
            tracing::error!(error = %err, "round could not be started");
            let message = err.to_string();
            self.status_message = Some(message.clone());
            notices.push(Notice::StartFailed { message });
            self.phase = LifecyclePhase::PreStart;
            self.set_screen(Screen::Start, notices);
        }
    }

    /// Resolve assets, build the deck and start the countdown.
    fn deal(&mut self, notices: &mut Vec<Notice>) -> Result<(), StartError> {
        let pool = self.resolver.resolve_pool(&self.config.images)?;
        notices.extend(
            pool.substituted
                .iter()
                .map(|image| Notice::AssetSubstituted { image: image.clone() }),
        );

        let profile = self.config.profile();
        let builder = DeckBuilder::for_profile(&profile)?;
        let mut round_rng = self.rng.fork();
        let deck = builder.build(&pool.keys, &mut round_rng);

        let id = RoundId::new(self.next_round);
        self.next_round += 1;

        let mut timer = RoundTimer::new(profile.time_budget_secs);
        timer.start();
        let tick_timer = self.scheduler.schedule_every(TICK_PERIOD, Wakeup::RoundTick { round: id });

        tracing::info!(
            round = %id,
            difficulty = ?self.config.active_difficulty(),
            columns = profile.columns,
            rows = profile.rows,
            pairs = builder.pair_count(),
            seed = round_rng.seed(),
            "round started"
        );
        notices.push(Notice::RoundStarted {
            round: id,
            pairs: builder.pair_count(),
            time_budget_secs: profile.time_budget_secs,
            seed: round_rng.seed(),
        });

        self.round = Some(ActiveRound {
            id,
            difficulty: self.config.active_difficulty(),
            grid: profile,
            state: RoundState::new(deck),
            timer,
            tick_timer: Some(tick_timer),
            mismatch_timer: None,
        });
        self.phase = LifecyclePhase::Active;
        Ok(())
    }

    fn select_card(&mut self, position: usize, notices: &mut Vec<Notice>) {
        if self.phase != LifecyclePhase::Active {
            tracing::debug!(position, phase = ?self.phase, "selection outside an active round");
            return;
        }
        let Some(active) = self.round.as_mut() else {
            return;
        };

        match active.state.select(position) {
            SelectOutcome::Ignored(reason) => {
                tracing::debug!(position, ?reason, "selection ignored");
                notices.push(Notice::SelectionIgnored { position, reason });
            }
            SelectOutcome::Revealed { position } => notices.push(Notice::CardRevealed { position }),
            SelectOutcome::Matched { first, second, pairs_found, complete, .. } => {
                notices.push(Notice::CardRevealed { position: second });
                notices.push(Notice::PairMatched {
                    first,
                    second,
                    pairs_found,
                    total_pairs: active.state.total_pairs(),
                });
                if complete {
                    self.finish(RoundOutcome::Won, notices);
                }
            }
            SelectOutcome::Mismatched { first, second } => {
                notices.push(Notice::CardRevealed { position: second });
                notices.push(Notice::Mismatch { first, second });
                let delay = self.config.mismatch_delay();
                active.mismatch_timer =
                    Some(self.scheduler.schedule_once(delay, Wakeup::HideMismatch { round: active.id }));
            }
        }
    }

    fn tick(&mut self, round: RoundId, notices: &mut Vec<Notice>) {
        if self.phase != LifecyclePhase::Active {
            return;
        }
        let Some(active) = self.round.as_mut().filter(|r| r.id == round) else {
            return;
        };

        match active.timer.tick() {
            Tick::Remaining(remaining_secs) => notices.push(Notice::TimerTick { remaining_secs }),
            Tick::Expired => {
                notices.push(Notice::TimerTick { remaining_secs: 0 });
                self.finish(RoundOutcome::TimeExpired, notices);
            }
            Tick::Inactive => {}
        }
    }

    fn finish(&mut self, outcome: RoundOutcome, notices: &mut Vec<Notice>) {
        self.cancel_round_timers();
        let Some(active) = self.round.as_ref() else {
            return;
        };

        let summary = RoundSummary {
            round: active.id,
            outcome,
            difficulty: active.difficulty,
            grid: active.grid,
            time_used_secs: active.timer.elapsed_secs(),
            pairs_found: active.state.pairs_found(),
            total_pairs: active.state.total_pairs(),
        };
        tracing::info!(
            round = %summary.round,
            ?outcome,
            time_used_secs = summary.time_used_secs,
            pairs_found = summary.pairs_found,
            total_pairs = summary.total_pairs,
            "round ended"
        );

        self.phase = LifecyclePhase::Ended;
        self.last_summary = Some(summary.clone());
        notices.push(Notice::RoundEnded(summary));
        self.set_screen(Screen::End, notices);
        self.rearm_idle();
    }

    fn return_home(&mut self, notices: &mut Vec<Notice>) {
        self.teardown_round();
        self.status_message = None;
        self.set_screen(Screen::Start, notices);
    }

    /// Stop everything scheduled for the current round and drop its board.
    fn teardown_round(&mut self) {
        self.cancel_round_timers();
        self.round = None;
        self.phase = LifecyclePhase::PreStart;
    }

    fn cancel_round_timers(&mut self) {
        let Some(active) = self.round.as_mut() else {
            return;
        };
        active.timer.cancel();
        for id in [active.tick_timer.take(), active.mismatch_timer.take()].into_iter().flatten() {
            self.scheduler.cancel(id);
        }
    }

    fn rearm_idle(&mut self) {
        if let Some(id) = self.idle_timer.take() {
            self.scheduler.cancel(id);
        }
        if let Some(timeout) = self.config.idle_timeout() {
            self.idle_timer = Some(self.scheduler.schedule_once(timeout, Wakeup::IdleCheck));
        }
    }

    fn set_screen(&mut self, screen: Screen, notices: &mut Vec<Notice>) {
        if self.screen != screen {
            self.screen = screen;
            notices.push(Notice::ScreenChanged(screen));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetManifest;
    use crate::cards::ImageKey;
    use crate::core::DifficultyProfile;

    fn manifest() -> AssetManifest {
        (1..=6).map(|i| format!("img{i}.png")).collect()
    }

    fn session(config: GameConfig) -> Session<AssetManifest> {
        Session::new(config.with_shuffle_seed(11), manifest()).unwrap()
    }

    fn positions_of(session: &Session<AssetManifest>, key: &ImageKey) -> Vec<usize> {
        session
            .round()
            .unwrap()
            .cards()
            .iter()
            .filter(|c| &c.key == key)
            .map(|c| c.position)
            .collect()
    }

    #[test]
    fn test_new_session_starts_on_start_screen() {
        let session = session(GameConfig::default());
        assert_eq!(session.phase(), LifecyclePhase::PreStart);
        assert_eq!(session.screen(), Screen::Start);
        assert!(session.round().is_none());
        assert_eq!(session.timer_display(), "Time: 60");
    }

    #[test]
    fn test_new_session_rejects_odd_grid() {
        let config = GameConfig::default().with_custom_grid(DifficultyProfile::new(3, 3, 30));
        let result = Session::new(config, manifest());
        assert!(matches!(result, Err(ConfigError::OddGrid { .. })));
    }

    #[test]
    fn test_start_round_deals_board() {
        let mut session = session(GameConfig::default().with_difficulty(Difficulty::Easy));
        let notices = session.dispatch(SessionEvent::StartRound);

        assert_eq!(session.phase(), LifecyclePhase::Active);
        assert_eq!(session.screen(), Screen::Round);
        assert!(notices.contains(&Notice::ScreenChanged(Screen::Round)));
        assert!(notices.iter().any(|n| matches!(
            n,
            Notice::RoundStarted { pairs: 6, time_budget_secs: 45, .. }
        )));

        let round = session.round().unwrap();
        assert_eq!(round.cards().len(), 12);
        assert_eq!(session.timer().unwrap().remaining_secs(), 45);
    }

    #[test]
    fn test_mismatch_hides_after_delay() {
        let mut session = session(GameConfig::default().with_difficulty(Difficulty::Easy));
        session.dispatch(SessionEvent::StartRound);

        let cards = session.round().unwrap().cards().to_vec();
        let second = cards.iter().position(|c| c.key != cards[0].key).unwrap();

        session.dispatch(SessionEvent::SelectCard(0));
        let notices = session.dispatch(SessionEvent::SelectCard(second));
        assert!(notices.contains(&Notice::Mismatch { first: 0, second }));
        assert!(session.round().unwrap().input_locked());

        let notices = session.advance(Duration::from_millis(949));
        assert!(notices.is_empty());
        assert!(session.round().unwrap().input_locked());

        let notices = session.advance(Duration::from_millis(1));
        assert_eq!(notices, vec![Notice::CardsHidden { first: 0, second }]);
        assert!(!session.round().unwrap().input_locked());
    }

    #[test]
    fn test_face_source() {
        let mut session = session(GameConfig::default().with_difficulty(Difficulty::Medium));
        session.dispatch(SessionEvent::StartRound);

        // Ten pairs from six images: four placeholders
        let placeholder = ImageKey::Placeholder(0);
        let position = positions_of(&session, &placeholder)[0];
        assert!(matches!(session.face_source(position), Some(ImageSource::InlineSvg(_))));

        let file = ImageKey::file("img1.png");
        let position = positions_of(&session, &file)[0];
        assert_eq!(
            session.face_source(position),
            Some(ImageSource::File(std::path::PathBuf::from("img/img1.png")))
        );
        assert_eq!(session.face_source(999), None);
    }

    #[test]
    fn test_difficulty_applies_to_next_round() {
        let mut session = session(GameConfig::default());
        session.dispatch(SessionEvent::StartRound);
        let notices = session.dispatch(SessionEvent::SelectDifficulty(Difficulty::Hard));

        assert_eq!(notices, vec![Notice::DifficultyChanged(Difficulty::Hard)]);
        assert_eq!(session.round().unwrap().total_pairs(), 10);
        assert_eq!(session.timer().unwrap().budget_secs(), 60);

        session.dispatch(SessionEvent::Restart);
        assert_eq!(session.round().unwrap().total_pairs(), 15);
        assert_eq!(session.timer().unwrap().budget_secs(), 90);
    }

    #[test]
    fn test_select_card_outside_round_is_dropped() {
        let mut session = session(GameConfig::default());
        let notices = session.dispatch(SessionEvent::SelectCard(0));
        assert!(notices.is_empty());
        assert_eq!(session.phase(), LifecyclePhase::PreStart);
    }
}

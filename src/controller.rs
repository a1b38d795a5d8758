//! Session state and screen flow
//!
//! The controller is the only writer of session state. It changes it in
//! response to two things: events coming out of a tick, and user intents
//! from the presentation layer. Everything runs on one thread, so these
//! are naturally serialized.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::economy::{UpgradeLevels, UpgradeTrack, upgrade_cost};
use crate::error::ConfigError;
use crate::frame_loop::{FrameLoop, LoopToken};
use crate::input::{Control, InputState};
use crate::sim::{FrameSnapshot, RunState, SimEvent, Simulation};

/// Which screen the presentation layer should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Menu,
    Playing,
    Shop,
    GameOver,
}

/// Requests coming from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Start,
    OpenShop,
    BuyUpgrade(UpgradeTrack),
    BackToMenu,
}

/// State that lives for the whole process (never written to disk)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Score of the current (or last) run
    pub score: u64,
    /// Spendable coins; carried across runs
    pub currency: u64,
    /// Best final score so far; never decreases
    pub high_score: u64,
    pub levels: UpgradeLevels,
    pub screen: Screen,
    /// Coins picked up during the current (or last) run
    pub coins_earned_last_run: u64,
    /// Runs started this session
    pub runs: u64,
}

/// Owns the session, the engine and the frame loop
#[derive(Debug)]
pub struct GameController {
    session: Session,
    sim: Simulation,
    input: InputState,
    frame_loop: FrameLoop,
    seed: u64,
}

impl GameController {
    /// Validate `config` and open a session on the menu screen.
    ///
    /// Runs are seeded from `seed` and the run index, so a whole session
    /// replays identically given the same inputs.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            log::error!("Rejected config: {err}");
            return Err(err);
        }
        log::info!("Session started with seed {seed}");
        Ok(Self {
            session: Session::default(),
            sim: Simulation::new(config),
            input: InputState::new(),
            frame_loop: FrameLoop::new(),
            seed,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn screen(&self) -> Screen {
        self.session.screen
    }

    pub fn config(&self) -> &GameConfig {
        self.sim.config()
    }

    /// Live run state (read-only)
    pub fn run_state(&self) -> &RunState {
        self.sim.state()
    }

    /// Whether the tick loop is currently held
    pub fn is_looping(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// Every screen change goes through here so that leaving Playing always
    /// releases the loop.
    fn set_screen(&mut self, screen: Screen) {
        if screen != Screen::Playing {
            self.frame_loop.release();
        }
        if self.session.screen != screen {
            log::debug!("Screen {:?} -> {:?}", self.session.screen, screen);
        }
        self.session.screen = screen;
    }

    /// Begin a fresh run and hand back the token for its frame loop
    pub fn start_game(&mut self) -> LoopToken {
        let run_seed = self
            .seed
            .wrapping_add(self.session.runs.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.sim.reset(self.session.levels, run_seed);
        self.input.clear();
        self.session.score = 0;
        self.session.coins_earned_last_run = 0;
        self.session.runs += 1;
        self.set_screen(Screen::Playing);
        log::info!(
            "Run {} started (wing {}, fuel {})",
            self.session.runs,
            self.session.levels.wing,
            self.session.levels.fuel
        );
        self.frame_loop.acquire()
    }

    /// Close out a run
    pub fn on_game_over(&mut self, final_score: u64) {
        self.set_screen(Screen::GameOver);
        if final_score > self.session.high_score {
            log::info!(
                "New high score: {} (was {})",
                final_score,
                self.session.high_score
            );
            self.session.high_score = final_score;
        }
    }

    pub fn open_shop(&mut self) {
        self.set_screen(Screen::Shop);
    }

    pub fn back_to_menu(&mut self) {
        self.set_screen(Screen::Menu);
    }

    /// Price of the next level on `track`
    pub fn upgrade_cost(&self, track: UpgradeTrack) -> u64 {
        upgrade_cost(self.config(), track, self.session.levels.level(track))
    }

    pub fn can_afford(&self, track: UpgradeTrack) -> bool {
        self.session.currency >= self.upgrade_cost(track)
    }

    /// Buy the next level on `track` if affordable.
    ///
    /// An unaffordable purchase leaves everything untouched; it is not an
    /// error. Returns whether the purchase went through.
    pub fn buy_upgrade(&mut self, track: UpgradeTrack) -> bool {
        let cost = self.upgrade_cost(track);
        if self.session.currency < cost {
            log::debug!(
                "Cannot afford {} upgrade: cost {} > {} coins",
                track.as_str(),
                cost,
                self.session.currency
            );
            return false;
        }
        self.session.currency -= cost;
        self.session.levels.increment(track);
        log::info!(
            "Bought {} level {} for {} coins ({} left)",
            track.as_str(),
            self.session.levels.level(track),
            cost,
            self.session.currency
        );
        true
    }

    /// Dispatch a presentation-layer intent. Starting returns the new loop token.
    pub fn handle(&mut self, intent: Intent) -> Option<LoopToken> {
        match intent {
            Intent::Start => return Some(self.start_game()),
            Intent::OpenShop => self.open_shop(),
            Intent::BuyUpgrade(track) => {
                self.buy_upgrade(track);
            }
            Intent::BackToMenu => self.back_to_menu(),
        }
        None
    }

    /// Key press; ignored unless a run is on screen
    pub fn key_down(&mut self, control: Control) {
        if self.session.screen == Screen::Playing {
            self.input.press(control);
        }
    }

    /// Key release; always honoured so nothing stays stuck down
    pub fn key_up(&mut self, control: Control) {
        self.input.release(control);
    }

    /// Run one tick and fold its events into the session.
    ///
    /// Returns `None` without ticking when no run is on screen.
    pub fn frame(&mut self) -> Option<FrameSnapshot> {
        if self.session.screen != Screen::Playing || !self.frame_loop.is_running() {
            return None;
        }

        let events = self.sim.tick(self.input.current());
        let mut game_over = None;
        for event in &events {
            match *event {
                SimEvent::ScoreIncrement => self.session.score += 1,
                SimEvent::CurrencyIncrement => {
                    self.session.currency += 1;
                    self.session.coins_earned_last_run += 1;
                }
                SimEvent::GameOver { final_score, .. } => game_over = Some(final_score),
            }
        }

        let snapshot = self.sim.snapshot(events);
        if let Some(final_score) = game_over {
            self.on_game_over(final_score);
        }
        Some(snapshot)
    }
}

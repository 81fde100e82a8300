//! Game state and core simulation types
//!
//! One `GameState` owns every entity of a session. Nothing here is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Ship life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipState {
    /// Normal flight, collides with asteroids
    Flying,
    /// Fresh spawn, blinking and immune to collisions
    Invulnerable { blinks_left: u32, blink_ticks: u32 },
    /// Hit by an asteroid, counting down to losing a life
    Exploding { ticks_left: u32 },
    /// Out of lives (game over)
    Dead,
}

/// A laser shot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LaserState {
    Flying,
    /// Explosion remnant: no longer collides, removed when the countdown ends
    Exploding { ticks_left: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Laser {
    pub pos: Vec2,
    /// Velocity (pixels per tick)
    pub vel: Vec2,
    /// Distance traveled so far (pixels)
    pub dist: f32,
    pub state: LaserState,
}

impl Laser {
    pub fn is_flying(&self) -> bool {
        self.state == LaserState::Flying
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub radius: f32,
    /// Heading (radians, 0 = right, π/2 = up the screen)
    pub heading: f32,
    /// Rotation applied this tick (radians per tick)
    pub rot: f32,
    /// Accumulated thrust velocity (pixels per tick)
    pub vel: Vec2,
    pub thrusting: bool,
    pub turning_left: bool,
    pub turning_right: bool,
    /// Cleared by a fire press, set again on release
    pub can_shoot: bool,
    /// Engine sound state from the previous tick
    pub engine_on: bool,
    pub state: ShipState,
    pub lasers: Vec<Laser>,
}

impl Ship {
    /// Fresh ship at the field center, invulnerable and blinking
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.field_width / 2.0, tuning.field_height / 2.0),
            radius: tuning.ship_radius(),
            heading: SHIP_START_HEADING,
            rot: 0.0,
            vel: Vec2::ZERO,
            thrusting: false,
            turning_left: false,
            turning_right: false,
            can_shoot: true,
            engine_on: false,
            state: ShipState::Invulnerable {
                blinks_left: tuning.blink_count(),
                blink_ticks: tuning.ticks(tuning.ship_blink_duration),
            },
            lasers: Vec::new(),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.state == ShipState::Dead
    }

    pub fn is_exploding(&self) -> bool {
        matches!(self.state, ShipState::Exploding { .. })
    }

    /// Collides with asteroids only in plain flight
    pub fn is_vulnerable(&self) -> bool {
        self.state == ShipState::Flying
    }

    /// Whether the ship should be drawn this tick (blinks while invulnerable)
    pub fn is_visible(&self) -> bool {
        match self.state {
            ShipState::Flying | ShipState::Exploding { .. } => true,
            ShipState::Invulnerable { blinks_left, .. } => blinks_left % 2 == 0,
            ShipState::Dead => false,
        }
    }

    /// Laser spawn point
    pub fn nose(&self) -> Vec2 {
        self.pos + crate::heading_vector(self.heading) * self.radius * SHIP_NOSE_FACTOR
    }
}

/// Asteroid size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsteroidTier {
    Large,
    Medium,
    Small,
}

impl AsteroidTier {
    /// Radius from the large diameter by successive halving
    pub fn radius(&self, tuning: &Tuning) -> f32 {
        match self {
            AsteroidTier::Large => tuning.roid_size / 2.0,
            AsteroidTier::Medium => (tuning.roid_size / 4.0).ceil(),
            AsteroidTier::Small => (tuning.roid_size / 8.0).ceil(),
        }
    }

    pub fn points(&self, tuning: &Tuning) -> u64 {
        match self {
            AsteroidTier::Large => tuning.roid_points_large,
            AsteroidTier::Medium => tuning.roid_points_medium,
            AsteroidTier::Small => tuning.roid_points_small,
        }
    }

    /// Tier of the two children left behind, if any
    pub fn next(&self) -> Option<AsteroidTier> {
        match self {
            AsteroidTier::Large => Some(AsteroidTier::Medium),
            AsteroidTier::Medium => Some(AsteroidTier::Small),
            AsteroidTier::Small => None,
        }
    }
}

/// A drifting asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    /// Velocity (pixels per tick)
    pub vel: Vec2,
    pub radius: f32,
    pub tier: AsteroidTier,
    pub heading: f32,
    /// Per-vertex radius multipliers, fixed for the asteroid's lifetime
    pub offsets: Vec<f32>,
}

/// Center-screen text that fades out (level intro, game over)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    pub text: String,
    pub ticks_left: u32,
    pub total_ticks: u32,
}

impl Caption {
    pub fn new(text: impl Into<String>, total_ticks: u32) -> Self {
        Self {
            text: text.into(),
            ticks_left: total_ticks,
            total_ticks: total_ticks.max(1),
        }
    }

    /// 1.0 when shown, fading to 0.0
    pub fn opacity(&self) -> f32 {
        self.ticks_left as f32 / self.total_ticks as f32
    }
}

/// Music beat timing; beats speed up as the field empties
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeatPacer {
    /// Ticks until the next beat
    pub beat_ticks: u32,
    /// Next beat plays the low tone
    pub low: bool,
}

/// Discrete events for audio and persistence collaborators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LaserFired,
    AsteroidHit { tier: AsteroidTier },
    ShipExploded,
    ThrustStarted,
    ThrustStopped,
    MusicBeat { high: bool },
    LevelStarted { level: u32 },
    LifeLost { lives_left: u8 },
    GameOver { score: u64 },
    /// Score beat the high score; persist it
    HighScore { score: u64 },
    /// A new game began; reload the stored high score
    NewGame,
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Current level (0-based)
    pub level: u32,
    pub score: u64,
    pub high_score: u64,
    pub lives: u8,
    /// Asteroids still to destroy this level, counting future children
    pub roids_left: u32,
    pub roids_total: u32,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub caption: Option<Caption>,
    pub music: BeatPacer,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session and start its first game
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let mut state = Self::empty(tuning, seed);
        super::tick::new_game(&mut state);
        state
    }

    /// Session with a ship but no asteroids or caption; useful for staging scenarios
    pub fn empty(tuning: Tuning, seed: u64) -> Self {
        let ship = Ship::new(&tuning);
        let lives = tuning.starting_lives;
        Self {
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: 0,
            score: 0,
            high_score: 0,
            lives,
            roids_left: 0,
            roids_total: 0,
            ship,
            asteroids: Vec::new(),
            caption: None,
            music: BeatPacer::default(),
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.ship.is_dead()
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Add points and raise the high score when beaten
    pub fn add_score(&mut self, points: u64) {
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
            // Collapse to one persistence request per batch of points
            self.events
                .retain(|e| !matches!(e, GameEvent::HighScore { .. }));
            self.events.push(GameEvent::HighScore { score: self.score });
        }
    }

    /// Remaining-asteroid ratio used for music tempo (1.0 when nothing is tracked)
    pub fn roid_ratio(&self) -> f32 {
        if self.roids_left == 0 || self.roids_total == 0 {
            1.0
        } else {
            self.roids_left as f32 / self.roids_total as f32
        }
    }
}

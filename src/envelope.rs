//! Attack-decay-sustain-release envelope.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stage {
    #[default]
    Idle,
    Attack,
    Decay,
    Sustain,
    Release,
}

/// ADSR envelope producing a level in `[0, 1]`.
///
/// Durations are in seconds. A zero duration completes its stage on the next
/// [`Envelope::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    attack: f32,
    decay: f32,
    sustain: f32,
    release: f32,
    stage: Stage,
    level: f32,
    release_rate: f32,
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new(0.1, 0.1, 0.8, 0.2)
    }
}

impl Envelope {
    /// Negative durations are treated as zero and `sustain` is clamped to `[0, 1]`.
    pub fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack: attack.max(0.0),
            decay: decay.max(0.0),
            sustain: sustain.clamp(0.0, 1.0),
            release: release.max(0.0),
            stage: Stage::Idle,
            level: 0.0,
            release_rate: 0.0,
        }
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn sustain(&self) -> f32 {
        self.sustain
    }

    pub fn is_active(&self) -> bool {
        self.stage != Stage::Idle
    }

    /// Start the attack from the current level.
    pub fn trigger(&mut self) {
        self.stage = Stage::Attack;
    }

    /// Fade out from the current level. Ignored while idle.
    pub fn release(&mut self) {
        if self.stage == Stage::Idle {
            return;
        }

        self.release_rate = if self.release > 0.0 {
            self.level / self.release
        } else {
            0.0
        };
        self.stage = Stage::Release;
    }

    /// Advance by `dt` seconds and return the new level.
    pub fn update(&mut self, dt: f32) -> f32 {
        match self.stage {
            Stage::Idle => {}
            Stage::Attack => {
                if self.attack > 0.0 {
                    self.level += dt / self.attack;
                }
                if self.attack <= 0.0 || self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = Stage::Decay;
                }
            }
            Stage::Decay => {
                if self.decay > 0.0 {
                    self.level -= (1.0 - self.sustain) * dt / self.decay;
                }
                if self.decay <= 0.0 || self.level <= self.sustain {
                    self.level = self.sustain;
                    self.stage = Stage::Sustain;
                }
            }
            Stage::Sustain => self.level = self.sustain,
            Stage::Release => {
                self.level -= self.release_rate * dt;
                if self.release <= 0.0 || self.level <= 0.0 {
                    self.level = 0.0;
                    self.stage = Stage::Idle;
                }
            }
        }

        self.level = self.level.clamp(0.0, 1.0);
        self.level
    }
}

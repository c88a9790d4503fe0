//! Short-lived visual particles (sparkles, sleepy Zs).
//!
//! The effect system is advanced by the same per-frame `dt` as the quests
//! and pruned as particles expire. Renderers read [`EffectSystem::particles`]
//! and draw each one with [`Particle::alpha`] as its opacity.
//!
//! Cosmetic randomness (jitter, spawn chances) comes from the system's own
//! generator so it never consumes gameplay draws.

use crate::core::constants::{SPARKLE_JITTER, SPARKLE_LIFE_RANGE, ZZZ_LIFE_SECONDS, ZZZ_RISE_SPEED};
use crate::core::geometry::Vec2;
use crate::core::rng::{GameRng, QuestRng};

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const GOLD: Rgb = Rgb(255, 220, 80);
    pub const GREEN: Rgb = Rgb(50, 255, 100);
    pub const ROSE: Rgb = Rgb(255, 150, 150);
    pub const LILAC: Rgb = Rgb(255, 200, 255);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

/// How a particle is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleVisual {
    Dot(Rgb),
    Glyph(char),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Pixels per second.
    pub velocity: Vec2,
    pub remaining_life: f64,
    pub total_life: f64,
    pub visual: ParticleVisual,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, life: f64, visual: ParticleVisual) -> Self {
        Self {
            position,
            velocity,
            remaining_life: life,
            total_life: life,
            visual,
        }
    }

    /// Fades linearly from 1.0 at spawn to 0.0 at expiry.
    pub fn alpha(&self) -> f64 {
        if self.total_life <= 0.0 {
            return 0.0;
        }
        (self.remaining_life / self.total_life).clamp(0.0, 1.0)
    }

    pub fn is_alive(&self) -> bool {
        self.remaining_life > 0.0
    }

    fn advance(&mut self, dt: f64) {
        self.remaining_life -= dt;
        self.position = self.position + self.velocity * dt;
    }
}

/// Owns every live particle.
#[derive(Debug, Clone)]
pub struct EffectSystem {
    particles: Vec<Particle>,
    rng: GameRng,
}

impl Default for EffectSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectSystem {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            rng: GameRng::from_entropy(),
        }
    }

    /// Deterministic jitter, for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: GameRng::seeded(seed),
        }
    }

    pub fn spawn(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Burst of `count` colored dots around `center`, flying upward.
    pub fn sparkles(&mut self, center: Vec2, count: usize, color: Rgb) {
        for _ in 0..count {
            let offset = Vec2::new(
                self.rng.draw_range(-SPARKLE_JITTER, SPARKLE_JITTER),
                self.rng.draw_range(-SPARKLE_JITTER, SPARKLE_JITTER),
            );
            let velocity = Vec2::new(
                self.rng.draw_range(-50.0, 50.0),
                self.rng.draw_range(-100.0, -50.0),
            );
            let life = self
                .rng
                .draw_range(SPARKLE_LIFE_RANGE.0, SPARKLE_LIFE_RANGE.1);
            self.spawn(Particle::new(
                center + offset,
                velocity,
                life,
                ParticleVisual::Dot(color),
            ));
        }
    }

    /// With probability `chance`, release a drifting `Z` at `at`.
    /// Returns whether one was spawned.
    pub fn maybe_zzz(&mut self, at: Vec2, chance: f64) -> bool {
        if !self.rng.chance(chance) {
            return false;
        }
        let velocity = Vec2::new(self.rng.draw_range(-10.0, 10.0), -ZZZ_RISE_SPEED);
        self.spawn(Particle::new(
            at,
            velocity,
            ZZZ_LIFE_SECONDS,
            ParticleVisual::Glyph('Z'),
        ));
        true
    }

    /// Cosmetic coin flip that leaves gameplay randomness untouched.
    pub fn roll(&mut self, chance: f64) -> bool {
        self.rng.chance(chance)
    }

    /// Move every particle and drop the expired ones.
    pub fn tick(&mut self, dt: f64) {
        self.particles.retain_mut(|p| {
            p.advance(dt);
            p.is_alive()
        });
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

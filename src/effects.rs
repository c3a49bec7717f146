//! Cosmetic effects driven by `GameEvent`s
//!
//! Score popups, particle bursts and screen shake. None of this feeds back
//! into gameplay; it only tells a renderer what to draw and where.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{POPUP_DURATION_FRAMES, POPUP_SPEED, REFERENCE_FPS};
use crate::sim::{GameEvent, Rgb};

/// Floating score text
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub pos: Vec2,
    pub text: String,
    pub color: Rgb,
    /// Seconds since creation
    pub age: f32,
}

impl Popup {
    pub fn lifetime() -> f32 {
        POPUP_DURATION_FRAMES / REFERENCE_FPS
    }

    /// Opacity 1.0 → 0.0 over the popup's life
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age / Self::lifetime()).clamp(0.0, 1.0)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per reference frame
    pub vel: Vec2,
    pub size: f32,
    pub color: Rgb,
    /// Seconds the particle lives
    pub lifetime: f32,
    pub age: f32,
}

impl Particle {
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age / self.lifetime).clamp(0.0, 1.0)
    }
}

/// Live cosmetic effects
#[derive(Debug, Clone)]
pub struct Effects {
    rng: Pcg32,
    popups: Vec<Popup>,
    particles: Vec<Particle>,
    shake_timer: f32,
    shake_intensity: f32,
    shake_offset: Vec2,
}

impl Effects {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            popups: Vec::new(),
            particles: Vec::new(),
            shake_timer: 0.0,
            shake_intensity: 0.0,
            shake_offset: Vec2::ZERO,
        }
    }

    /// Start whatever the event asks for; sound events are ignored here
    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Sound(_) => {}
            GameEvent::ParticleBurst { pos, color, count } => {
                for _ in 0..*count {
                    let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
                    let speed = self.rng.random_range(1.0..4.0);
                    self.particles.push(Particle {
                        pos: *pos,
                        vel: Vec2::from_angle(angle) * speed,
                        size: self.rng.random_range(2.0..5.0),
                        color: *color,
                        lifetime: self.rng.random_range(0.3..0.7),
                        age: 0.0,
                    });
                }
            }
            GameEvent::ScorePopup { pos, text, color } => self.popups.push(Popup {
                pos: *pos,
                text: text.clone(),
                color: *color,
                age: 0.0,
            }),
            GameEvent::ScreenShake {
                duration,
                intensity,
            } => {
                self.shake_timer = *duration;
                self.shake_intensity = *intensity;
            }
        }
    }

    /// Age everything by `dt` seconds and drop what has expired
    pub fn update(&mut self, dt: f32) {
        let frames = dt * REFERENCE_FPS;

        for popup in &mut self.popups {
            popup.age += dt;
            popup.pos.y -= POPUP_SPEED * frames;
        }
        self.popups.retain(|p| p.age < Popup::lifetime());

        for particle in &mut self.particles {
            particle.age += dt;
            particle.pos += particle.vel * frames;
        }
        self.particles.retain(|p| p.age < p.lifetime);

        if self.shake_timer > 0.0 {
            self.shake_timer -= dt;
        }
        self.shake_offset = if self.shake_timer > 0.0 {
            let intensity = self.shake_intensity as i32;
            Vec2::new(
                self.rng.random_range(-intensity..=intensity) as f32,
                self.rng.random_range(-intensity..=intensity) as f32,
            )
        } else {
            self.shake_timer = 0.0;
            Vec2::ZERO
        };
    }

    /// Drop everything (new round)
    pub fn clear(&mut self) {
        self.popups.clear();
        self.particles.clear();
        self.shake_timer = 0.0;
        self.shake_offset = Vec2::ZERO;
    }

    pub fn popups(&self) -> &[Popup] {
        &self.popups
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Offset to draw the whole frame at
    pub fn shake_offset(&self) -> Vec2 {
        self.shake_offset
    }

    pub fn is_shaking(&self) -> bool {
        self.shake_timer > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GREEN, YELLOW};

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_popup_rises_and_expires() {
        let mut effects = Effects::new(1);
        effects.apply(&GameEvent::ScorePopup {
            pos: Vec2::new(100.0, 100.0),
            text: "+1".into(),
            color: YELLOW,
        });
        effects.update(DT);
        let popup = &effects.popups()[0];
        assert!(popup.pos.y < 100.0);
        assert!(popup.alpha() < 1.0);

        for _ in 0..40 {
            effects.update(DT);
        }
        assert!(effects.popups().is_empty());
    }

    #[test]
    fn test_particle_burst() {
        let mut effects = Effects::new(2);
        effects.apply(&GameEvent::ParticleBurst {
            pos: Vec2::new(50.0, 50.0),
            color: GREEN,
            count: 5,
        });
        assert_eq!(effects.particles().len(), 5);
        for p in effects.particles() {
            assert!(p.size >= 2.0 && p.size < 5.0);
            assert!(p.lifetime >= 0.3 && p.lifetime < 0.7);
        }
        // Longest lifetime is under 0.7s
        for _ in 0..45 {
            effects.update(DT);
        }
        assert!(effects.particles().is_empty());
    }

    #[test]
    fn test_shake_bounded_and_stops() {
        let mut effects = Effects::new(3);
        effects.apply(&GameEvent::ScreenShake {
            duration: 0.1,
            intensity: 3.0,
        });
        effects.update(DT);
        assert!(effects.is_shaking());
        let offset = effects.shake_offset();
        assert!(offset.x.abs() <= 3.0 && offset.y.abs() <= 3.0);

        for _ in 0..10 {
            effects.update(DT);
        }
        assert!(!effects.is_shaking());
        assert_eq!(effects.shake_offset(), Vec2::ZERO);
    }

    #[test]
    fn test_sound_ignored_and_clear() {
        let mut effects = Effects::new(4);
        effects.apply(&GameEvent::Sound(crate::sim::SoundEffect::Hit));
        assert!(effects.popups().is_empty() && effects.particles().is_empty());

        effects.apply(&GameEvent::ParticleBurst {
            pos: Vec2::ZERO,
            color: GREEN,
            count: 3,
        });
        effects.clear();
        assert!(effects.particles().is_empty());
    }
}

use rand::Rng;
use rand_distr::Distribution;
use rand_distr::Uniform;
use serde::{Deserialize, Serialize};

use crate::draw::Viewport;
use crate::error::{Error, Result};
use crate::particle::{Particle, ParticleOptions};
use crate::shape::ShapeKind;
use crate::{THEME_ACCENT, VIEW_SIZE};

/// How fast newly spawned particles move away from the spawn origin, in units per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Speed {
    Constant(f32),
    /// `base` plus a uniformly random bonus in `[0, bonus]`.
    Jittered { base: f32, bonus: f32 },
}

impl Speed {
    /// Checks the speed and builds the distribution it describes.
    pub fn distribution(&self) -> Result<SpeedDistr> {
        self.validate()?;
        Ok(match *self {
            Speed::Constant(speed) => SpeedDistr::Constant(speed),
            Speed::Jittered { base, bonus } => SpeedDistr::Jittered {
                base,
                bonus: Uniform::new_inclusive(0.0, bonus),
            },
        })
    }

    fn validate(&self) -> Result<()> {
        let ok = match *self {
            Speed::Constant(speed) => speed.is_finite() && speed >= 0.0,
            Speed::Jittered { base, bonus } => {
                base.is_finite() && bonus.is_finite() && base >= 0.0 && bonus >= 0.0
            }
        };
        if ok {
            Ok(())
        } else {
            Err(Error::invalid(format!(
                "speed must be finite and >= 0, got {:?}",
                self
            )))
        }
    }
}

/// A validated [`Speed`], ready to sample from.
#[derive(Debug, Clone, Copy)]
pub enum SpeedDistr {
    Constant(f32),
    Jittered { base: f32, bonus: Uniform<f32> },
}

impl Distribution<f32> for SpeedDistr {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        match self {
            SpeedDistr::Constant(speed) => *speed,
            SpeedDistr::Jittered { base, bonus } => base + bonus.sample(rng),
        }
    }
}

/// What to do when spawning would take a field past its particle cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overflow {
    /// Remove the oldest particles to make room.
    EvictOldest,
    /// Only spawn as many as still fit.
    Throttle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Particles spawned on each tick the pointer is held.
    pub spawn_per_tick: usize,
    pub shape: ShapeKind,
    /// Template for every spawned particle. Position is ignored.
    pub particle: ParticleOptions,
    pub speed: Speed,

    pub max_particles: Option<usize>,
    pub overflow: Overflow,

    /// Particles outside this area are still simulated, but not drawn.
    pub cull: Option<Viewport>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings::classic()
    }
}

impl Settings {
    /// Two accent-colored discs per tick, flying out at unit speed for a second.
    pub fn classic() -> Settings {
        Settings {
            spawn_per_tick: 2,
            shape: ShapeKind::Disc,
            particle: ParticleOptions {
                fill: Some(THEME_ACCENT),
                ..Default::default()
            },
            speed: Speed::Constant(1.0),
            max_particles: None,
            overflow: Overflow::EvictOldest,
            cull: Some(Viewport::new(VIEW_SIZE, VIEW_SIZE)),
        }
    }

    pub fn sparkler() -> Settings {
        Settings {
            spawn_per_tick: 3,
            shape: ShapeKind::Star,
            particle: ParticleOptions {
                fill: Some(0xffd27a),
                radius: Some(6.0),
                inner_ratio: Some(0.4),
                life: Some(45.0),
                spin: Some(0.1),
                ..Default::default()
            },
            speed: Speed::Jittered {
                base: 0.5,
                bonus: 2.0,
            },
            ..Settings::classic()
        }
    }

    pub fn confetti() -> Settings {
        Settings {
            spawn_per_tick: 4,
            shape: ShapeKind::Box,
            particle: ParticleOptions {
                fill: Some(0xee4477),
                width: Some(8.0),
                height: Some(4.0),
                life: Some(90.0),
                ..Default::default()
            },
            speed: Speed::Jittered {
                base: 1.0,
                bonus: 1.0,
            },
            ..Settings::classic()
        }
    }

    /// [`Settings::classic`], but never keeping more than 500 particles alive.
    pub fn capped() -> Settings {
        Settings {
            max_particles: Some(500),
            overflow: Overflow::EvictOldest,
            ..Settings::classic()
        }
    }

    /// Checks everything a [`crate::ParticleField`] would, including the particle template.
    pub fn validate(&self) -> Result<()> {
        self.speed.validate()?;
        Particle::new(&self.particle, self.shape)?;
        if self.max_particles == Some(0) {
            return Err(Error::invalid("max_particles must be at least 1"));
        }
        if let Some(view) = self.cull {
            if !(view.width.is_finite() && view.height.is_finite()) {
                return Err(Error::invalid("cull viewport must be finite"));
            }
        }
        Ok(())
    }

    pub fn to_cbor(&self) -> Result<Vec<u8>> {
        Ok(serde_cbor::to_vec(self)?)
    }

    pub fn from_cbor(bytes: &[u8]) -> Result<Settings> {
        let settings: Settings = serde_cbor::from_slice(bytes)?;
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn presets_are_valid() {
        for settings in [
            Settings::classic(),
            Settings::sparkler(),
            Settings::confetti(),
            Settings::capped(),
        ] {
            settings.validate().unwrap();
        }
    }

    #[test]
    fn jittered_speed_stays_in_range() {
        let mut rng = StdRng::from_seed([5; 32]);
        let speed = Speed::Jittered {
            base: 1.0,
            bonus: 2.0,
        }
        .distribution()
        .unwrap();
        for _ in 0..1000 {
            let s = speed.sample(&mut rng);
            assert!((1.0..=3.0).contains(&s));
        }
        let constant = Speed::Constant(1.5).distribution().unwrap();
        assert_eq!(constant.sample(&mut rng), 1.5);
    }

    #[test]
    fn bad_jitter_is_an_error_not_a_panic() {
        for bonus in [-1.0, f32::NAN, f32::INFINITY] {
            let speed = Speed::Jittered { base: 1.0, bonus };
            assert!(matches!(
                speed.distribution(),
                Err(Error::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn decoding_rejects_an_unusable_particle_template() {
        let mut settings = Settings::classic();
        settings.particle.life = Some(0.0);
        assert!(settings.validate().is_err());

        let bytes = settings.to_cbor().unwrap();
        assert!(matches!(
            Settings::from_cbor(&bytes),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn rejects_zero_cap_and_negative_speed() {
        let capped = Settings {
            max_particles: Some(0),
            ..Settings::classic()
        };
        assert!(capped.validate().is_err());

        let backwards = Settings {
            speed: Speed::Constant(-1.0),
            ..Settings::classic()
        };
        assert!(backwards.validate().is_err());
    }

    #[test]
    fn cbor_keeps_settings_intact() {
        let settings = Settings::sparkler();
        let bytes = settings.to_cbor().unwrap();
        assert_eq!(Settings::from_cbor(&bytes).unwrap(), settings);
    }

    #[test]
    fn cbor_garbage_is_an_encoding_error() {
        assert!(matches!(
            Settings::from_cbor(&[0xff, 0x00, 0x13]),
            Err(Error::Encoding(_))
        ));
    }
}

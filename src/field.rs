use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_distr::Distribution;
use rand_distr::Uniform;
use tracing::debug;
use tracing::trace;
use tracing::warn;

use crate::draw::Canvas;
use crate::error::Result;
use crate::input::SpawnRequest;
use crate::particle::{sanitize_delta, Particle, ParticleOptions};
use crate::settings::{Overflow, Settings, SpeedDistr};
use crate::shape::ShapeKind;

/// What happened during a single [`ParticleField::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: usize,
    pub drawn: usize,
    pub expired: usize,
    /// Particles still alive once the tick finished.
    pub live: usize,
}

/// An ordered collection of live particles. Later particles are drawn on top.
pub struct ParticleField {
    settings: Settings,
    /// Every spawned particle starts as a copy of this.
    prototype: Particle,
    speed: SpeedDistr,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new(settings: Settings) -> Result<Self> {
        settings.validate()?;
        let prototype = Particle::new(&settings.particle, settings.shape)?;
        let speed = settings.speed.distribution()?;

        debug!(
            shape = ?settings.shape,
            spawn_per_tick = settings.spawn_per_tick,
            max_particles = ?settings.max_particles,
            "created particle field"
        );

        Ok(Self {
            settings,
            prototype,
            speed,
            particles: Vec::new(),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
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

    pub fn shape(&self) -> ShapeKind {
        self.settings.shape
    }

    /// Changes the shape of particles spawned from now on. Live particles keep theirs.
    pub fn set_shape(&mut self, shape: ShapeKind) -> Result<()> {
        let prototype = Particle::new(&self.settings.particle, shape)?;
        self.settings.shape = shape;
        self.prototype = prototype;
        debug!(?shape, "switched particle shape");
        Ok(())
    }

    /// Spawns `count` particles at `origin`, flying out in uniformly random directions.
    ///
    /// Returns how many were actually spawned, which can be fewer than `count` if the field is
    /// capped and throttling.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        origin: Vec2,
        count: usize,
        fill: Option<u32>,
        rng: &mut R,
    ) -> usize {
        let mut prototype = self.prototype.clone();
        prototype.position = origin;
        if let Some(fill) = fill {
            prototype.fill = fill;
        }
        self.spawn_from(prototype, count, rng)
    }

    /// Like [`ParticleField::spawn`], but builds the particles from `options` instead of the
    /// field's settings.
    pub fn spawn_with<R: Rng + ?Sized>(
        &mut self,
        options: &ParticleOptions,
        origin: Vec2,
        count: usize,
        rng: &mut R,
    ) -> Result<usize> {
        let mut prototype = Particle::new(options, self.settings.shape)?;
        prototype.position = origin;
        Ok(self.spawn_from(prototype, count, rng))
    }

    fn spawn_from<R: Rng + ?Sized>(
        &mut self,
        prototype: Particle,
        count: usize,
        rng: &mut R,
    ) -> usize {
        let count = self.make_room(count);
        let angles = Uniform::new(0.0, TAU);

        self.particles.reserve(count);
        for _ in 0..count {
            let angle: f32 = angles.sample(rng);
            let speed = self.speed.sample(rng);

            let mut particle = prototype.clone();
            particle.velocity = Vec2::new(angle.cos(), angle.sin()) * speed;
            self.particles.push(particle);
        }

        trace!(count, origin = ?prototype.position, "spawned particles");
        count
    }

    /// Applies the cap policy, returning how many of `count` new particles may be added.
    fn make_room(&mut self, count: usize) -> usize {
        let max = match self.settings.max_particles {
            Some(max) => max,
            None => return count,
        };

        match self.settings.overflow {
            Overflow::Throttle => count.min(max.saturating_sub(self.particles.len())),
            Overflow::EvictOldest => {
                let count = count.min(max);
                let excess = (self.particles.len() + count).saturating_sub(max);
                if excess > 0 {
                    self.particles.drain(..excess);
                    trace!(excess, "evicted oldest particles");
                }
                count
            }
        }
    }

    /// Runs one frame: spawns if requested, then updates and draws every particle, then removes
    /// the ones that expired.
    ///
    /// Particles spawned this tick are updated this tick too. Expired particles are only removed
    /// once every particle has been drawn.
    ///
    /// A negative or non-finite `delta` is treated as 0, so no particle ages that tick.
    pub fn tick<C, R>(
        &mut self,
        delta: f32,
        request: SpawnRequest,
        canvas: &mut C,
        rng: &mut R,
    ) -> TickReport
    where
        C: Canvas + ?Sized,
        R: Rng + ?Sized,
    {
        let mut report = TickReport::default();

        let delta = {
            let sanitized = sanitize_delta(delta);
            if sanitized != delta {
                warn!(delta, "ignoring invalid frame delta");
            }
            sanitized
        };

        if request.active {
            report.spawned = self.spawn(request.origin(), self.settings.spawn_per_tick, None, rng);
        }

        let cull = self.settings.cull;
        for particle in self.particles.iter_mut() {
            if particle.update(delta) {
                report.expired += 1;
            }
            if particle.render(&mut *canvas, cull) {
                report.drawn += 1;
            }
        }

        if report.expired > 0 {
            self.particles.retain(|p| !p.is_expired());
        }

        report.live = self.particles.len();
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::DrawList;
    use glam::vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::from_seed([5; 32])
    }

    #[test]
    fn spawn_adds_exactly_count_at_full_life() {
        let mut rng = rng();
        let mut field = ParticleField::new(Settings::classic()).unwrap();
        assert_eq!(field.spawn(vec2(1.0, 2.0), 7, None, &mut rng), 7);
        assert_eq!(field.len(), 7);
        for p in field.particles() {
            assert_eq!(p.life(), p.max_life());
            assert_eq!(p.position, vec2(1.0, 2.0));
            assert!((p.velocity.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn fill_override_and_default_accent() {
        let mut rng = rng();
        let mut field = ParticleField::new(Settings::classic()).unwrap();
        field.spawn(Vec2::ZERO, 1, None, &mut rng);
        field.spawn(Vec2::ZERO, 1, Some(0xff0000), &mut rng);
        assert_eq!(field.particles()[0].fill, crate::THEME_ACCENT);
        assert_eq!(field.particles()[1].fill, 0xff0000);
    }

    #[test]
    fn invalid_settings_fail_up_front() {
        let mut settings = Settings::classic();
        settings.particle.life = Some(0.0);
        assert!(ParticleField::new(settings).is_err());
    }

    #[test]
    fn spawn_with_reports_bad_options() {
        let mut rng = rng();
        let mut field = ParticleField::new(Settings::classic()).unwrap();
        let options = ParticleOptions {
            radius: Some(-2.0),
            ..Default::default()
        };
        assert!(field.spawn_with(&options, Vec2::ZERO, 3, &mut rng).is_err());
        assert!(field.is_empty());
    }

    #[test]
    fn throttle_stops_at_cap() {
        let mut rng = rng();
        let settings = Settings {
            max_particles: Some(5),
            overflow: Overflow::Throttle,
            ..Settings::classic()
        };
        let mut field = ParticleField::new(settings).unwrap();
        assert_eq!(field.spawn(Vec2::ZERO, 3, Some(1), &mut rng), 3);
        assert_eq!(field.spawn(Vec2::ZERO, 3, Some(2), &mut rng), 2);
        assert_eq!(field.spawn(Vec2::ZERO, 3, Some(3), &mut rng), 0);
        assert_eq!(field.len(), 5);
    }

    #[test]
    fn eviction_drops_the_oldest() {
        let mut rng = rng();
        let settings = Settings {
            max_particles: Some(4),
            overflow: Overflow::EvictOldest,
            ..Settings::classic()
        };
        let mut field = ParticleField::new(settings).unwrap();
        field.spawn(Vec2::ZERO, 3, Some(1), &mut rng);
        assert_eq!(field.spawn(Vec2::ZERO, 3, Some(2), &mut rng), 3);
        let fills: Vec<_> = field.particles().iter().map(|p| p.fill).collect();
        assert_eq!(fills, [1, 2, 2, 2]);

        // Asking for more than the cap only keeps the newest that fit.
        assert_eq!(field.spawn(Vec2::ZERO, 10, Some(3), &mut rng), 4);
        assert!(field.particles().iter().all(|p| p.fill == 3));
    }

    #[test]
    fn set_shape_only_affects_new_particles() {
        let mut rng = rng();
        let mut field = ParticleField::new(Settings::classic()).unwrap();
        field.spawn(Vec2::ZERO, 1, None, &mut rng);
        field.set_shape(ShapeKind::Star).unwrap();
        field.spawn(Vec2::ZERO, 1, None, &mut rng);
        assert_eq!(field.particles()[0].shape.kind(), ShapeKind::Disc);
        assert_eq!(field.particles()[1].shape.kind(), ShapeKind::Star);
    }

    #[test]
    fn invalid_deltas_freeze_life_instead_of_corrupting_it() {
        let mut rng = rng();
        let mut settings = Settings::classic();
        settings.particle.life = Some(5.0);
        let mut field = ParticleField::new(settings).unwrap();

        field.tick(f32::NAN, SpawnRequest::at(10.0, 10.0), &mut (), &mut rng);
        field.tick(-3.0, SpawnRequest::IDLE, &mut (), &mut rng);
        for p in field.particles() {
            assert_eq!(p.life(), 5.0);
            assert!(p.alpha() <= 1.0);
        }

        for _ in 0..100 {
            field.tick(1.0, SpawnRequest::IDLE, &mut (), &mut rng);
        }
        assert!(field.is_empty());
    }

    #[test]
    fn tick_reports_counts() {
        let mut rng = rng();
        let mut canvas = DrawList::new();
        let settings = Settings {
            cull: None,
            ..Settings::classic()
        };
        let mut field = ParticleField::new(settings).unwrap();
        let report = field.tick(1.0, SpawnRequest::at(10.0, 10.0), &mut canvas, &mut rng);
        assert_eq!(
            report,
            TickReport {
                spawned: 2,
                drawn: 2,
                expired: 0,
                live: 2,
            }
        );
        assert_eq!(canvas.len(), 2);
    }
}

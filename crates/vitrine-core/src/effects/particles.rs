//! Particle field behind the hero section

use rand::Rng;

use crate::config::ParticleConfig;

use super::Point;

/// Drawing area in CSS pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Point,
    /// Displacement per frame
    pub velocity: Point,
    /// Radius
    pub size: f64,
    pub opacity: f64,
}

/// Pair of particles close enough to be joined by a line
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    /// Line alpha, fading to zero at the link distance
    pub alpha: f64,
}

/// Fixed-size set of drifting particles
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Bounds,
    link_distance: f64,
}

fn sample(rng: &mut impl Rng, min: f64, max: f64) -> f64 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

impl ParticleField {
    /// Scatter `config.count` particles uniformly over `bounds`
    pub fn new(config: &ParticleConfig, bounds: Bounds, rng: &mut impl Rng) -> Self {
        let particles = (0..config.count)
            .map(|_| Particle {
                position: Point::new(sample(rng, 0.0, bounds.width), sample(rng, 0.0, bounds.height)),
                velocity: Point::new(
                    sample(rng, -config.speed, config.speed),
                    sample(rng, -config.speed, config.speed),
                ),
                size: sample(rng, config.min_size, config.max_size),
                opacity: sample(rng, config.min_opacity, config.max_opacity),
            })
            .collect();
        Self {
            particles,
            bounds,
            link_distance: config.link_distance,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Advance one frame, bouncing off the edges
    pub fn step(&mut self) {
        let Bounds { width, height } = self.bounds;
        for p in &mut self.particles {
            p.position = p.position + p.velocity;

            if p.position.x < 0.0 || p.position.x > width {
                p.velocity.x = -p.velocity.x;
                p.position.x = p.position.x.clamp(0.0, width);
            }
            if p.position.y < 0.0 || p.position.y > height {
                p.velocity.y = -p.velocity.y;
                p.position.y = p.position.y.clamp(0.0, height);
            }
        }
    }

    /// Adopt new container bounds, pulling stragglers inside
    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        for p in &mut self.particles {
            p.position.x = p.position.x.clamp(0.0, bounds.width);
            p.position.y = p.position.y.clamp(0.0, bounds.height);
        }
    }

    /// Pairs within the link distance
    pub fn links(&self) -> Vec<Link> {
        if self.link_distance <= 0.0 {
            return Vec::new();
        }
        let max_sq = self.link_distance * self.link_distance;
        let mut links = Vec::new();
        for (a, pa) in self.particles.iter().enumerate() {
            for (offset, pb) in self.particles[a + 1..].iter().enumerate() {
                let d_sq = pa.position.distance_squared(pb.position);
                if d_sq < max_sq {
                    links.push(Link {
                        a,
                        b: a + 1 + offset,
                        alpha: 1.0 - d_sq.sqrt() / self.link_distance,
                    });
                }
            }
        }
        links
    }
}

//! Short-lived dots emitted along the triangle edges.
//!
//! Coordinates are relative to the canvas centre, which is also the triangle
//! centroid for movement purposes.

use rand::Rng;

use crate::command::{RenderCommand, RenderCommands, Rgba};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn lerp(self, to: Vec2, t: f32) -> Vec2 {
        Vec2 {
            x: self.x + (to.x - self.x) * t,
            y: self.y + (to.y - self.y) * t,
        }
    }
}

/// The base triangle, pointing down on screen (canvas y grows downwards).
pub const TRIANGLE: [Vec2; 3] = [
    Vec2::new(0.0, 120.0),
    Vec2::new(120.0, -120.0),
    Vec2::new(-120.0, -120.0),
];

pub const LIFE_MAX: i32 = 255;
/// Life lost per draw.
pub const LIFE_STEP: i32 = 10;
pub const SPAWN_PER_TICK: usize = 10;
/// Attempts at drawing a second, different vertex before taking the next one.
pub const MAX_RESAMPLE: usize = 32;

/// Half-height of the horizontal band around the centre in which dots slide
/// sideways instead of escaping diagonally.
const BAND: f32 = 10.0;
const BAND_DRIFT: f32 = 0.25;

const DOT_COLOR: Rgba = Rgba::opaque(167, 220, 255);

/// Where a particle was born: a point on the edge between two distinct
/// vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnPoint {
    pub from: usize,
    pub to: usize,
    pub t: f32,
    pub position: Vec2,
}

pub fn spawn_point<R: Rng + ?Sized>(rng: &mut R) -> SpawnPoint {
    let from = rng.random_range(0..TRIANGLE.len());
    let mut to = rng.random_range(0..TRIANGLE.len());
    let mut attempts = 0;
    while to == from {
        attempts += 1;
        if attempts >= MAX_RESAMPLE {
            to = (from + 1) % TRIANGLE.len();
            break;
        }
        to = rng.random_range(0..TRIANGLE.len());
    }
    let t = rng.random_range(0.0..1.0);
    SpawnPoint {
        from,
        to,
        t,
        position: TRIANGLE[from].lerp(TRIANGLE[to], t),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity_x: f32,
    pub velocity_y: f32,
    /// Diameter in pixels.
    pub size: f32,
    pub life: i32,
}

impl Particle {
    pub fn new(position: Vec2, velocity_x: f32, velocity_y: f32, size: f32) -> Self {
        Self {
            position,
            velocity_x,
            velocity_y,
            size,
            life: LIFE_MAX,
        }
    }

    pub fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let at = spawn_point(rng);
        let velocity_x = rng.random_range(0.5..3.0);
        let velocity_y = rng.random_range(0.5..3.0);
        let size = rng.random_range(0.0..10.0);
        Self::new(at.position, velocity_x, velocity_y, size)
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }

    /// Move one step away from the centre.
    ///
    /// Inside the band dots slide sideways with a slight drift; the right-hand
    /// side slides by `velocity_y`. Outside it they move diagonally into their
    /// own quadrant. A dot exactly on the vertical axis has no quadrant and
    /// stays put.
    pub fn update(&mut self) {
        let p = &mut self.position;
        if p.y > -BAND && p.y < BAND {
            if p.x < 0.0 {
                p.x -= self.velocity_x;
                p.y -= BAND_DRIFT;
            } else {
                p.x += self.velocity_y;
                p.y += BAND_DRIFT;
            }
            return;
        }

        let dx = if p.x < 0.0 {
            -self.velocity_x
        } else if p.x > 0.0 {
            self.velocity_x
        } else {
            return;
        };
        let dy = if p.y < 0.0 { -self.velocity_y } else { self.velocity_y };
        p.x += dx;
        p.y += dy;
    }

    /// Emit the dot with opacity equal to its remaining life, then age it.
    ///
    /// Drawing and ageing are one step: every rendered frame costs the dot
    /// `LIFE_STEP`, and a dot that is never drawn never ages.
    pub fn draw_and_age(&mut self, out: &mut RenderCommands) {
        let alpha = self.life.clamp(0, 255) as u8;
        out.push(RenderCommand::FillCircle {
            center: self.position,
            radius: self.size / 2.0,
            color: Rgba { a: alpha, ..DOT_COLOR },
        });
        self.life -= LIFE_STEP;
    }
}

#[derive(Clone, Debug, Default)]
pub struct ParticlePool {
    particles: Vec<Particle>,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Drop every expired particle. Returns how many went.
    pub fn cleanup(&mut self) -> usize {
        let before = self.particles.len();
        self.particles.retain(Particle::is_alive);
        before - self.particles.len()
    }

    /// Move, draw and age every particle. Run `cleanup` first.
    pub fn update_and_draw(&mut self, out: &mut RenderCommands) {
        for p in &mut self.particles {
            p.update();
            p.draw_and_age(out);
        }
    }

    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, n: usize) {
        self.particles.reserve(n);
        for _ in 0..n {
            self.particles.push(Particle::spawn(rng));
        }
    }
}

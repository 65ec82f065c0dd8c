use canvas_fx_wasm::particles::{spawn_point, LIFE_MAX, LIFE_STEP, TRIANGLE};
use canvas_fx_wasm::{Particle, ParticlePool, RenderCommand, Vec2};
use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

fn dot(x: f32, y: f32) -> Particle {
    Particle::new(Vec2::new(x, y), 1.5, 2.0, 4.0)
}

#[test]
fn band_left_slides_left_and_up() {
    let mut p = dot(-5.0, 3.0);
    p.update();
    assert_eq!(p.position, Vec2::new(-6.5, 2.75));
}

#[test]
fn band_right_slides_by_vertical_velocity() {
    let mut p = dot(4.0, 0.0);
    p.update();
    assert_eq!(p.position, Vec2::new(6.0, 0.25));
}

#[test]
fn outside_band_escapes_into_own_quadrant() {
    let cases = [
        ((-20.0, -30.0), (-21.5, -32.0)),
        ((-20.0, 30.0), (-21.5, 32.0)),
        ((20.0, 30.0), (21.5, 32.0)),
        ((20.0, -30.0), (21.5, -32.0)),
    ];
    for ((x, y), expected) in cases {
        let mut p = dot(x, y);
        p.update();
        assert_eq!(p.position, Vec2::new(expected.0, expected.1), "from ({x}, {y})");
    }
}

#[test]
fn band_edges_are_exclusive() {
    let mut p = dot(-20.0, 10.0);
    p.update();
    assert_eq!(p.position, Vec2::new(-21.5, 12.0));
}

#[test]
fn on_vertical_axis_outside_band_stays_put() {
    let mut p = dot(0.0, 50.0);
    p.update();
    assert_eq!(p.position, Vec2::new(0.0, 50.0));
}

#[test]
fn draw_renders_current_life_then_ages() {
    let mut p = dot(1.0, 2.0);
    let mut out = Vec::new();
    p.draw_and_age(&mut out);
    assert_eq!(p.life, LIFE_MAX - LIFE_STEP);
    match &out[..] {
        [RenderCommand::FillCircle { center, radius, color }] => {
            assert_eq!(*center, Vec2::new(1.0, 2.0));
            assert_eq!(*radius, 2.0);
            assert_eq!((color.r, color.g, color.b, color.a), (167, 220, 255, 255));
        }
        other => panic!("unexpected commands {other:?}"),
    }
}

#[test]
fn life_drops_by_ten_per_draw_until_removable() {
    let mut p = dot(30.0, 30.0);
    let mut out = Vec::new();
    let mut draws = 0;
    while p.is_alive() {
        let before = p.life;
        p.draw_and_age(&mut out);
        assert_eq!(p.life, before - 10);
        assert_eq!(p.is_alive(), p.life > 0);
        draws += 1;
    }
    assert_eq!(draws, 26);
    assert_eq!(p.life, -5);
}

#[test]
fn cleanup_removes_only_expired() {
    let mut pool = ParticlePool::new();
    let mut dead = dot(0.0, 20.0);
    dead.life = 0;
    let mut dying = dot(0.0, 20.0);
    dying.life = -5;
    pool.push(dead);
    pool.push(dying);
    pool.push(dot(0.0, 20.0));
    assert_eq!(pool.cleanup(), 2);
    assert_eq!(pool.len(), 1);
    assert!(pool.iter().all(Particle::is_alive));
}

#[test]
fn spawn_adds_exactly_n() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut pool = ParticlePool::new();
    pool.spawn(&mut rng, 10);
    assert_eq!(pool.len(), 10);
    pool.spawn(&mut rng, 10);
    assert_eq!(pool.len(), 20);
}

#[test]
fn spawned_particles_are_in_range() {
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..2_000 {
        let p = Particle::spawn(&mut rng);
        assert!((0.5..3.0).contains(&p.velocity_x));
        assert!((0.5..3.0).contains(&p.velocity_y));
        assert!((0.0..10.0).contains(&p.size));
        assert_eq!(p.life, 255);
    }
}

#[test]
fn spawn_endpoints_are_always_distinct() {
    let mut rng = SmallRng::seed_from_u64(1234);
    for _ in 0..10_000 {
        let at = spawn_point(&mut rng);
        assert_ne!(at.from, at.to);
        assert!((0.0..1.0).contains(&at.t));
        let expected = TRIANGLE[at.from].lerp(TRIANGLE[at.to], at.t);
        assert_eq!(at.position, expected);
    }
}

/// Always yields zero, so every vertex draw picks the first vertex.
struct StuckRng;

impl RngCore for StuckRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0);
    }
}

#[test]
fn resampling_is_bounded() {
    let at = spawn_point(&mut StuckRng);
    assert_eq!(at.from, 0);
    assert_eq!(at.to, 1);
}

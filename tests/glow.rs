use std::f64::consts::{FRAC_PI_4, PI};

use canvas_fx_wasm::glow::{
    glow_segments, BASE_COLOR, FRACTION_STEP, GLOW_COLOR, GLYPH, GLYPH_FONT, SEGMENTS_PER_VERTEX,
};
use canvas_fx_wasm::particles::TRIANGLE;
use canvas_fx_wasm::{GlowConfig, GlowScene, RenderCommand, Rgba, TextAlign, Vec2};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn scene() -> GlowScene<SmallRng> {
    GlowScene::new(GlowConfig::default(), SmallRng::seed_from_u64(99))
}

fn count(frame: &[RenderCommand], pred: impl Fn(&RenderCommand) -> bool) -> usize {
    frame.iter().filter(|c| pred(c)).count()
}

#[test]
fn ninety_segments_thirty_per_vertex() {
    let segments = glow_segments();
    assert_eq!(segments.len(), 90);
    for vertex in 0..3 {
        assert_eq!(segments.iter().filter(|s| s.vertex == vertex).count(), SEGMENTS_PER_VERTEX);
    }
}

#[test]
fn fractions_step_by_fixed_increment() {
    let segments = glow_segments();
    for fan in segments.chunks(SEGMENTS_PER_VERTEX) {
        assert_eq!(fan[0].fraction, 0.0);
        assert_eq!(fan[0].color, BASE_COLOR);
        for pair in fan.windows(2) {
            assert!(pair[1].fraction > pair[0].fraction);
            assert!((pair[1].fraction - pair[0].fraction - FRACTION_STEP).abs() < 1e-5);
        }
        let last = fan[SEGMENTS_PER_VERTEX - 1];
        let expected = 29.0 * (1.0 / 30.0 - 0.01);
        assert!((last.fraction - expected).abs() < 1e-4);
        assert!(last.fraction < 1.0);
        assert_ne!(last.color, GLOW_COLOR);
    }
}

#[test]
fn fans_sit_on_vertices_and_point_outward() {
    let segments = glow_segments();
    let first: Vec<_> = segments.chunks(SEGMENTS_PER_VERTEX).map(|fan| fan[0]).collect();

    assert_eq!(first[0].offset, TRIANGLE[0]);
    assert_eq!(first[0].angle, PI);
    assert_eq!(first[1].offset, Vec2::new(TRIANGLE[1].x + 5.0, TRIANGLE[1].y));
    assert_eq!(first[1].angle, FRAC_PI_4 + 0.28);
    assert_eq!(first[2].offset, Vec2::new(TRIANGLE[2].x - 5.0, TRIANGLE[2].y));
    assert_eq!(first[2].angle, -FRAC_PI_4 - 0.28);
}

#[test]
fn segments_widen_with_distance() {
    let segments = glow_segments();
    let s = segments[12];
    assert_eq!(s.from, Vec2::new(-12.0, 24.0));
    assert_eq!(s.to, Vec2::new(13.0, 24.0));
    assert_eq!(s.width, 2.0);
}

#[test]
fn every_frame_draws_the_full_glow() {
    let mut scene = scene();
    for _ in 0..3 {
        let frame = scene.on_tick();
        assert_eq!(count(&frame, |c| matches!(c, RenderCommand::Line { .. })), 90);
        assert_eq!(count(&frame, |c| matches!(c, RenderCommand::Triangle { .. })), 1);
    }
}

#[test]
fn frame_layers_background_triangle_dots_text() {
    let mut scene = scene();
    scene.on_tick();
    let frame = scene.on_tick();

    assert_eq!(
        frame[0],
        RenderCommand::FillRect { x: 0.0, y: 0.0, w: 400.0, h: 400.0, color: Rgba::BLACK }
    );
    assert_eq!(frame[1], RenderCommand::Save);
    assert_eq!(frame[2], RenderCommand::Translate { x: 200.0, y: 200.0 });
    assert_eq!(
        frame[3],
        RenderCommand::Triangle { points: TRIANGLE, fill: GLOW_COLOR, stroke: Rgba::BLACK }
    );

    let last_line = frame
        .iter()
        .rposition(|c| matches!(c, RenderCommand::Line { .. }))
        .unwrap();
    let first_dot = frame
        .iter()
        .position(|c| matches!(c, RenderCommand::FillCircle { .. }))
        .unwrap();
    assert!(first_dot > last_line);

    let n = frame.len();
    assert_eq!(frame[n - 1], RenderCommand::Restore);
    assert_eq!(
        frame[n - 2],
        RenderCommand::Text {
            text: GLYPH.to_string(),
            x: 0.0,
            y: 5.0,
            font: GLYPH_FONT.to_string(),
            align: TextAlign::Center,
            color: Rgba::WHITE,
        }
    );
}

#[test]
fn ten_new_dots_every_tick() {
    let mut scene = scene();
    let mut last = 0;
    for tick in 1..=60usize {
        let frame = scene.on_tick();
        let drawn = count(&frame, |c| matches!(c, RenderCommand::FillCircle { .. }));
        // Dots spawned this tick are drawn from the next one.
        assert_eq!(scene.pool().len(), drawn + 10, "tick {tick}");
        assert!(drawn <= last);
        last = scene.pool().len();
        // Each dot survives 26 draws, so the pool levels off at 27 batches.
        assert_eq!(scene.pool().len(), 10 * tick.min(27), "tick {tick}");
    }
    assert_eq!(scene.ticks(), 60);
}

#[test]
fn new_dots_start_on_triangle_edges() {
    let mut scene = scene();
    scene.on_tick();
    for p in scene.pool().iter() {
        assert_eq!(p.life, 255);
        let on_edge = (0..3).any(|i| {
            let a = TRIANGLE[i];
            let b = TRIANGLE[(i + 1) % 3];
            let cross = (b.x - a.x) * (p.position.y - a.y) - (b.y - a.y) * (p.position.x - a.x);
            cross.abs() < 0.5
        });
        assert!(on_edge, "{:?} is not on an edge", p.position);
    }
}

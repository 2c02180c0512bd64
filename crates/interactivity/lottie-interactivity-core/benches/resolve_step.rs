use std::cell::RefCell;
use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lottie_interactivity_core::{
    resolve_progress, AnimationSource, EngineConfig, HeadlessRenderer, InteractivityEngine,
    PlaybackStateMachine, PlayerOptions, PositionSource, Rect, ScrollGeometry, ScrollSource,
};

fn bench_resolve(c: &mut Criterion) {
    let cfg = EngineConfig::from_json(
        &lottie_test_fixtures::configs::json("scroll-with-offset").expect("fixture"),
    )
    .expect("config");
    c.bench_function("resolve_progress_sweep", |b| {
        b.iter(|| {
            for i in 0..=100 {
                black_box(resolve_progress(i as f32 / 100.0, &cfg.actions));
            }
        })
    });
}

fn bench_scroll_tick(c: &mut Criterion) {
    let cfg = EngineConfig::from_json(
        &lottie_test_fixtures::configs::json("scroll-with-offset").expect("fixture"),
    )
    .expect("config");
    let mut player = PlaybackStateMachine::new(
        Box::new(HeadlessRenderer::new(38.0)),
        PlayerOptions::default(),
    );
    player.load(&AnimationSource::Path("like-button.json".into()));
    player.on_ready();
    let player = player.shared();
    let source = Rc::new(RefCell::new(ScrollSource::new(cfg.offset)));
    let _engine = InteractivityEngine::new(cfg, source.clone(), player).expect("engine");

    let mut top = 800.0f32;
    c.bench_function("scroll_event_flush", |b| {
        b.iter(|| {
            top = if top < -200.0 { 800.0 } else { top - 7.0 };
            let geom = ScrollGeometry {
                element: Rect::new(0.0, top, 300.0, 200.0),
                viewport: Rect::new(0.0, 0.0, 300.0, 800.0),
            };
            let mut s = source.borrow_mut();
            s.on_scroll(&geom);
            black_box(s.flush());
        })
    });
}

criterion_group!(benches, bench_resolve, bench_scroll_tick);
criterion_main!(benches);

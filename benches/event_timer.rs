use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tictoc::{EventTimer, ManualClock};

fn start_stop(c: &mut Criterion) {
    let mut timer = EventTimer::detached();
    c.bench_function("start_stop_system_clock", |b| {
        b.iter(|| {
            timer.start_timer(black_box("solve"));
            timer.stop_timer(black_box("solve"), false);
        })
    });

    let clock = ManualClock::new(0.0);
    let mut timer = EventTimer::detached_with_clock(clock.clone());
    c.bench_function("start_stop_many_events", |b| {
        let events: Vec<String> = (0..64).map(|i| format!("event_{:02}", i)).collect();
        b.iter(|| {
            for event in &events {
                timer.start_timer(event);
                clock.advance(1.0e-3);
                timer.stop_timer(event, false);
            }
        })
    });
}

fn write_time_step(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut timer = EventTimer::create(dir.path()).expect("output files");
    for i in 0..32 {
        let event = format!("event_{:02}", i);
        timer.start_timer(&event);
        timer.stop_timer(&event, false);
    }

    let mut step = 0;
    c.bench_function("write_time_step_32_columns", |b| {
        b.iter(|| {
            timer.write_time_step(black_box(step)).expect("write");
            step += 1;
        })
    });
}

criterion_group!(benches, start_stop, write_time_step);
criterion_main!(benches);

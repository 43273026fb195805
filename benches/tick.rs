use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tribody::{semi_implicit_step, ForceSet, InitialConditions, Parameters, SimulationClock, System};
use tribody::simulation::scenario::default_preset;

fn bench_step(c: &mut Criterion) {
    let params = Parameters::default();
    let forces = ForceSet::gravity(&params);
    let start = System::from_inits(&default_preset()).unwrap();

    c.bench_function("semi_implicit_step", |b| {
        let mut sys = start.clone();
        b.iter(|| semi_implicit_step(black_box(&mut sys), &forces, &params).unwrap())
    });
}

fn bench_clock_tick(c: &mut Criterion) {
    c.bench_function("clock_tick", |b| {
        let mut clock = SimulationClock::new(Parameters::default(), &InitialConditions::Default).unwrap();
        clock.start().unwrap();
        b.iter(|| {
            // keep measuring a live run; restart once a verdict ends it
            if clock.tick().unwrap() == tribody::TickOutcome::Halted {
                clock.reset().unwrap();
                clock.start().unwrap();
            }
        })
    });
}

criterion_group!(benches, bench_step, bench_clock_tick);
criterion_main!(benches);

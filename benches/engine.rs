use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use genetask::prelude::*;

fn bench_scx(c: &mut Criterion) {
    let order = 100;
    let nodes: Vec<usize> = (1..=order).collect();
    let costs: Vec<Vec<f64>> = (0..=order)
        .map(|i| (0..=order).map(|j| ((i * 31 + j * 17) % 97) as f64 + 1.0).collect())
        .collect();
    let data = CostMatrix::new(costs, 0, true);
    let mut rng = StdRng::seed_from_u64(1);
    let parent_a = Individual::new(Tour::random(&mut rng, &nodes));
    let parent_b = Individual::new(Tour::random(&mut rng, &nodes));
    let view = TaskView {
        data: &data,
        obj_factors: &[-1.0],
        generation: None,
    };
    let params = Params::new();

    c.bench_function("scx_100_nodes", |b| {
        b.iter(|| {
            let (c1, c2) = Scx.cross(
                black_box(&view),
                black_box(&parent_a),
                black_box(&parent_b),
                &params,
                &mut rng,
            );
            black_box((c1, c2))
        })
    });
}

fn bench_evaluate(c: &mut Criterion) {
    c.bench_function("evaluate_500_floats", |b| {
        b.iter_batched(
            || {
                let mut task: Task<FloatVector, ()> = Task::from_seed((), 2);
                let objective: Arc<dyn Objective<FloatVector, ()>> =
                    Arc::new(|g: &Vec<f64>, _: &()| g.iter().map(|x| x * x).sum::<f64>());
                task.set_objectives(vec![objective], vec![-1.0]).unwrap();
                let population = init::float_population(task.rng_mut(), 500, 32, -5.0, 5.0);
                task.set_population(population);
                task
            },
            |mut task| {
                task.evaluate().unwrap();
                black_box(task.individual(0).fitness_at(0))
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_scx, bench_evaluate);
criterion_main!(benches);

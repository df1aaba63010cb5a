use criterion::*;
use nalgebra_glm::{Mat4, Vec3};
use archetable::prelude::*;

const COUNT: usize = 10000;

#[derive(Default, Copy, Clone, Component)]
struct Transform(Mat4);

#[derive(Default, Copy, Clone, Component)]
struct Translation(Vec3);

#[derive(Default, Copy, Clone, Component)]
struct Rotation(Vec3);

#[derive(Default, Copy, Clone, Component)]
struct Velocity(Vec3);

#[derive(Default, Copy, Clone, Component)]
struct Sleeping;

fn populate(archetypes: &mut Archetypes) -> Vec<Entity> {
    (0..COUNT)
        .map(|i| {
            let entity = archetypes.spawn().unwrap();
            archetypes.add_component(entity, Transform::default()).unwrap();
            archetypes.add_component(entity, Translation::default()).unwrap();
            archetypes.add_component(entity, Rotation(Vec3::new(0.0, i as f32, 0.0))).unwrap();
            archetypes.add_component(entity, Velocity(Vec3::new(1.0, 0.0, 0.0))).unwrap();
            entity
        })
        .collect()
}

fn create_entities(c: &mut Criterion) {
    c.bench_function("Create entities", |b| {
        b.iter_batched(
            || {
                let mut archetypes = Archetypes::new();
                let table = archetable::create_table!(archetypes, [Transform, Translation, Rotation, Velocity]).unwrap();
                archetypes.reserve(table, COUNT).unwrap();
                archetypes
            },
            |mut archetypes| populate(&mut archetypes),
            BatchSize::PerIteration,
        );
    });
}

fn destroy_entities(c: &mut Criterion) {
    c.bench_function("Destroy entities", |b| {
        b.iter_batched(
            || {
                let mut archetypes = Archetypes::new();
                let entities = populate(&mut archetypes);
                (archetypes, entities)
            },
            |(mut archetypes, entities)| archetypes.despawn_batch(&entities).unwrap(),
            BatchSize::PerIteration,
        );
    });
}

fn migrate_entities(c: &mut Criterion) {
    let mut group = c.benchmark_group("Migrate entities");
    group.bench_function("Copying", |b| {
        b.iter_batched(
            || {
                let mut archetypes = Archetypes::new();
                let entities = populate(&mut archetypes);
                (archetypes, entities)
            },
            |(mut archetypes, entities)| {
                for entity in entities {
                    archetypes.remove_component::<Velocity>(entity).unwrap();
                }
            },
            BatchSize::PerIteration,
        );
    });

    group.bench_function("Shared storage", |b| {
        b.iter_batched(
            || {
                let mut archetypes = Archetypes::new();
                let entities = populate(&mut archetypes);
                (archetypes, entities)
            },
            |(mut archetypes, entities)| {
                for entity in entities {
                    archetypes.add_component(entity, Sleeping).unwrap();
                }
            },
            BatchSize::PerIteration,
        );
    });
}

fn iterate_entities(c: &mut Criterion) {
    let mut group = c.benchmark_group("Iterate entities");
    group.bench_function("Single-threaded", |b| {
        let mut archetypes = Archetypes::new();
        populate(&mut archetypes);
        let query = archetypes.query(&Mask::build().has::<(Transform, Translation, Rotation, Velocity)>().create());

        b.iter(|| {
            query
                .for_each_mut::<(Transform, Translation, Velocity, Rotation)>(&mut archetypes, |_, (m, t, v, r)| {
                    t.0 += v.0;
                    m.0 = Mat4::new_translation(&t.0) * Mat4::new_rotation(r.0);
                })
                .unwrap()
        });
    });

    group.bench_function("Multi-threaded", |b| {
        let mut archetypes = Archetypes::new();
        populate(&mut archetypes);
        let query = archetypes.query(&Mask::build().has::<(Transform, Translation, Rotation, Velocity)>().create());

        b.iter(|| {
            query
                .par_for_each_mut::<(Transform, Translation, Velocity, Rotation)>(&mut archetypes, |_, (m, t, v, r)| {
                    t.0 += v.0;
                    m.0 = Mat4::new_translation(&t.0) * Mat4::new_rotation(r.0);
                })
                .unwrap()
        });
    });

    group.bench_function("Entities only", |b| {
        let mut archetypes = Archetypes::new();
        populate(&mut archetypes);
        let query = archetypes.query(&Mask::build().has::<(Velocity,)>().create());

        b.iter(|| black_box(query.iter(&archetypes).count()));
    });
}

criterion_group!(
    benchmarks,
    create_entities,
    destroy_entities,
    migrate_entities,
    iterate_entities,
);
criterion_main!(benchmarks);

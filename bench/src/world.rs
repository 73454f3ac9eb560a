//! World builders shared by the benchmarks.

use rand::Rng;
use triki_engine::ecs::{Config, Coordinator, Entity, Result};

use crate::components::{Health, MovementSystem, Position, Transform, Velocity};

/// A coordinator sized for `capacity` entities with every benchmark component and the
/// [`MovementSystem`] registered.
pub fn coordinator(capacity: usize) -> Result<Coordinator> {
    let mut coordinator = Coordinator::with_config(Config::new().with_max_entities(capacity));
    coordinator.register_component::<Position>()?;
    coordinator.register_component::<Velocity>()?;
    coordinator.register_component::<Health>()?;
    coordinator.register_component::<Transform>()?;

    coordinator.register_system::<MovementSystem>()?;
    let signature = coordinator.signature_of::<(Position, Velocity)>()?;
    coordinator.set_system_signature::<MovementSystem>(signature)?;
    Ok(coordinator)
}

/// Create `count` entities with a [`Position`]. Roughly `moving` of them (a ratio in `0..=1`) also
/// get a [`Velocity`].
pub fn populate<R: Rng>(
    coordinator: &mut Coordinator,
    count: usize,
    moving: f64,
    rng: &mut R,
) -> Result<Vec<Entity>> {
    let mut entities = Vec::with_capacity(count);
    for _ in 0..count {
        let entity = coordinator.create_entity()?;
        coordinator.add_component(
            entity,
            Position {
                x: rng.gen_range(-100.0..100.0),
                y: rng.gen_range(-100.0..100.0),
                z: 0.0,
            },
        )?;
        if rng.gen_bool(moving) {
            coordinator.add_component(
                entity,
                Velocity {
                    x: rng.gen_range(-1.0..1.0),
                    y: rng.gen_range(-1.0..1.0),
                    z: 0.0,
                },
            )?;
        }
        entities.push(entity);
    }
    Ok(entities)
}

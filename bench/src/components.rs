//! Common component types used across benchmarks.

use triki_engine::ecs::{Coordinator, Entities, System};
use triki_macros::Component;

/// 3D position component (12 bytes).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// 3D velocity component (12 bytes).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Hit points (4 bytes).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Health(pub f32);

/// 4x4 transformation matrix (64 bytes).
#[derive(Component, Clone, Copy, Debug)]
pub struct Transform {
    pub matrix: [[f32; 4]; 4],
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            matrix: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }
}

/// Integrates velocity into position. Requires [`Position`] and [`Velocity`]; the input is the
/// time step.
#[derive(Default)]
pub struct MovementSystem;

impl System for MovementSystem {
    type Input<'a> = f32;

    fn update(&mut self, entities: &Entities, coordinator: &mut Coordinator, dt: f32) {
        for &entity in entities {
            let Ok(velocity) = coordinator.component::<Velocity>(entity).copied() else {
                continue;
            };
            if let Ok(position) = coordinator.component_mut::<Position>(entity) {
                position.x += velocity.x * dt;
                position.y += velocity.y * dt;
                position.z += velocity.z * dt;
            }
        }
    }
}

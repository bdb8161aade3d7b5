use bevy::prelude::{Entity, Transform, Vec3};
use godot::classes::{Camera3D, CharacterBody3D, ICamera3D, Node};
use godot::prelude::*;
use leapfall_simulation::{logger, CameraShake, LandingImpact, Locomotion};

use crate::simulation_bridge::{find_bridge, with_bridge, SimulationBridge, DEFAULT_BRIDGE_PATH};

/// Camera3D с walk shake + landing shake (ECS entity в SimulationBridge)
///
/// # Hierarchy
/// ```text
/// Player (CharacterBody3D)
/// └─ ... (pivot nodes)
///    └─ ShakeCamera
/// ```
/// Body ищется вверх по parent chain (первый CharacterBody3D).
///
/// # Flow
/// - `physics_process`: body `is_on_floor` / velocity → `Locomotion` component
/// - ECS (`CameraShakePlugin`): detect landing → shake → `Transform`
/// - `process`: `Transform.translation` → local position (только если изменился)
///
/// Landing: `trigger_landing_shake(magnitude)` из gameplay или auto
/// (airborne → grounded, `camera.auto_landing_impulse`).
#[derive(GodotClass)]
#[class(base=Camera3D)]
pub struct ShakeCamera {
    base: Base<Camera3D>,

    #[export]
    simulation_bridge_path: NodePath,

    bridge: Option<Gd<SimulationBridge>>,
    body: Option<Gd<CharacterBody3D>>,
    entity: Option<Entity>,

    /// Последняя позиция, записанная в node
    applied: Vec3,
}

#[godot_api]
impl ICamera3D for ShakeCamera {
    fn init(base: Base<Camera3D>) -> Self {
        Self {
            base,
            simulation_bridge_path: NodePath::from(DEFAULT_BRIDGE_PATH),
            bridge: None,
            body: None,
            entity: None,
            applied: Vec3::ZERO,
        }
    }

    fn ready(&mut self) {
        let bridge = find_bridge(&self.base(), &self.simulation_bridge_path);
        self.bridge = bridge;

        let body = self.find_body();
        self.body = body;

        let base_position = to_vec3(self.base().get_position());
        self.applied = base_position;

        let grounded = self.body.as_ref().map(|body| body.is_on_floor()).unwrap_or(true);
        self.entity = with_bridge(&mut self.bridge, |bridge| {
            let camera_config = bridge.gameplay_config().camera;
            let world = bridge.world_mut()?;
            let entity = world
                .spawn((
                    Transform::from_translation(base_position),
                    CameraShake::new(base_position, camera_config),
                    Locomotion::new(grounded, Vec3::ZERO),
                ))
                .id();
            Some(entity)
        })
        .flatten();

        match &self.body {
            Some(body) => logger::log(&format!(
                "✅ ShakeCamera attached to '{}' (entity {:?})",
                body.get_name(),
                self.entity
            )),
            None => logger::log_warning(
                "⚠️ ShakeCamera: no CharacterBody3D parent - camera stays at base position",
            ),
        }
    }

    fn exit_tree(&mut self) {
        let Some(entity) = self.entity.take() else {
            return;
        };

        with_bridge(&mut self.bridge, |bridge| {
            if let Some(world) = bridge.world_mut() {
                world.despawn(entity);
            }
        });
    }

    fn physics_process(&mut self, _delta: f64) {
        let (Some(entity), Some(body)) = (self.entity, self.body.as_ref()) else {
            return;
        };
        let locomotion = Locomotion::new(body.is_on_floor(), to_vec3(body.get_velocity()));

        with_bridge(&mut self.bridge, |bridge| {
            let Some(world) = bridge.world_mut() else {
                return;
            };
            if let Some(mut current) = world.get_mut::<Locomotion>(entity) {
                *current = locomotion;
            }
        });
    }

    fn process(&mut self, _delta: f64) {
        let Some(entity) = self.entity else {
            return;
        };

        let translation = with_bridge(&mut self.bridge, |bridge| {
            bridge
                .world()
                .and_then(|world| world.get::<Transform>(entity))
                .map(|transform| transform.translation)
        })
        .flatten();

        // В воздухе без landing ECS не трогает Transform — node тоже
        if let Some(translation) = translation {
            if translation != self.applied {
                self.applied = translation;
                self.base_mut().set_position(to_vector3(translation));
            }
        }
    }
}

#[godot_api]
impl ShakeCamera {
    /// Landing wobble с заданной силой (обычно пропорционально скорости падения)
    #[func]
    pub fn trigger_landing_shake(&mut self, magnitude: f32) {
        let Some(camera) = self.entity else {
            return;
        };

        with_bridge(&mut self.bridge, |bridge| {
            bridge.send_event(LandingImpact { camera, magnitude });
        });
    }

    /// Текущая local position → новый base (после смены pivot / crouch)
    #[func]
    pub fn rebase(&mut self) {
        let Some(entity) = self.entity else {
            return;
        };
        let position = to_vec3(self.base().get_position());
        self.applied = position;

        with_bridge(&mut self.bridge, |bridge| {
            let Some(world) = bridge.world_mut() else {
                return;
            };
            if let Some(mut shake) = world.get_mut::<CameraShake>(entity) {
                shake.base_position = position;
            }
            if let Some(mut transform) = world.get_mut::<Transform>(entity) {
                transform.translation = position;
            }
        });
    }

    #[func]
    pub fn is_landing_active(&mut self) -> bool {
        let Some(entity) = self.entity else {
            return false;
        };

        with_bridge(&mut self.bridge, |bridge| {
            bridge
                .world()
                .and_then(|world| world.get::<CameraShake>(entity))
                .is_some_and(CameraShake::is_landing_active)
        })
        .unwrap_or(false)
    }

    fn find_body(&self) -> Option<Gd<CharacterBody3D>> {
        let mut current: Option<Gd<Node>> = self.base().get_parent();
        while let Some(node) = current {
            match node.try_cast::<CharacterBody3D>() {
                Ok(body) => return Some(body),
                Err(node) => current = node.get_parent(),
            }
        }
        None
    }
}

fn to_vec3(v: Vector3) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn to_vector3(v: Vec3) -> Vector3 {
    Vector3::new(v.x, v.y, v.z)
}

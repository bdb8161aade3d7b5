//! Camera domain — first-person shake tied to locomotion
//!
//! # Архитектура
//!
//! - `CameraShake` (component): anchor position + walk phase + landing impulse
//! - `Locomotion` (component): grounded + velocity (пишет Godot/physics layer)
//! - `LandingImpact` (event): landing wobble (от gameplay или `detect_landings`)
//!
//! # Порядок за frame
//! `detect_landings` → `apply_landing_impacts` → `apply_camera_shake`
//!
//! `apply_camera_shake` пересчитывает `Transform.translation` от anchor.
//! Godot `ShakeCamera` пишет `Locomotion` и читает `Transform` через SimulationBridge.

pub mod shake;

pub use shake::{move_toward, CameraShake, Locomotion};

use bevy::prelude::*;

/// Landing после падения → wobble на camera entity
#[derive(Event, Debug, Clone, Copy)]
pub struct LandingImpact {
    pub camera: Entity,
    pub magnitude: f32,
}

pub struct CameraShakePlugin;

impl Plugin for CameraShakePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LandingImpact>().add_systems(
            Update,
            (detect_landings, apply_landing_impacts, apply_camera_shake).chain(),
        );
    }
}

/// Система: airborne → grounded → LandingImpact (auto_landing_impulse)
pub fn detect_landings(
    mut cameras: Query<(Entity, &mut CameraShake, &Locomotion)>,
    mut impacts: EventWriter<LandingImpact>,
) {
    for (camera, mut shake, locomotion) in cameras.iter_mut() {
        if let Some(magnitude) = shake.observe_ground_contact(locomotion.grounded) {
            impacts.write(LandingImpact { camera, magnitude });
        }
    }
}

/// Система: LandingImpact → CameraShake::trigger_landing
pub fn apply_landing_impacts(
    mut impacts: EventReader<LandingImpact>,
    mut cameras: Query<&mut CameraShake>,
) {
    for impact in impacts.read() {
        let Ok(mut shake) = cameras.get_mut(impact.camera) else {
            crate::logger::log_warning(&format!(
                "LandingImpact for {:?} without CameraShake component",
                impact.camera
            ));
            continue;
        };

        shake.trigger_landing(impact.magnitude);
    }
}

/// Система: walk/landing shake → Transform.translation
pub fn apply_camera_shake(
    time: Res<Time>,
    mut cameras: Query<(&mut CameraShake, &Locomotion, &mut Transform)>,
) {
    let delta = time.delta_secs();

    for (mut shake, locomotion, mut transform) in cameras.iter_mut() {
        if let Some(position) = shake.update(delta, locomotion) {
            transform.translation = position;
        }
    }
}

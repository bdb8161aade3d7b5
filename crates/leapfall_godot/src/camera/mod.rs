//! First-person camera (walk bob + landing wobble)
//!
//! `ShakeCamera` — Camera3D внутри CharacterBody3D. Shake живёт в ECS
//! (`CameraShake` entity в SimulationBridge), node только пишет body
//! grounded/velocity и применяет посчитанную local position.

pub mod shake_camera;

pub use shake_camera::ShakeCamera;

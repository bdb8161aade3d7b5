use godot::prelude::*;

mod camera;
mod config;
mod logger;
mod simulation_bridge;
mod ui;

/// GDExtension entry point
struct LeapfallExtension;

#[gdextension]
unsafe impl ExtensionLibrary for LeapfallExtension {}

//! # bevy_kzmap
//!
//! Map-authoring contract layer ("Mapping API") for kz-style bhop/speedrun
//! timer modes in Bevy.
//!
//! Level designers place trigger volumes, course-descriptor markers and
//! teleport destinations in the map; this crate ingests their keyvalues at
//! load time, validates and cross-references them into an in-memory catalog
//! of triggers and courses, and resolves touched trigger volumes back to
//! their timer semantics on the per-tick touch path.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_kzmap::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(MinimalPlugins)
//!         .add_plugins(BevyKzmapPlugin::default())
//!         .add_observer(on_zone_touch)
//!         .run();
//! }
//!
//! fn on_zone_touch(touch: On<KzTouchStarted>) {
//!     let event = touch.event();
//!     if let Some(course) = &event.course {
//!         info!("player {:?} touched a zone of course {}", event.player, course.name);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! This crate is organized into 2 layers:
//!
//! - **Layer 1** ([`entities`]): Pure input model - per-entity keyvalue bags,
//!   spawn-batch descriptions and the lifecycle/touch events the host engine
//!   triggers.
//! - **Layer 2** ([`core`]): The catalog - two-pass ingestion, round-start
//!   validation, the runtime resolver and the diagnostic broadcast.
//!
//! Gameplay code (timers, modes, teleports) is deliberately *not* part of
//! this crate; it subscribes to the resolved touch events instead.
//!
//! ## Using Individual Crates
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_kzmap_core::prelude::*;
//!
//! App::new()
//!     .add_plugins(MinimalPlugins)
//!     .add_plugins(KzmapCorePlugin::default())
//!     .run();
//! ```

pub mod plugin;

// Re-export sub-crates for advanced usage
pub use bevy_kzmap_core as core;
pub use bevy_kzmap_entities as entities;

/// Unified prelude for `bevy_kzmap`
///
/// Re-exports the most commonly used types from both sub-crates.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_kzmap::prelude::*;
///
/// fn course_listing(data: Res<MapApiData>) {
///     for course in data.courses() {
///         // Work with validated courses...
///     }
/// }
/// ```
pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::entities::prelude::*;

    // Unified plugin
    pub use crate::plugin::BevyKzmapPlugin;
}

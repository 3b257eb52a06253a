//! Plugin for `bevy_kzmap_core`.

use std::path::PathBuf;

use bevy::prelude::*;

use crate::catalog::MapApiData;
use crate::debug::{DebugTriggerVolumes, draw_trigger_volumes_debug};
use crate::systems::{
    ErrorBroadcastTimer, broadcast_errors, on_entity_batch_spawned, on_round_prestarted,
    on_round_started, on_spawn_group_created, on_trigger_touch_ended, on_trigger_touch_started,
};

/// Configuration for [`KzmapCorePlugin`].
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_kzmap_core::{KzmapCoreConfig, KzmapCorePlugin};
///
/// App::new()
///     .add_plugins(KzmapCorePlugin::new(KzmapCoreConfig {
///         export_courses_path: Some("courses.json".into()),
///         ..default()
///     }));
/// ```
#[derive(Resource, Debug, Clone)]
pub struct KzmapCoreConfig {
    /// Seconds between diagnostic broadcasts while any are pending.
    pub error_broadcast_interval: f32,

    /// Optional path to export the validated course catalog as JSON at round
    /// start, for external tooling (records services, web APIs).
    pub export_courses_path: Option<PathBuf>,
}

impl Default for KzmapCoreConfig {
    fn default() -> Self {
        Self {
            error_broadcast_interval: 60.0,
            export_courses_path: None,
        }
    }
}

/// Plugin for the `bevy_kzmap_core` catalog.
///
/// Owns the [`MapApiData`] resource and wires the host's lifecycle and touch
/// events into it:
///
/// - `RoundPrestarted` opens the load window and forgets the previous map.
/// - `SpawnGroupCreated` runs the schema version gate.
/// - `EntityBatchSpawned` runs both ingestion passes.
/// - `RoundStarted` closes the window, validates courses and exports the
///   catalog if configured.
/// - `TriggerTouchStarted`/`TriggerTouchEnded` resolve the touch and forward
///   it to gameplay observers.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_kzmap_core::KzmapCorePlugin;
///
/// App::new()
///     .add_plugins(MinimalPlugins)
///     .add_plugins(KzmapCorePlugin::default())
///     .run();
/// ```
#[derive(Default)]
pub struct KzmapCorePlugin {
    config: KzmapCoreConfig,
}

impl KzmapCorePlugin {
    /// Create a new plugin with custom configuration.
    pub fn new(config: KzmapCoreConfig) -> Self {
        Self { config }
    }
}

impl Plugin for KzmapCorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.config.clone());
        app.init_resource::<MapApiData>();
        app.insert_resource(ErrorBroadcastTimer(Timer::from_seconds(
            self.config.error_broadcast_interval,
            TimerMode::Repeating,
        )));

        // Lifecycle observers, in the order the host fires them
        app.add_observer(on_round_prestarted);
        app.add_observer(on_spawn_group_created);
        app.add_observer(on_entity_batch_spawned);
        app.add_observer(on_round_started);

        // Hot path: per-tick touch resolution
        app.add_observer(on_trigger_touch_started);
        app.add_observer(on_trigger_touch_ended);

        app.add_systems(Update, broadcast_errors);

        // Debug visualization (only runs when DebugTriggerVolumes is present)
        app.add_systems(
            PostUpdate,
            draw_trigger_volumes_debug.run_if(resource_exists::<DebugTriggerVolumes>),
        );

        info!("KzmapCorePlugin initialized");
    }
}

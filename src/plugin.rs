//! Unified plugin for `bevy_kzmap`.

use bevy::prelude::*;

use bevy_kzmap_core::{KzmapCoreConfig, KzmapCorePlugin};

/// Unified plugin that adds all `bevy_kzmap` functionality.
///
/// This plugin automatically includes:
/// - The catalog core ([`KzmapCorePlugin`]): ingestion, validation, runtime
///   touch resolution and the diagnostic broadcast.
///
/// The Layer 1 input crate (`bevy_kzmap_entities`) is types-only and needs no
/// plugin of its own.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_kzmap::prelude::*;
///
/// App::new()
///     .add_plugins(MinimalPlugins)
///     .add_plugins(BevyKzmapPlugin::default())
///     .run();
/// ```
///
/// # With Custom Configuration
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_kzmap::prelude::*;
///
/// App::new()
///     .add_plugins(
///         BevyKzmapPlugin::default()
///             .with_core(KzmapCoreConfig {
///                 export_courses_path: Some("courses.json".into()),
///                 ..default()
///             })
///     )
///     .run();
/// ```
#[derive(Default)]
pub struct BevyKzmapPlugin {
    /// Core configuration
    pub core: KzmapCoreConfig,
}

impl BevyKzmapPlugin {
    /// Create with custom core configuration
    pub fn with_core(mut self, config: KzmapCoreConfig) -> Self {
        self.core = config;
        self
    }
}

impl Plugin for BevyKzmapPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(KzmapCorePlugin::new(self.core.clone()));

        info!("BevyKzmapPlugin initialized");
    }
}

//! Debug visualization for cataloged map data.

use bevy::prelude::*;

use crate::catalog::MapApiData;

/// Resource to enable trigger-catalog debug visualization.
///
/// Insert this resource to draw markers at every cataloged trigger origin and
/// an arrow at every bound course start position.
///
/// # Example
///
/// ```rust,no_run
/// # use bevy::prelude::*;
/// # use bevy_kzmap_core::debug::DebugTriggerVolumes;
/// fn enable_debug(mut commands: Commands) {
///     commands.insert_resource(DebugTriggerVolumes::default());
/// }
/// ```
#[derive(Resource, Debug, Clone)]
pub struct DebugTriggerVolumes {
    /// Color for zone-kind triggers
    pub zone_color: Color,
    /// Color for every other trigger kind
    pub trigger_color: Color,
    /// Color for course start positions
    pub start_color: Color,
    /// Radius of the origin markers, in world units
    pub marker_radius: f32,
}

impl Default for DebugTriggerVolumes {
    fn default() -> Self {
        Self {
            zone_color: Color::srgba(0.0, 1.0, 0.0, 0.8),    // Green
            trigger_color: Color::srgba(1.0, 0.6, 0.0, 0.8), // Orange
            start_color: Color::srgba(0.2, 0.6, 1.0, 0.9),   // Blue
            marker_radius: 16.0,
        }
    }
}

/// System that draws markers for the current catalog.
///
/// Only runs when `DebugTriggerVolumes` resource is present.
pub fn draw_trigger_volumes_debug(
    config: Res<DebugTriggerVolumes>,
    data: Res<MapApiData>,
    mut gizmos: Gizmos,
) {
    for trigger in data.triggers() {
        let color = if trigger.kind.is_zone() {
            config.zone_color
        } else {
            config.trigger_color
        };
        gizmos.sphere(trigger.origin, config.marker_radius, color);
    }

    for course in data.courses() {
        let Some(start) = &course.start_position else {
            continue;
        };
        // Arrow dropping onto the spawn point from above.
        let tip = start.origin;
        let tail = tip + Vec3::Z * (config.marker_radius * 4.0);
        gizmos.arrow(tail, tip, config.start_color);
    }
}

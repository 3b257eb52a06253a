//! Spawn-batch elements and the names making up the authoring contract.
//!
//! The constants in this module are the contract between level designers and
//! the timer: classnames the catalog reacts to, the `timer_*` keys it reads,
//! and the reserved targetnames with special meaning. They must match what
//! the mapping toolchain emits, so treat every rename as a breaking change.

use bevy::prelude::*;

use crate::keyvalues::EntityKeyValues;

/// World settings entity, first to spawn; carries the schema version.
pub const CLASSNAME_WORLDSPAWN: &str = "worldspawn";
/// Generic trigger volume class used for every timer trigger.
pub const CLASSNAME_TRIGGER_MULTIPLE: &str = "trigger_multiple";
/// Marker class carrying course descriptors.
pub const CLASSNAME_COURSE_DESCRIPTOR: &str = "info_target_server_only";
/// Spawn-point marker class used for course start positions.
pub const CLASSNAME_TELEPORT_DESTINATION: &str = "info_teleport_destination";

/// Worldspawn key holding the mapping schema version.
pub const KEY_MAPPING_API_VERSION: &str = "timer_mapping_api_version";
/// Trigger key holding the numeric trigger type code.
pub const KEY_TRIGGER_TYPE: &str = "timer_trigger_type";
/// Flag marking an `info_target_server_only` as a course descriptor.
pub const KEY_IS_COURSE_DESCRIPTOR: &str = "timer_course_descriptor";

pub const KEY_COURSE_NUMBER: &str = "timer_course_number";
pub const KEY_COURSE_NAME: &str = "timer_course_name";
pub const KEY_COURSE_DISABLE_CHECKPOINT: &str = "timer_course_disable_checkpoint";

/// Back-reference from a zone trigger (or start marker) to its course
/// descriptor's targetname.
pub const KEY_ZONE_COURSE_DESCRIPTOR: &str = "timer_zone_course_descriptor";
pub const KEY_ZONE_SPLIT_NUMBER: &str = "timer_zone_split_number";
pub const KEY_ZONE_CHECKPOINT_NUMBER: &str = "timer_zone_checkpoint_number";
pub const KEY_ZONE_STAGE_NUMBER: &str = "timer_zone_stage_number";

pub const KEY_ANTI_BHOP_TIME: &str = "timer_anti_bhop_time";

pub const KEY_MODIFIER_DISABLE_PAUSE: &str = "timer_modifier_disable_pause";
pub const KEY_MODIFIER_DISABLE_CHECKPOINTS: &str = "timer_modifier_disable_checkpoints";
pub const KEY_MODIFIER_DISABLE_TELEPORTS: &str = "timer_modifier_disable_teleports";
pub const KEY_MODIFIER_DISABLE_JUMPSTATS: &str = "timer_modifier_disable_jumpstats";
pub const KEY_MODIFIER_ENABLE_SLIDE: &str = "timer_modifier_enable_slide";

pub const KEY_TELEPORT_DESTINATION: &str = "timer_teleport_destination";
pub const KEY_TELEPORT_DELAY: &str = "timer_teleport_delay";
pub const KEY_TELEPORT_USE_DEST_ANGLES: &str = "timer_teleport_use_dest_angles";
pub const KEY_TELEPORT_RESET_SPEED: &str = "timer_teleport_reset_speed";
pub const KEY_TELEPORT_REORIENT_PLAYER: &str = "timer_teleport_reorient_player";
pub const KEY_TELEPORT_RELATIVE: &str = "timer_teleport_relative";

/// Reserved trigger targetnames on maps predating the mapping schema.
pub const LEGACY_START_ZONE_NAME: &str = "timer_startzone";
pub const LEGACY_END_ZONE_NAME: &str = "timer_endzone";

/// Reserved targetname of the spawn-point marker bound to a course start.
pub const START_MARKER_NAME: &str = "timer_start";

/// Targetname of the implicit course synthesized for legacy maps.
pub const LEGACY_COURSE_TARGETNAME: &str = "timer_legacy_course";
/// Display name of the implicit course synthesized for legacy maps.
pub const LEGACY_COURSE_NAME: &str = "Main";

/// One element of a spawn batch: a live entity handle plus the keyvalues it
/// was compiled with.
///
/// The handle is *weak* - the catalog stores it for identity lookups only and
/// re-validates liveness against the ECS on every resolution, so a stale
/// batch can never resurrect a despawned entity.
#[derive(Debug, Clone)]
pub struct SpawnedEntity {
    /// Generational handle of the spawned entity.
    pub entity: Entity,
    /// The entity's compiled keyvalues.
    pub keyvalues: EntityKeyValues,
}

impl SpawnedEntity {
    /// Create a spawn-batch element.
    pub fn new(entity: Entity, keyvalues: EntityKeyValues) -> Self {
        Self { entity, keyvalues }
    }

    /// The entity's classname, or the empty string.
    pub fn classname(&self) -> &str {
        self.keyvalues.classname()
    }

    /// Case-insensitive targetname comparison, engine style.
    pub fn name_matches(&self, name: &str) -> bool {
        self.keyvalues.targetname().eq_ignore_ascii_case(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_matches_is_case_insensitive() {
        let ent = SpawnedEntity::new(
            Entity::PLACEHOLDER,
            EntityKeyValues::new().with("targetname", "Timer_StartZone"),
        );
        assert!(ent.name_matches(LEGACY_START_ZONE_NAME));
        assert!(!ent.name_matches(LEGACY_END_ZONE_NAME));
    }

    #[test]
    fn test_classname_passthrough() {
        let ent = SpawnedEntity::new(
            Entity::PLACEHOLDER,
            EntityKeyValues::new().with("classname", CLASSNAME_TRIGGER_MULTIPLE),
        );
        assert_eq!(ent.classname(), CLASSNAME_TRIGGER_MULTIPLE);
    }
}

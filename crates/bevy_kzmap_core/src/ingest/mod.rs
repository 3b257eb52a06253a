//! Two-pass ingestion of spawned map entities.
//!
//! The ordering dependency between the passes is deliberate API surface:
//! pass 1 ([`MapApiData::ingest_primary`]) records triggers and course
//! descriptors, pass 2 ([`MapApiData::ingest_secondary`]) binds start
//! positions onto courses that must already exist. Hosts call them in that
//! order over the same batch.
//!
//! Both passes accumulate diagnostics instead of failing: however many
//! entities are malformed, a pass always completes.

pub(crate) mod course;
pub(crate) mod trigger;

use bevy::prelude::*;

use bevy_kzmap_entities::keyvalues::EntityKeyValues;
use bevy_kzmap_entities::spawn::{
    CLASSNAME_COURSE_DESCRIPTOR, CLASSNAME_TELEPORT_DESTINATION, CLASSNAME_TRIGGER_MULTIPLE,
    CLASSNAME_WORLDSPAWN, KEY_MAPPING_API_VERSION, SpawnedEntity,
};

use crate::catalog::MapApiData;
use crate::errors::MapApiError;
use crate::version::{MapApiVersion, NO_MAPPING_API_VERSION};

impl MapApiData {
    /// Version gate, run once per load over the complete keyvalue set of the
    /// loading spawn group, before any entity exists.
    ///
    /// Starts by forgetting everything from the previous load, so stale data
    /// can never leak across maps. Then reads the schema version off the
    /// `worldspawn` bag: the supported version proceeds normally, an absent
    /// one enables legacy-compat mode, and anything else latches the fatal
    /// flag for the remainder of the load.
    pub fn apply_spawn_group(&mut self, keyvalues: &[EntityKeyValues]) {
        // The load window is owned by the round lifecycle, not the gate.
        let window_open = self.round_is_starting;
        *self = Self::default();
        self.round_is_starting = window_open;

        let raw = keyvalues
            .iter()
            .find(|kv| kv.classname().eq_ignore_ascii_case(CLASSNAME_WORLDSPAWN))
            .map(|world| world.get_i32(KEY_MAPPING_API_VERSION, NO_MAPPING_API_VERSION))
            .unwrap_or(NO_MAPPING_API_VERSION);

        self.version = MapApiVersion::from_raw(raw);
        match self.version {
            MapApiVersion::NoApi => {
                warn!("Map is not compiled with the Mapping API. Reverting to legacy behavior.");
            }
            MapApiVersion::Current => {}
            MapApiVersion::Unsupported(version) => {
                error!("Unsupported Mapping API version {version}, dropping all map data");
                self.errors
                    .record(MapApiError::UnsupportedVersion { version });
                self.fatal_failure = true;
            }
        }
    }

    /// Ingestion pass 1: classify every trigger volume and course descriptor
    /// in the batch. No-op (beyond keeping the catalogs wiped) while the
    /// fatal latch is set.
    pub fn ingest_primary(&mut self, batch: &[SpawnedEntity]) {
        if self.fatal_failure {
            self.wipe();
            return;
        }
        for spawned in batch {
            let classname = spawned.classname();
            if classname.eq_ignore_ascii_case(CLASSNAME_TRIGGER_MULTIPLE) {
                trigger::classify_trigger(self, spawned);
            } else if classname.eq_ignore_ascii_case(CLASSNAME_COURSE_DESCRIPTOR) {
                course::classify_course_descriptor(self, spawned);
            }
        }
    }

    /// Ingestion pass 2: bind `timer_start` markers onto the courses
    /// recorded by pass 1. No-op (beyond keeping the catalogs wiped) while
    /// the fatal latch is set.
    pub fn ingest_secondary(&mut self, batch: &[SpawnedEntity]) {
        if self.fatal_failure {
            self.wipe();
            return;
        }
        for spawned in batch {
            if spawned
                .classname()
                .eq_ignore_ascii_case(CLASSNAME_TELEPORT_DESTINATION)
            {
                course::bind_start_position(self, spawned);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worldspawn(version: Option<i32>) -> EntityKeyValues {
        let kv = EntityKeyValues::new().with("classname", "worldspawn");
        match version {
            Some(v) => kv.with(KEY_MAPPING_API_VERSION, v.to_string()),
            None => kv,
        }
    }

    #[test]
    fn test_gate_reads_current_version() {
        let mut data = MapApiData::default();
        data.apply_spawn_group(&[worldspawn(Some(1))]);
        assert_eq!(data.api_version(), MapApiVersion::Current);
        assert!(!data.has_fatal_failure());
    }

    #[test]
    fn test_gate_defaults_to_legacy() {
        let mut data = MapApiData::default();
        data.apply_spawn_group(&[worldspawn(None)]);
        assert_eq!(data.api_version(), MapApiVersion::NoApi);

        // A batch without any worldspawn behaves the same way.
        data.apply_spawn_group(&[]);
        assert_eq!(data.api_version(), MapApiVersion::NoApi);
        assert!(!data.has_fatal_failure());
    }

    #[test]
    fn test_gate_latches_fatal_on_unsupported_version() {
        let mut data = MapApiData::default();
        data.apply_spawn_group(&[worldspawn(Some(999))]);
        assert_eq!(data.api_version(), MapApiVersion::Unsupported(999));
        assert!(data.has_fatal_failure());
        assert_eq!(data.errors().entries().len(), 1);
    }

    #[test]
    fn test_gate_resets_previous_load() {
        let mut data = MapApiData::default();
        data.reset_for_load();
        data.apply_spawn_group(&[worldspawn(Some(999))]);
        assert!(data.has_fatal_failure());

        // The next map's gate starts from a clean slate and keeps the
        // already-open load window.
        data.apply_spawn_group(&[worldspawn(Some(1))]);
        assert!(!data.has_fatal_failure());
        assert!(!data.errors().has_pending());
        assert!(data.is_load_window_open());
    }

    #[test]
    fn test_passes_are_noops_under_fatal_latch() {
        let mut world = World::new();
        let entity = world.spawn_empty().id();

        let mut data = MapApiData::default();
        data.reset_for_load();
        data.apply_spawn_group(&[worldspawn(Some(999))]);

        let batch = vec![SpawnedEntity::new(
            entity,
            EntityKeyValues::new()
                .with("classname", "trigger_multiple")
                .with("timer_trigger_type", "2"),
        )];
        data.ingest_primary(&batch);
        data.ingest_secondary(&batch);
        assert!(data.triggers().is_empty());
        assert!(data.courses().is_empty());
    }
}

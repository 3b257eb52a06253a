//! Pass-1 course-descriptor extraction and pass-2 start-position binding.

use bevy_kzmap_entities::spawn::{
    KEY_COURSE_DISABLE_CHECKPOINT, KEY_COURSE_NAME, KEY_COURSE_NUMBER, KEY_IS_COURSE_DESCRIPTOR,
    KEY_ZONE_COURSE_DESCRIPTOR, LEGACY_COURSE_TARGETNAME, START_MARKER_NAME, SpawnedEntity,
};

use crate::catalog::MapApiData;
use crate::catalog::course::{CourseDescriptor, INVALID_COURSE_NUMBER};
use crate::errors::MapApiError;
use crate::version::MapApiVersion;

/// Extract a course descriptor from an `info_target_server_only`, or queue a
/// diagnostic and drop it. Targets without the descriptor flag are somebody
/// else's markers and are skipped silently.
pub(crate) fn classify_course_descriptor(data: &mut MapApiData, spawned: &SpawnedEntity) {
    let kv = &spawned.keyvalues;
    if !kv.get_bool(KEY_IS_COURSE_DESCRIPTOR) {
        return;
    }

    let hammer_id = kv.hammer_id();
    let origin = kv.origin();

    if !data.is_load_window_open() {
        data.errors.record(MapApiError::CourseAfterLoad {
            hammer_id,
            origin: origin.into(),
        });
        return;
    }

    let number = kv.get_i32(KEY_COURSE_NUMBER, INVALID_COURSE_NUMBER);
    if number <= INVALID_COURSE_NUMBER {
        data.errors.record(MapApiError::InvalidCourseNumber {
            hammer_id,
            origin: origin.into(),
        });
        return;
    }

    let name = kv.get_str(KEY_COURSE_NAME);
    if name.is_empty() {
        data.errors.record(MapApiError::EmptyCourseName {
            number,
            hammer_id,
            origin: origin.into(),
        });
        return;
    }

    let targetname = kv.targetname();
    if targetname.is_empty() {
        data.errors.record(MapApiError::EmptyCourseTargetname {
            name: name.to_string(),
            number,
            hammer_id,
            origin: origin.into(),
        });
        return;
    }

    let disable_checkpoints = kv.get_bool(KEY_COURSE_DISABLE_CHECKPOINT);
    data.create_course(CourseDescriptor::new(
        number,
        name,
        targetname,
        hammer_id,
        disable_checkpoints,
    ));
}

/// Bind a `timer_start` marker's transform onto its course. Other teleport
/// destinations are ordinary map entities and are skipped silently.
pub(crate) fn bind_start_position(data: &mut MapApiData, spawned: &SpawnedEntity) {
    if !spawned.name_matches(START_MARKER_NAME) {
        return;
    }

    let kv = &spawned.keyvalues;
    match data.api_version() {
        MapApiVersion::NoApi => {
            // Legacy maps have at most the implicit course; a missing one
            // just means the map never declared legacy zones.
            data.set_start_position(LEGACY_COURSE_TARGETNAME, kv.origin(), kv.angles());
        }
        MapApiVersion::Current => {
            let descriptor = kv.get_str(KEY_ZONE_COURSE_DESCRIPTOR);
            if descriptor.is_empty() {
                data.errors.record(MapApiError::EmptyStartPositionDescriptor {
                    hammer_id: kv.hammer_id(),
                    origin: kv.origin().into(),
                });
                return;
            }
            if !data.set_start_position(descriptor, kv.origin(), kv.angles()) {
                data.errors.record(MapApiError::StartPositionCourseMissing {
                    descriptor: descriptor.to_string(),
                    hammer_id: kv.hammer_id(),
                    origin: kv.origin().into(),
                });
            }
        }
        // Unreachable in practice: pass 2 is a no-op under the fatal latch.
        MapApiVersion::Unsupported(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::prelude::*;
    use bevy_kzmap_entities::keyvalues::EntityKeyValues;

    fn fresh_data(raw_version: i32) -> MapApiData {
        let mut data = MapApiData::default();
        data.reset_for_load();
        let worldspawn = EntityKeyValues::new()
            .with("classname", "worldspawn")
            .with("timer_mapping_api_version", raw_version.to_string());
        data.apply_spawn_group(std::slice::from_ref(&worldspawn));
        data
    }

    fn descriptor_kv(number: i32, name: &str, targetname: &str) -> EntityKeyValues {
        EntityKeyValues::new()
            .with("classname", "info_target_server_only")
            .with(KEY_IS_COURSE_DESCRIPTOR, "true")
            .with(KEY_COURSE_NUMBER, number.to_string())
            .with(KEY_COURSE_NAME, name)
            .with("targetname", targetname)
            .with("hammerUniqueId", "7")
    }

    fn start_marker_kv(descriptor: &str) -> EntityKeyValues {
        EntityKeyValues::new()
            .with("classname", "info_teleport_destination")
            .with("targetname", START_MARKER_NAME)
            .with(KEY_ZONE_COURSE_DESCRIPTOR, descriptor)
            .with("origin", "32 64 128")
            .with("angles", "0 90 0")
    }

    fn spawned(world: &mut World, kv: EntityKeyValues) -> SpawnedEntity {
        SpawnedEntity::new(world.spawn_empty().id(), kv)
    }

    #[test]
    fn test_valid_descriptor_creates_course() {
        let mut world = World::new();
        let mut data = fresh_data(1);
        classify_course_descriptor(&mut data, &spawned(&mut world, descriptor_kv(1, "Main", "c1")));
        let course = data.first_course().expect("course created");
        assert_eq!((course.number, course.hammer_id), (1, 7));
        assert_eq!(course.name, "Main");
        assert!(!data.errors().has_pending());
    }

    #[test]
    fn test_unflagged_target_is_skipped_silently() {
        let mut world = World::new();
        let mut data = fresh_data(1);
        let kv = descriptor_kv(1, "Main", "c1").with(KEY_IS_COURSE_DESCRIPTOR, "0");
        classify_course_descriptor(&mut data, &spawned(&mut world, kv));
        assert_eq!(data.course_count(), 0);
        assert!(!data.errors().has_pending());
    }

    #[test]
    fn test_each_missing_field_aborts_with_error() {
        let mut world = World::new();
        let mut data = fresh_data(1);
        classify_course_descriptor(&mut data, &spawned(&mut world, descriptor_kv(0, "Main", "c1")));
        classify_course_descriptor(&mut data, &spawned(&mut world, descriptor_kv(1, "", "c1")));
        classify_course_descriptor(&mut data, &spawned(&mut world, descriptor_kv(1, "Main", "")));
        assert_eq!(data.course_count(), 0);
        assert_eq!(data.errors().entries().len(), 3);
    }

    #[test]
    fn test_descriptor_outside_load_window_is_rejected() {
        let mut world = World::new();
        let mut data = fresh_data(1);
        data.finalize_courses();
        classify_course_descriptor(&mut data, &spawned(&mut world, descriptor_kv(1, "Main", "c1")));
        assert_eq!(data.course_count(), 0);
        assert_eq!(data.errors().entries().len(), 1);
    }

    #[test]
    fn test_start_marker_binds_course_start() {
        let mut world = World::new();
        let mut data = fresh_data(1);
        classify_course_descriptor(&mut data, &spawned(&mut world, descriptor_kv(1, "Main", "c1")));
        bind_start_position(&mut data, &spawned(&mut world, start_marker_kv("C1")));

        let start = data.first_course().unwrap().start_position.expect("bound");
        assert_eq!(start.origin, Vec3::new(32.0, 64.0, 128.0));
        assert_eq!(start.angles, Vec3::new(0.0, 90.0, 0.0));
    }

    #[test]
    fn test_unresolvable_start_marker_is_reported() {
        let mut world = World::new();
        let mut data = fresh_data(1);
        bind_start_position(&mut data, &spawned(&mut world, start_marker_kv("nope")));
        assert_eq!(data.errors().entries().len(), 1);

        bind_start_position(&mut data, &spawned(&mut world, start_marker_kv("")));
        assert_eq!(data.errors().entries().len(), 2);
    }

    #[test]
    fn test_other_destinations_are_ignored() {
        let mut world = World::new();
        let mut data = fresh_data(1);
        let kv = start_marker_kv("c1").with("targetname", "landmark_teleport");
        bind_start_position(&mut data, &spawned(&mut world, kv));
        assert!(!data.errors().has_pending());
    }

    #[test]
    fn test_legacy_start_marker_binds_implicit_course() {
        let mut world = World::new();
        let mut data = fresh_data(-1);
        data.create_course(CourseDescriptor::legacy());
        let kv = start_marker_kv("").with(KEY_ZONE_COURSE_DESCRIPTOR, "");
        bind_start_position(&mut data, &spawned(&mut world, kv));
        assert!(data.first_course().unwrap().start_position.is_some());
        assert!(!data.errors().has_pending());
    }
}

//! The map-data catalog: trigger and course records plus the query surface.

pub mod course;
pub mod trigger;

use bevy::ecs::entity::Entities;
use bevy::prelude::*;

use crate::errors::{ErrorLog, MapApiError};
use crate::version::MapApiVersion;
use self::course::CourseDescriptor;
use self::trigger::KzTrigger;

/// Trigger catalog capacity. A bounded per-map entity count is part of the
/// contract; overflow drops the entity and raises a standing flag.
pub const MAX_TRIGGERS: usize = 2048;

/// Course catalog capacity.
pub const MAX_COURSES: usize = 512;

/// Everything the timer knows about the current map, with a lifetime of
/// exactly one load.
///
/// All mutation happens inside the load/round lifecycle (see
/// [`ingest`](crate::ingest) and [`validate`](crate::validate)); the touch
/// path and gameplay code only ever read it. Both catalogs are pre-allocated
/// and never grow past their capacity.
#[derive(Resource, Debug)]
pub struct MapApiData {
    pub(crate) triggers: Vec<KzTrigger>,
    pub(crate) courses: Vec<CourseDescriptor>,
    pub(crate) version: MapApiVersion,
    /// One-way latch: an unsupported schema version keeps the catalog empty
    /// for the remainder of the load.
    pub(crate) fatal_failure: bool,
    /// Entities are only admitted while the round-starting window is open.
    pub(crate) round_is_starting: bool,
    pub(crate) errors: ErrorLog,
}

impl Default for MapApiData {
    fn default() -> Self {
        Self {
            triggers: Vec::with_capacity(MAX_TRIGGERS),
            courses: Vec::with_capacity(MAX_COURSES),
            version: MapApiVersion::default(),
            fatal_failure: false,
            round_is_starting: false,
            errors: ErrorLog::default(),
        }
    }
}

impl MapApiData {
    /// The schema version snapshot of the current load.
    pub fn api_version(&self) -> MapApiVersion {
        self.version
    }

    /// Whether the load was aborted by an unsupported schema version.
    pub fn has_fatal_failure(&self) -> bool {
        self.fatal_failure
    }

    /// Whether the round-starting window is open, i.e. spawned entities are
    /// still admitted.
    pub fn is_load_window_open(&self) -> bool {
        self.round_is_starting
    }

    /// All trigger records of the current map.
    pub fn triggers(&self) -> &[KzTrigger] {
        &self.triggers
    }

    /// All course records of the current map.
    pub fn courses(&self) -> &[CourseDescriptor] {
        &self.courses
    }

    /// Number of courses in the catalog.
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// The first course in catalog order, if any.
    pub fn first_course(&self) -> Option<&CourseDescriptor> {
        self.courses.first()
    }

    /// Look up a course by its display name, case-insensitive.
    pub fn course_by_name(&self, name: &str) -> Option<&CourseDescriptor> {
        self.courses
            .iter()
            .find(|course| course.name.eq_ignore_ascii_case(name))
    }

    /// Look up a course by the targetname zone triggers reference,
    /// case-insensitive. An empty key never matches.
    pub fn course_by_targetname(&self, targetname: &str) -> Option<&CourseDescriptor> {
        if targetname.is_empty() {
            return None;
        }
        self.courses
            .iter()
            .find(|course| course.targetname.eq_ignore_ascii_case(targetname))
    }

    /// Resolve a live trigger handle to its record.
    ///
    /// The handle is re-validated against the ECS first: a despawned or
    /// recycled entity resolves to `None`, never to a stale record.
    pub fn find_trigger(&self, handle: Entity, entities: &Entities) -> Option<&KzTrigger> {
        if !entities.contains(handle) {
            return None;
        }
        self.triggers.iter().find(|trigger| trigger.entity == handle)
    }

    /// Whether the handle resolves to one of the five timer-zone kinds.
    pub fn is_timer_zone(&self, handle: Entity, entities: &Entities) -> bool {
        self.find_trigger(handle, entities)
            .is_some_and(|trigger| trigger.kind.is_zone())
    }

    /// The load diagnostics accumulated so far.
    pub fn errors(&self) -> &ErrorLog {
        &self.errors
    }

    /// Open the round-starting window and forget the previous round's map
    /// data. The version gate's verdict is owned by
    /// [`apply_spawn_group`](Self::apply_spawn_group) and survives this
    /// reset, so the fatal latch stays one-way within a load whatever order
    /// the host delivers its lifecycle callbacks in.
    pub fn reset_for_load(&mut self) {
        self.triggers.clear();
        self.courses.clear();
        self.errors.clear();
        self.round_is_starting = true;
    }

    /// Drop both catalogs. Used by the fatal-version short circuit.
    pub(crate) fn wipe(&mut self) {
        self.triggers.clear();
        self.courses.clear();
    }

    /// Append a trigger record, dropping it with a standing flag once the
    /// catalog is full.
    pub(crate) fn add_trigger(&mut self, trigger: KzTrigger) {
        if self.triggers.len() >= MAX_TRIGGERS {
            self.errors.too_many_triggers = true;
            return;
        }
        self.triggers.push(trigger);
    }

    /// Insert a course after checking every uniqueness invariant: authoring
    /// id, display name, number and targetname must all be unique. The
    /// duplicate is rejected and reported - except for the legacy implicit
    /// course, which both reserved zone names legitimately try to create.
    pub(crate) fn create_course(&mut self, course: CourseDescriptor) {
        for existing in &self.courses {
            if existing.hammer_id == course.hammer_id {
                if course.hammer_id != -1 {
                    self.errors.record(MapApiError::DuplicateCourseHammerId {
                        hammer_id: course.hammer_id,
                    });
                }
                return;
            }
            if existing.name.eq_ignore_ascii_case(&course.name) {
                self.errors.record(MapApiError::DuplicateCourseName {
                    name: course.name.clone(),
                    other_hammer_id: existing.hammer_id,
                });
                return;
            }
            if existing.number == course.number {
                self.errors.record(MapApiError::DuplicateCourseNumber {
                    number: course.number,
                    other_hammer_id: existing.hammer_id,
                });
                return;
            }
            if existing.targetname.eq_ignore_ascii_case(&course.targetname) {
                self.errors.record(MapApiError::DuplicateCourseTargetname {
                    targetname: course.targetname.clone(),
                    other_hammer_id: existing.hammer_id,
                });
                return;
            }
        }
        if self.courses.len() >= MAX_COURSES {
            self.errors.too_many_courses = true;
            return;
        }
        self.courses.push(course);
    }

    /// Bind a start transform onto the course with the given targetname.
    /// `false` when no such course exists.
    pub(crate) fn set_start_position(
        &mut self,
        targetname: &str,
        origin: Vec3,
        angles: Vec3,
    ) -> bool {
        match self
            .courses
            .iter_mut()
            .find(|course| course.targetname.eq_ignore_ascii_case(targetname))
        {
            Some(course) => {
                course.set_start_position(origin, angles);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::trigger::{TriggerKind, TriggerPayload};

    fn course(
        number: i32,
        name: impl Into<String>,
        targetname: impl Into<String>,
        hammer_id: i32,
    ) -> CourseDescriptor {
        CourseDescriptor::new(number, name, targetname, hammer_id, false)
    }

    #[test]
    fn test_create_course_accepts_distinct_courses() {
        let mut data = MapApiData::default();
        data.create_course(course(1, "Main", "c1", 10));
        data.create_course(course(2, "Bonus", "c2", 11));
        assert_eq!(data.course_count(), 2);
        assert!(!data.errors().has_pending());
    }

    #[test]
    fn test_duplicate_targetname_rejected_case_insensitive() {
        let mut data = MapApiData::default();
        data.create_course(course(1, "Main", "c1", 10));
        data.create_course(course(2, "Bonus", "C1", 11));
        assert_eq!(data.course_count(), 1);
        assert_eq!(data.first_course().unwrap().name, "Main");
        assert_eq!(data.errors().entries().len(), 1);
    }

    #[test]
    fn test_duplicate_name_number_and_id_rejected() {
        let mut data = MapApiData::default();
        data.create_course(course(1, "Main", "c1", 10));
        data.create_course(course(2, "MAIN", "c2", 11));
        data.create_course(course(1, "Bonus", "c3", 12));
        data.create_course(course(3, "Extra", "c4", 10));
        assert_eq!(data.course_count(), 1);
        assert_eq!(data.errors().entries().len(), 3);
    }

    #[test]
    fn test_legacy_duplicate_stays_silent() {
        let mut data = MapApiData::default();
        data.create_course(CourseDescriptor::legacy());
        data.create_course(CourseDescriptor::legacy());
        assert_eq!(data.course_count(), 1);
        assert!(!data.errors().has_pending());
    }

    #[test]
    fn test_course_overflow_sets_standing_flag() {
        let mut data = MapApiData::default();
        for i in 0..=MAX_COURSES as i32 {
            data.create_course(course(i + 1, format!("Course {i}"), format!("c{i}"), i));
        }
        assert_eq!(data.course_count(), MAX_COURSES);
        assert!(data.errors().too_many_courses);
    }

    #[test]
    fn test_trigger_overflow_sets_standing_flag() {
        let mut data = MapApiData::default();
        for i in 0..=MAX_TRIGGERS as i32 {
            data.add_trigger(KzTrigger {
                kind: TriggerKind::ResetCheckpoints,
                entity: Entity::PLACEHOLDER,
                hammer_id: i,
                origin: Vec3::ZERO,
                payload: TriggerPayload::None,
            });
        }
        assert_eq!(data.triggers().len(), MAX_TRIGGERS);
        assert!(data.errors().too_many_triggers);
    }

    #[test]
    fn test_course_lookups() {
        let mut data = MapApiData::default();
        data.create_course(course(1, "Main", "c1", 10));
        assert!(data.course_by_name("main").is_some());
        assert!(data.course_by_name("Bonus").is_none());
        assert!(data.course_by_targetname("C1").is_some());
        assert!(data.course_by_targetname("").is_none());
    }

    #[test]
    fn test_find_trigger_checks_liveness_and_identity() {
        let mut world = World::new();
        let live = world.spawn_empty().id();
        let doomed = world.spawn_empty().id();

        let mut data = MapApiData::default();
        for entity in [live, doomed] {
            data.add_trigger(KzTrigger {
                kind: TriggerKind::ZoneStart,
                entity,
                hammer_id: 1,
                origin: Vec3::ZERO,
                payload: TriggerPayload::Zone(Default::default()),
            });
        }

        world.despawn(doomed);
        // Reuse the slot: the recycled handle has a new generation.
        let recycled = world.spawn_empty().id();

        assert!(data.find_trigger(live, world.entities()).is_some());
        assert!(data.find_trigger(doomed, world.entities()).is_none());
        assert!(data.find_trigger(recycled, world.entities()).is_none());
    }

    #[test]
    fn test_is_timer_zone() {
        let mut world = World::new();
        let zone = world.spawn_empty().id();
        let teleport = world.spawn_empty().id();

        let mut data = MapApiData::default();
        data.add_trigger(KzTrigger {
            kind: TriggerKind::ZoneEnd,
            entity: zone,
            hammer_id: 1,
            origin: Vec3::ZERO,
            payload: TriggerPayload::Zone(Default::default()),
        });
        data.add_trigger(KzTrigger {
            kind: TriggerKind::Teleport,
            entity: teleport,
            hammer_id: 2,
            origin: Vec3::ZERO,
            payload: TriggerPayload::Teleport(Default::default()),
        });

        assert!(data.is_timer_zone(zone, world.entities()));
        assert!(!data.is_timer_zone(teleport, world.entities()));
    }

    #[test]
    fn test_reset_for_load_clears_data_and_opens_window() {
        let mut data = MapApiData::default();
        data.create_course(course(1, "Main", "c1", 10));
        data.errors.too_many_triggers = true;
        data.reset_for_load();
        assert_eq!(data.course_count(), 0);
        assert!(!data.errors().has_pending());
        assert!(data.is_load_window_open());
    }
}

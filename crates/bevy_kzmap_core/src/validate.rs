//! Round-start consistency validation of the course catalog.

use crate::catalog::MapApiData;
use crate::catalog::trigger::{TriggerKind, TriggerPayload};
use crate::errors::MapApiError;

/// Per-course ceiling on split zones.
pub const MAX_SPLIT_ZONES: i32 = 100;
/// Per-course ceiling on checkpoint zones.
pub const MAX_CHECKPOINT_ZONES: i32 = 100;
/// Per-course ceiling on stage zones.
pub const MAX_STAGE_ZONES: i32 = 100;

/// Running tally of one zone kind for one course.
///
/// XORing each zone number against a running 1..=n counter leaves zero
/// exactly when the numbers are a permutation of 1..=n, i.e. consecutive and
/// starting at 1 (<https://florian.github.io/xor-trick/>).
#[derive(Debug, Clone, Copy, Default)]
struct ZoneTally {
    count: i32,
    fingerprint: i32,
}

impl ZoneTally {
    fn add(&mut self, number: i32) {
        self.count += 1;
        self.fingerprint ^= self.count ^ number;
    }
}

impl MapApiData {
    /// Close the load window and validate every course against its zones.
    ///
    /// For each course, each of the split/checkpoint/stage number sets must
    /// be exactly `1..=N` under the per-kind ceiling; any violation removes
    /// the course from the catalog entirely, leaving its zones orphaned
    /// (their course resolution fails and is reported at touch time).
    /// Survivors get their zone counts written back.
    // TODO: also require at least one start and one end zone per course.
    pub fn finalize_courses(&mut self) {
        self.round_is_starting = false;

        let mut index = 0;
        while index < self.courses.len() {
            let course_name = self.courses[index].name.clone();
            let course_targetname = self.courses[index].targetname.clone();

            let mut splits = ZoneTally::default();
            let mut checkpoints = ZoneTally::default();
            let mut stages = ZoneTally::default();
            for trigger in &self.triggers {
                let TriggerPayload::Zone(zone) = &trigger.payload else {
                    continue;
                };
                if !zone.course_descriptor.eq_ignore_ascii_case(&course_targetname) {
                    continue;
                }
                match trigger.kind {
                    TriggerKind::ZoneSplit => splits.add(zone.number),
                    TriggerKind::ZoneCheckpoint => checkpoints.add(zone.number),
                    TriggerKind::ZoneStage => stages.add(zone.number),
                    _ => {}
                }
            }

            let mut valid = true;
            for (tally, kind_label, max) in [
                (splits, "Split", MAX_SPLIT_ZONES),
                (checkpoints, "Checkpoint", MAX_CHECKPOINT_ZONES),
                (stages, "Stage", MAX_STAGE_ZONES),
            ] {
                if tally.fingerprint != 0 {
                    self.errors.record(MapApiError::NonContiguousZones {
                        course: course_name.clone(),
                        kind_label,
                    });
                    valid = false;
                }
                if tally.count > max {
                    self.errors.record(MapApiError::TooManyZones {
                        course: course_name.clone(),
                        kind_label,
                        max,
                    });
                    valid = false;
                }
            }

            if !valid {
                // Swap-remove shifts the last course into this slot, so the
                // working index stays put.
                self.courses.swap_remove(index);
                continue;
            }

            let course = &mut self.courses[index];
            course.split_count = splits.count;
            course.checkpoint_count = checkpoints.count;
            course.stage_count = stages.count;
            index += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::prelude::*;

    use crate::catalog::course::CourseDescriptor;
    use crate::catalog::trigger::{KzTrigger, ZoneProps};

    fn zone(kind: TriggerKind, course: &str, number: i32) -> KzTrigger {
        KzTrigger {
            kind,
            entity: Entity::PLACEHOLDER,
            hammer_id: number,
            origin: Vec3::ZERO,
            payload: TriggerPayload::Zone(ZoneProps {
                course_descriptor: course.to_string(),
                number,
            }),
        }
    }

    fn data_with_course(targetname: &str) -> MapApiData {
        let mut data = MapApiData::default();
        data.reset_for_load();
        data.create_course(CourseDescriptor::new(1, "Main", targetname, 10, false));
        data
    }

    #[test]
    fn test_contiguous_numbers_survive_with_counts() {
        let mut data = data_with_course("c1");
        // Catalog order should not matter, only the number set.
        for number in [2, 1, 3] {
            data.add_trigger(zone(TriggerKind::ZoneSplit, "c1", number));
        }
        data.add_trigger(zone(TriggerKind::ZoneStage, "C1", 1));
        data.finalize_courses();

        let course = data.first_course().expect("course survives");
        assert_eq!(course.split_count, 3);
        assert_eq!(course.checkpoint_count, 0);
        assert_eq!(course.stage_count, 1);
        assert!(!data.errors().has_pending());
        assert!(!data.is_load_window_open());
    }

    #[test]
    fn test_duplicate_number_removes_course() {
        let mut data = data_with_course("c1");
        data.add_trigger(zone(TriggerKind::ZoneSplit, "c1", 1));
        data.add_trigger(zone(TriggerKind::ZoneSplit, "c1", 1));
        data.finalize_courses();

        assert_eq!(data.course_count(), 0);
        assert!(data.course_by_targetname("c1").is_none());
        assert_eq!(data.errors().entries().len(), 1);
        // The orphaned zones stay in the trigger catalog.
        assert_eq!(data.triggers().len(), 2);
    }

    #[test]
    fn test_gap_removes_course() {
        let mut data = data_with_course("c1");
        for number in [1, 3] {
            data.add_trigger(zone(TriggerKind::ZoneCheckpoint, "c1", number));
        }
        data.finalize_courses();
        assert_eq!(data.course_count(), 0);
    }

    #[test]
    fn test_not_starting_at_one_removes_course() {
        let mut data = data_with_course("c1");
        for number in [2, 3] {
            data.add_trigger(zone(TriggerKind::ZoneStage, "c1", number));
        }
        data.finalize_courses();
        assert_eq!(data.course_count(), 0);
    }

    #[test]
    fn test_ceiling_removes_course() {
        let mut data = data_with_course("c1");
        for number in 1..=MAX_SPLIT_ZONES + 1 {
            data.add_trigger(zone(TriggerKind::ZoneSplit, "c1", number));
        }
        data.finalize_courses();
        assert_eq!(data.course_count(), 0);
        assert!(
            data.errors()
                .entries()
                .iter()
                .any(|message| message.contains("Too many Split zones"))
        );
    }

    #[test]
    fn test_courses_validate_independently() {
        let mut data = data_with_course("c1");
        data.create_course(CourseDescriptor::new(2, "Bonus", "c2", 11, false));
        data.create_course(CourseDescriptor::new(3, "Extra", "c3", 12, false));
        // c1 is fine, c2 is broken, c3 is fine.
        data.add_trigger(zone(TriggerKind::ZoneSplit, "c1", 1));
        data.add_trigger(zone(TriggerKind::ZoneSplit, "c2", 5));
        data.add_trigger(zone(TriggerKind::ZoneSplit, "c3", 1));
        data.add_trigger(zone(TriggerKind::ZoneSplit, "c3", 2));
        data.finalize_courses();

        assert_eq!(data.course_count(), 2);
        assert!(data.course_by_targetname("c2").is_none());
        assert_eq!(data.course_by_targetname("c1").unwrap().split_count, 1);
        assert_eq!(data.course_by_targetname("c3").unwrap().split_count, 2);
    }

    #[test]
    fn test_start_end_zones_do_not_affect_tallies() {
        let mut data = data_with_course("c1");
        data.add_trigger(zone(TriggerKind::ZoneStart, "c1", 0));
        data.add_trigger(zone(TriggerKind::ZoneEnd, "c1", 0));
        data.finalize_courses();
        let course = data.first_course().expect("course survives");
        assert_eq!(
            (course.split_count, course.checkpoint_count, course.stage_count),
            (0, 0, 0)
        );
    }
}

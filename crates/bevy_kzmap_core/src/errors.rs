//! Diagnostic taxonomy and the bounded load-error accumulator.
//!
//! Map-data problems never propagate as failures: ingestion and validation
//! always run to completion and queue a human-readable diagnostic per
//! offending entity instead. The accumulated diagnostics are re-broadcast on
//! a fixed interval until the next load resets the log, so operators keep
//! seeing a broken map until it is fixed.

use std::fmt;

use bevy::prelude::*;
use thiserror::Error;

use crate::catalog::trigger::TriggerKind;
use crate::version::MAPPING_API_VERSION;

/// Maximum number of diagnostics kept per load. The final slot is reserved
/// for the overflow sentinel.
pub const MAX_ERROR_ENTRIES: usize = 32;

const OVERFLOW_SENTINEL: &str = "Too many errors to list!";

/// World position of an offending entity, formatted the way designers see it
/// in the editor: whole units, space separated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityOrigin(pub Vec3);

impl fmt::Display for EntityOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.0} {:.0} {:.0})", self.0.x, self.0.y, self.0.z)
    }
}

impl From<Vec3> for EntityOrigin {
    fn from(origin: Vec3) -> Self {
        Self(origin)
    }
}

/// Everything that can go wrong with map data, one variant per diagnostic.
///
/// The `Display` rendering is the operator-facing message; authoring ids and
/// world positions identify the offending map object.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapApiError {
    #[error(
        "Trigger type {code} is invalid and out of range (0-13) for trigger with Hammer ID {hammer_id}, origin {origin}!"
    )]
    InvalidTriggerType {
        code: i32,
        hammer_id: i32,
        origin: EntityOrigin,
    },

    #[error(
        "{kind} trigger spawned after the map was loaded, the trigger won't be loaded! Hammer ID {hammer_id}, origin {origin}"
    )]
    TriggerAfterLoad {
        kind: TriggerKind,
        hammer_id: i32,
        origin: EntityOrigin,
    },

    #[error(
        "Course spawned after the map was loaded, the course will be ignored! Hammer ID {hammer_id}, origin {origin}"
    )]
    CourseAfterLoad {
        hammer_id: i32,
        origin: EntityOrigin,
    },

    #[error(
        "Course descriptor targetname of {kind} trigger is empty! Hammer ID {hammer_id}, origin {origin}"
    )]
    EmptyCourseDescriptor {
        kind: TriggerKind,
        hammer_id: i32,
        origin: EntityOrigin,
    },

    #[error("{kind} number \"{number}\" is invalid! Hammer ID {hammer_id}, origin {origin}")]
    InvalidZoneNumber {
        kind: TriggerKind,
        number: i32,
        hammer_id: i32,
        origin: EntityOrigin,
    },

    #[error(
        "Course number must be bigger than 0! Course descriptor Hammer ID {hammer_id}, origin {origin}"
    )]
    InvalidCourseNumber {
        hammer_id: i32,
        origin: EntityOrigin,
    },

    #[error(
        "Course name is empty! Course number {number}. Course descriptor Hammer ID {hammer_id}, origin {origin}"
    )]
    EmptyCourseName {
        number: i32,
        hammer_id: i32,
        origin: EntityOrigin,
    },

    #[error(
        "Course targetname is empty! Course name \"{name}\". Course number {number}. Course descriptor Hammer ID {hammer_id}, origin {origin}"
    )]
    EmptyCourseTargetname {
        name: String,
        number: i32,
        hammer_id: i32,
        origin: EntityOrigin,
    },

    #[error("Course descriptor name '{name}' already existed! (registered by Hammer ID {other_hammer_id})")]
    DuplicateCourseName { name: String, other_hammer_id: i32 },

    #[error("Course descriptor number {number} already existed! (registered by Hammer ID {other_hammer_id})")]
    DuplicateCourseNumber { number: i32, other_hammer_id: i32 },

    #[error("Course name '{targetname}' already existed! (registered by Hammer ID {other_hammer_id})")]
    DuplicateCourseTargetname {
        targetname: String,
        other_hammer_id: i32,
    },

    #[error("Course descriptor Hammer ID {hammer_id} already existed!")]
    DuplicateCourseHammerId { hammer_id: i32 },

    #[error(
        "Course descriptor targetname of timer_start marker is empty! Hammer ID {hammer_id}, origin {origin}"
    )]
    EmptyStartPositionDescriptor {
        hammer_id: i32,
        origin: EntityOrigin,
    },

    #[error(
        "Couldn't find course descriptor \"{descriptor}\" for timer_start marker! Hammer ID {hammer_id}, origin {origin}"
    )]
    StartPositionCourseMissing {
        descriptor: String,
        hammer_id: i32,
        origin: EntityOrigin,
    },

    #[error("Course \"{course}\" {kind_label} zones aren't consecutive or don't start at 1!")]
    NonContiguousZones {
        course: String,
        kind_label: &'static str,
    },

    #[error("Course \"{course}\" Too many {kind_label} zones! Maximum is {max}.")]
    TooManyZones {
        course: String,
        kind_label: &'static str,
        max: i32,
    },

    #[error("FATAL: Mapping API version {version} is invalid! This build supports version {MAPPING_API_VERSION}.")]
    UnsupportedVersion { version: i32 },

    #[error(
        "trigger_multiple {phase}: Couldn't find course descriptor from name \"{descriptor}\"! Trigger's Hammer ID: {hammer_id}"
    )]
    CourseMissingAtTouch {
        phase: &'static str,
        descriptor: String,
        hammer_id: i32,
    },
}

/// Append-only, bounded log of load diagnostics plus the standing capacity
/// flags.
///
/// Once the log fills up, the final slot is permanently replaced by an
/// overflow sentinel and later diagnostics are dropped. Flushing never clears
/// the log; only the next load's reset does.
#[derive(Debug, Clone, Default)]
pub struct ErrorLog {
    entries: Vec<String>,
    /// Trigger catalog overflowed; reported on every flush while set.
    pub too_many_triggers: bool,
    /// Course catalog overflowed; reported on every flush while set.
    pub too_many_courses: bool,
}

impl ErrorLog {
    /// Queue a diagnostic. Also logs it, so the server console sees map
    /// problems as they are discovered rather than at the next flush.
    pub fn record(&mut self, error: MapApiError) {
        let message = error.to_string();
        warn!("{message}");
        if self.entries.len() >= MAX_ERROR_ENTRIES {
            return;
        }
        if self.entries.len() == MAX_ERROR_ENTRIES - 1 {
            self.entries.push(OVERFLOW_SENTINEL.to_string());
            return;
        }
        self.entries.push(message);
    }

    /// The queued diagnostics, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Whether anything needs broadcasting: entries or standing flags.
    pub fn has_pending(&self) -> bool {
        !self.entries.is_empty() || self.too_many_triggers || self.too_many_courses
    }

    /// Forget everything. Called on load boundaries, never by the flush.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.too_many_triggers = false;
        self.too_many_courses = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema_error(code: i32) -> MapApiError {
        MapApiError::InvalidTriggerType {
            code,
            hammer_id: code,
            origin: Vec3::ZERO.into(),
        }
    }

    #[test]
    fn test_origin_formatting() {
        let origin = EntityOrigin(Vec3::new(1792.0, 768.4, -416.6));
        assert_eq!(origin.to_string(), "(1792 768 -417)");
    }

    #[test]
    fn test_record_keeps_insertion_order() {
        let mut log = ErrorLog::default();
        log.record(schema_error(14));
        log.record(schema_error(15));
        assert_eq!(log.entries().len(), 2);
        assert!(log.entries()[0].contains("type 14"));
        assert!(log.entries()[1].contains("type 15"));
    }

    #[test]
    fn test_overflow_sentinel_replaces_final_slot() {
        let mut log = ErrorLog::default();
        for code in 0..40 {
            log.record(schema_error(code));
        }
        assert_eq!(log.entries().len(), MAX_ERROR_ENTRIES);
        // Slots 1..=31 keep their original text.
        assert!(log.entries()[0].contains("type 0"));
        assert!(log.entries()[MAX_ERROR_ENTRIES - 2].contains("type 30"));
        // The final slot holds the sentinel, entries 33.. are dropped.
        assert_eq!(log.entries()[MAX_ERROR_ENTRIES - 1], OVERFLOW_SENTINEL);
    }

    #[test]
    fn test_has_pending_tracks_flags_and_entries() {
        let mut log = ErrorLog::default();
        assert!(!log.has_pending());
        log.too_many_triggers = true;
        assert!(log.has_pending());
        log.clear();
        assert!(!log.has_pending());
        log.record(schema_error(99));
        assert!(log.has_pending());
        log.clear();
        assert!(!log.has_pending());
    }
}

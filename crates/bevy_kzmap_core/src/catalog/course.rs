//! Course descriptors.

use bevy::prelude::*;

use bevy_kzmap_entities::spawn::{LEGACY_COURSE_NAME, LEGACY_COURSE_TARGETNAME};

/// Course numbers are 1-based; `0` is the invalid sentinel a missing or
/// malformed keyvalue collapses to.
pub const INVALID_COURSE_NUMBER: i32 = 0;

/// Where a course's run begins, bound from a `timer_start` marker during
/// ingestion pass 2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourseStartPosition {
    pub origin: Vec3,
    /// Pitch/yaw/roll degrees.
    pub angles: Vec3,
}

/// One named, numbered sequence of zones.
///
/// Created during ingestion (pass 1, or the legacy-compat shim), counts
/// written by the round-start validator, dropped wholesale on the next load.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDescriptor {
    /// Positive, unique across the catalog.
    pub number: i32,
    /// Display name, unique (case-insensitive).
    pub name: String,
    /// Reference key zone triggers point at, unique (case-insensitive).
    pub targetname: String,
    /// Designer-assigned authoring id, diagnostics only.
    pub hammer_id: i32,
    pub disable_checkpoints: bool,
    /// Bound in pass 2 once a matching start marker is found.
    pub start_position: Option<CourseStartPosition>,
    /// Number of split zones, written by the validator.
    pub split_count: i32,
    /// Number of checkpoint zones, written by the validator.
    pub checkpoint_count: i32,
    /// Number of stage zones, written by the validator.
    pub stage_count: i32,
}

impl CourseDescriptor {
    /// A freshly ingested course: no start position, no zone counts yet.
    pub fn new(
        number: i32,
        name: impl Into<String>,
        targetname: impl Into<String>,
        hammer_id: i32,
        disable_checkpoints: bool,
    ) -> Self {
        Self {
            number,
            name: name.into(),
            targetname: targetname.into(),
            hammer_id,
            disable_checkpoints,
            start_position: None,
            split_count: 0,
            checkpoint_count: 0,
            stage_count: 0,
        }
    }

    /// The implicit singleton course synthesized for legacy maps.
    pub fn legacy() -> Self {
        Self::new(1, LEGACY_COURSE_NAME, LEGACY_COURSE_TARGETNAME, -1, false)
    }

    /// Bind the course's start transform.
    pub fn set_start_position(&mut self, origin: Vec3, angles: Vec3) {
        self.start_position = Some(CourseStartPosition { origin, angles });
    }
}

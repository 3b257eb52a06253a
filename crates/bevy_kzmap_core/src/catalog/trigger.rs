//! Trigger records and their typed payloads.

use std::fmt;

use bevy::prelude::*;

/// Zone sequence numbers are 1-based; `0` is the invalid sentinel a missing
/// or malformed keyvalue collapses to.
pub const INVALID_ZONE_NUMBER: i32 = 0;

/// Bhop-kind teleports never retrigger faster than this, whatever the map
/// says.
pub const MIN_BHOP_RETRIGGER_DELAY: f32 = 0.1;

/// Closed set of timer semantics a trigger volume can carry.
///
/// The discriminants are the `timer_trigger_type` codes the authoring kit
/// writes; [`TriggerKind::from_code`] is the only way in from raw map data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum TriggerKind {
    /// No timer semantics; also the legacy-compat entry point.
    Disabled = 0,
    Modifier = 1,
    ResetCheckpoints = 2,
    SingleBhopReset = 3,
    AntiBhop = 4,
    ZoneStart = 5,
    ZoneEnd = 6,
    ZoneSplit = 7,
    ZoneCheckpoint = 8,
    ZoneStage = 9,
    Teleport = 10,
    MultiBhop = 11,
    SingleBhop = 12,
    SequentialBhop = 13,
}

impl TriggerKind {
    /// Classify a raw `timer_trigger_type` code. `None` for anything outside
    /// the closed range - the schema-error path.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::Disabled,
            1 => Self::Modifier,
            2 => Self::ResetCheckpoints,
            3 => Self::SingleBhopReset,
            4 => Self::AntiBhop,
            5 => Self::ZoneStart,
            6 => Self::ZoneEnd,
            7 => Self::ZoneSplit,
            8 => Self::ZoneCheckpoint,
            9 => Self::ZoneStage,
            10 => Self::Teleport,
            11 => Self::MultiBhop,
            12 => Self::SingleBhop,
            13 => Self::SequentialBhop,
            _ => return None,
        })
    }

    /// The authoring-kit code for this kind.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Whether this kind is one of the five timer zones.
    pub fn is_zone(self) -> bool {
        matches!(
            self,
            Self::ZoneStart | Self::ZoneEnd | Self::ZoneSplit | Self::ZoneCheckpoint | Self::ZoneStage
        )
    }

    /// Whether this zone kind carries a 1-based sequence number.
    pub fn has_zone_number(self) -> bool {
        matches!(self, Self::ZoneSplit | Self::ZoneCheckpoint | Self::ZoneStage)
    }

    /// Whether this kind is a bhop-style teleport.
    pub fn is_bhop(self) -> bool {
        matches!(self, Self::MultiBhop | Self::SingleBhop | Self::SequentialBhop)
    }

    /// Designer-facing name, used in diagnostics.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Disabled => "Disabled",
            Self::Modifier => "Modifier",
            Self::ResetCheckpoints => "Reset Checkpoints",
            Self::SingleBhopReset => "Single Bhop Reset",
            Self::AntiBhop => "Antibhop",
            Self::ZoneStart => "Start zone",
            Self::ZoneEnd => "End zone",
            Self::ZoneSplit => "Split zone",
            Self::ZoneCheckpoint => "Checkpoint zone",
            Self::ZoneStage => "Stage zone",
            Self::Teleport => "Teleport",
            Self::MultiBhop => "Multi bhop",
            Self::SingleBhop => "Single bhop",
            Self::SequentialBhop => "Sequential bhop",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Movement-rule toggles applied while a player is inside a modifier volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierProps {
    pub disable_pausing: bool,
    pub disable_checkpoints: bool,
    pub disable_teleports: bool,
    pub disable_jumpstats: bool,
    pub enable_slide: bool,
}

/// Link from a zone trigger to its owning course descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ZoneProps {
    /// Targetname of the owning course descriptor. Resolved at touch time;
    /// a dangling link is reported there, not here.
    pub course_descriptor: String,
    /// 1-based sequence number for split/checkpoint/stage zones; unused for
    /// start/end zones.
    pub number: i32,
}

/// Destination and transform handling for teleport-family triggers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TeleportProps {
    /// Targetname of the destination entity.
    pub destination: String,
    /// Seconds between touch and teleport. Non-negative; at least
    /// [`MIN_BHOP_RETRIGGER_DELAY`] for bhop kinds.
    pub delay: f32,
    pub use_destination_angles: bool,
    pub reset_speed: bool,
    pub reorient_player: bool,
    pub relative: bool,
}

/// Per-kind trigger data, variant selected by [`TriggerKind`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TriggerPayload {
    /// Disabled, reset-checkpoints and single-bhop-reset carry no data.
    #[default]
    None,
    Modifier(ModifierProps),
    AntiBhop {
        /// Seconds jumping stays suppressed after leaving the volume.
        /// Non-negative.
        time: f32,
    },
    Zone(ZoneProps),
    Teleport(TeleportProps),
}

/// One map-placed trigger volume with timer semantics.
///
/// Created during ingestion pass 1 and immutable afterwards; the catalog is
/// dropped wholesale on the next load.
#[derive(Debug, Clone, PartialEq)]
pub struct KzTrigger {
    pub kind: TriggerKind,
    /// Weak handle of the spawned volume. Identity lookup only - liveness is
    /// re-checked against the ECS on every resolution.
    pub entity: Entity,
    /// Designer-assigned authoring id, diagnostics only.
    pub hammer_id: i32,
    /// World position, diagnostics and debug drawing only.
    pub origin: Vec3,
    pub payload: TriggerPayload,
}

impl KzTrigger {
    /// The owning course descriptor's targetname, for zone-kind triggers.
    pub fn course_descriptor(&self) -> Option<&str> {
        match &self.payload {
            TriggerPayload::Zone(zone) => Some(&zone.course_descriptor),
            _ => None,
        }
    }
}

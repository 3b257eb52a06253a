//! # `bevy_kzmap_core`
//!
//! Catalog core for `bevy_kzmap`. Turns the raw entity keyvalues a map
//! compiler emits into a validated, queryable in-memory catalog of timer
//! triggers and courses, and resolves touched trigger volumes back to their
//! timer semantics on the per-tick touch path.
//!
//! ## Architecture
//!
//! Everything revolves around the [`MapApiData`](catalog::MapApiData)
//! resource, whose lifetime is exactly one map load:
//!
//! 1. **Version gate** - the `worldspawn` schema version decides between the
//!    current schema, legacy-compat mode, or a fatal mismatch that locks the
//!    catalog empty for the whole load.
//! 2. **Ingestion, pass 1** - trigger volumes and course descriptors are
//!    classified and recorded; malformed entities are dropped with a queued
//!    diagnostic, never a failure of the pass.
//! 3. **Ingestion, pass 2** - start-position markers bind onto the courses
//!    recorded in pass 1 (the ordering dependency is an explicit two-phase
//!    API, not a convention).
//! 4. **Validation** - at round start, zone numbering per course must be a
//!    contiguous `1..=N` run under a per-kind ceiling, or the course is
//!    rejected wholesale.
//! 5. **Runtime resolution** - touch events resolve the live entity handle
//!    (re-validated against the ECS on every lookup) to its record and
//!    owning course, and forward both to gameplay observers.
//!
//! Gameplay decisions are *not* made here: the resolved
//! [`KzTouchStarted`](events::KzTouchStarted)/[`KzTouchEnded`](events::KzTouchEnded)
//! events are the sole output of the hot path.
//!
//! Diagnostics accumulate in a bounded log and are re-broadcast on a fixed
//! interval for as long as they remain pending, so server operators keep
//! seeing a broken map until it is fixed.

pub mod catalog;
pub mod debug;
pub mod errors;
pub mod events;
pub mod export;
pub mod ingest;
pub mod plugin;
pub mod systems;
pub mod validate;
pub mod version;

pub mod prelude {
    //! Common imports for `bevy_kzmap_core` users.

    pub use crate::catalog::course::{CourseDescriptor, CourseStartPosition};
    pub use crate::catalog::trigger::{
        KzTrigger, ModifierProps, TeleportProps, TriggerKind, TriggerPayload, ZoneProps,
    };
    pub use crate::catalog::{MAX_COURSES, MAX_TRIGGERS, MapApiData};
    pub use crate::debug::DebugTriggerVolumes;
    pub use crate::errors::{ErrorLog, MapApiError};
    pub use crate::events::{KzTouchEnded, KzTouchStarted, MapErrorMessages};
    pub use crate::plugin::{KzmapCoreConfig, KzmapCorePlugin};
    pub use crate::version::MapApiVersion;
}

// Re-export plugin types at crate root for convenience
pub use plugin::{KzmapCoreConfig, KzmapCorePlugin};

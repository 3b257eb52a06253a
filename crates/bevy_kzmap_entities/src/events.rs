//! Lifecycle and touch events triggered by the host engine.
//!
//! These are the *inputs* of the mapping layer: the host's map-load and
//! round code triggers the lifecycle events in the order they occur in the
//! engine, and its collision code triggers the touch events per tick. The
//! catalog's observers consume them; nothing here is produced by this
//! workspace itself.

use bevy::prelude::*;

use crate::keyvalues::EntityKeyValues;
use crate::spawn::SpawnedEntity;

/// The round is about to start: the load window opens and map data from any
/// previous round must be forgotten.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RoundPrestarted;

/// The round has started: the load window closes and the catalog runs its
/// consistency validation.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RoundStarted;

/// The engine created a loading spawn group and exposes the complete set of
/// compiled keyvalues for it, before any entity exists.
///
/// This is where the schema version gate runs - it needs the `worldspawn`
/// bag and nothing else.
#[derive(Event, Debug, Clone, Default)]
pub struct SpawnGroupCreated {
    /// Keyvalue bags for every entity in the spawn group.
    pub keyvalues: Vec<EntityKeyValues>,
}

/// A batch of entities finished spawning and their handles are live.
///
/// The catalog classifies the batch in two ordered passes (triggers and
/// course descriptors first, start positions second), so a single event
/// covering the whole batch is sufficient - hosts should not split one spawn
/// group across several events unless course descriptors are guaranteed to
/// arrive before the start markers referencing them.
#[derive(Event, Debug, Clone, Default)]
pub struct EntityBatchSpawned {
    /// The spawned entities with their keyvalues.
    pub entities: Vec<SpawnedEntity>,
}

/// A player started touching a trigger volume.
#[derive(Event, Debug, Clone, Copy)]
pub struct TriggerTouchStarted {
    /// The touching player.
    pub player: Entity,
    /// The touched trigger volume.
    pub trigger: Entity,
}

/// A player stopped touching a trigger volume.
#[derive(Event, Debug, Clone, Copy)]
pub struct TriggerTouchEnded {
    /// The touching player.
    pub player: Entity,
    /// The touched trigger volume.
    pub trigger: Entity,
}

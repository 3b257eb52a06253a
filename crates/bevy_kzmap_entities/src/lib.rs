//! # `bevy_kzmap_entities`
//!
//! Pure input model for `bevy_kzmap`. Describes what the host engine hands
//! the timer's mapping layer at load time and at runtime, without any
//! interpretation of it:
//!
//! - [`EntityKeyValues`](keyvalues::EntityKeyValues): the opaque per-entity
//!   key-value bag a map compiler emits, with typed accessors.
//! - [`SpawnedEntity`](spawn::SpawnedEntity): one element of a spawn batch -
//!   a live entity handle paired with its keyvalues.
//! - [`events`]: the lifecycle and touch events the host triggers to drive
//!   the catalog.
//!
//! **This crate does NOT validate or catalog anything** - that is the job of
//! `bevy_kzmap_core`, which consumes these types.

pub mod events;
pub mod keyvalues;
pub mod spawn;

pub mod prelude {
    //! Common imports for `bevy_kzmap_entities` users.

    pub use crate::events::{
        EntityBatchSpawned, RoundPrestarted, RoundStarted, SpawnGroupCreated, TriggerTouchEnded,
        TriggerTouchStarted,
    };
    pub use crate::keyvalues::EntityKeyValues;
    pub use crate::spawn::SpawnedEntity;
}

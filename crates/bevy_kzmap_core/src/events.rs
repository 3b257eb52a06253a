//! Events produced by the catalog for gameplay code and the host.
//!
//! These are the extension hooks of the mapping layer: per-mode timer logic
//! observes the resolved touch events and makes every gameplay decision
//! itself - the catalog only says *what* was touched and which course owns
//! it.

use bevy::prelude::*;

use crate::catalog::course::CourseDescriptor;
use crate::catalog::trigger::KzTrigger;

/// A player started touching a cataloged timer trigger.
///
/// Only triggered for resolvable touches: the record exists, and for
/// zone-kind triggers the owning course exists too.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_kzmap_core::prelude::*;
///
/// fn on_touch(touch: On<KzTouchStarted>) {
///     let event = touch.event();
///     if event.trigger.kind == TriggerKind::ZoneStart {
///         let course = event.course.as_ref().expect("zone touches carry their course");
///         info!("player {:?} entered the start zone of {}", event.player, course.name);
///     }
/// }
/// ```
#[derive(Event, Debug, Clone)]
pub struct KzTouchStarted {
    /// The touching player.
    pub player: Entity,
    /// The resolved trigger record.
    pub trigger: KzTrigger,
    /// The owning course; always `Some` for zone-kind triggers.
    pub course: Option<CourseDescriptor>,
}

/// A player stopped touching a cataloged timer trigger.
///
/// Same resolution guarantees as [`KzTouchStarted`].
#[derive(Event, Debug, Clone)]
pub struct KzTouchEnded {
    /// The touching player.
    pub player: Entity,
    /// The resolved trigger record.
    pub trigger: KzTrigger,
    /// The owning course; always `Some` for zone-kind triggers.
    pub course: Option<CourseDescriptor>,
}

/// Map-data diagnostics to broadcast to all connected observers.
///
/// Triggered on a fixed interval while load diagnostics are pending, and
/// immediately for runtime resolution failures on the touch path. The host
/// decides how to present the lines (chat, console, log).
#[derive(Event, Debug, Clone)]
pub struct MapErrorMessages {
    /// Operator-facing message lines, ready to print.
    pub messages: Vec<String>,
}

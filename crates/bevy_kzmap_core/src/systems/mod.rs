//! Observers and systems wiring the catalog into the host's lifecycle.

use bevy::ecs::entity::Entities;
use bevy::prelude::*;

use bevy_kzmap_entities::events::{
    EntityBatchSpawned, RoundPrestarted, RoundStarted, SpawnGroupCreated, TriggerTouchEnded,
    TriggerTouchStarted,
};

use crate::catalog::course::CourseDescriptor;
use crate::catalog::trigger::KzTrigger;
use crate::catalog::{MAX_COURSES, MAX_TRIGGERS, MapApiData};
use crate::errors::MapApiError;
use crate::events::{KzTouchEnded, KzTouchStarted, MapErrorMessages};
use crate::plugin::KzmapCoreConfig;

/// Repeating timer driving the diagnostic broadcast.
#[derive(Resource, Debug)]
pub struct ErrorBroadcastTimer(pub Timer);

pub(crate) fn on_round_prestarted(
    _prestart: On<RoundPrestarted>,
    mut data: ResMut<MapApiData>,
    mut timer: ResMut<ErrorBroadcastTimer>,
) {
    data.reset_for_load();
    timer.0.reset();
}

pub(crate) fn on_spawn_group_created(
    group: On<SpawnGroupCreated>,
    mut data: ResMut<MapApiData>,
) {
    data.apply_spawn_group(&group.event().keyvalues);
}

pub(crate) fn on_entity_batch_spawned(
    batch: On<EntityBatchSpawned>,
    mut data: ResMut<MapApiData>,
) {
    let entities = &batch.event().entities;
    data.ingest_primary(entities);
    data.ingest_secondary(entities);
}

pub(crate) fn on_round_started(
    _start: On<RoundStarted>,
    mut data: ResMut<MapApiData>,
    config: Res<KzmapCoreConfig>,
) {
    data.finalize_courses();
    if let Some(path) = &config.export_courses_path {
        crate::export::export_catalog(&data, path);
    }
}

pub(crate) fn on_trigger_touch_started(
    touch: On<TriggerTouchStarted>,
    data: Res<MapApiData>,
    entities: &Entities,
    mut commands: Commands,
) {
    let touch = touch.event();
    let Some(trigger) = data.find_trigger(touch.trigger, entities) else {
        return;
    };
    match resolve_course(&data, trigger, "StartTouch") {
        Ok(course) => commands.trigger(KzTouchStarted {
            player: touch.player,
            trigger: trigger.clone(),
            course: course.cloned(),
        }),
        Err(message) => commands.trigger(MapErrorMessages {
            messages: vec![message],
        }),
    }
}

pub(crate) fn on_trigger_touch_ended(
    touch: On<TriggerTouchEnded>,
    data: Res<MapApiData>,
    entities: &Entities,
    mut commands: Commands,
) {
    let touch = touch.event();
    let Some(trigger) = data.find_trigger(touch.trigger, entities) else {
        return;
    };
    match resolve_course(&data, trigger, "EndTouch") {
        Ok(course) => commands.trigger(KzTouchEnded {
            player: touch.player,
            trigger: trigger.clone(),
            course: course.cloned(),
        }),
        Err(message) => commands.trigger(MapErrorMessages {
            messages: vec![message],
        }),
    }
}

/// Resolve a trigger's owning course. Zone-kind records must resolve or the
/// dispatch is aborted with an operator-facing message; everything else has
/// no course by construction.
fn resolve_course<'a>(
    data: &'a MapApiData,
    trigger: &KzTrigger,
    phase: &'static str,
) -> Result<Option<&'a CourseDescriptor>, String> {
    let Some(descriptor) = trigger.course_descriptor() else {
        return Ok(None);
    };
    match data.course_by_targetname(descriptor) {
        Some(course) => Ok(Some(course)),
        None => Err(MapApiError::CourseMissingAtTouch {
            phase,
            descriptor: descriptor.to_string(),
            hammer_id: trigger.hammer_id,
        }
        .to_string()),
    }
}

/// Periodically re-broadcast pending diagnostics. The log is read, never
/// cleared - operators keep seeing a broken map until the next load.
pub(crate) fn broadcast_errors(
    time: Res<Time>,
    mut timer: ResMut<ErrorBroadcastTimer>,
    data: Res<MapApiData>,
    mut commands: Commands,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    let log = data.errors();
    if !log.has_pending() {
        return;
    }

    let mut messages = Vec::with_capacity(log.entries().len() + 2);
    if log.too_many_triggers {
        messages.push(format!(
            "Too many Mapping API triggers! Maximum is {MAX_TRIGGERS}!"
        ));
    }
    if log.too_many_courses {
        messages.push(format!("Too many Courses! Maximum is {MAX_COURSES}!"));
    }
    messages.extend(log.entries().iter().cloned());
    commands.trigger(MapErrorMessages { messages });
}

//! Drives a complete load lifecycle by hand, the way a host engine would:
//! version gate, spawn batch, round start, then a couple of touch events.
//!
//! Run with: `cargo run -p bevy_kzmap_core --example host_integration`

use bevy::log::LogPlugin;
use bevy::prelude::*;

use bevy_kzmap_core::prelude::*;
use bevy_kzmap_entities::prelude::*;

fn main() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()));
    app.add_plugins(KzmapCorePlugin::default());
    app.add_observer(print_touch_started);
    app.add_observer(print_touch_ended);
    app.add_observer(print_errors);

    let world = app.world_mut();

    // 1. Round prestart: the load window opens.
    world.trigger(RoundPrestarted);

    // 2. The spawn group's keyvalues arrive; worldspawn carries the version.
    let worldspawn: EntityKeyValues = [
        ("classname", "worldspawn"),
        ("timer_mapping_api_version", "1"),
    ]
    .into_iter()
    .collect();

    let course_kv: EntityKeyValues = [
        ("classname", "info_target_server_only"),
        ("timer_course_descriptor", "true"),
        ("timer_course_number", "1"),
        ("timer_course_name", "Main"),
        ("targetname", "course_main"),
        ("hammerUniqueId", "10"),
    ]
    .into_iter()
    .collect();

    let start_zone_kv: EntityKeyValues = [
        ("classname", "trigger_multiple"),
        ("timer_trigger_type", "5"),
        ("timer_zone_course_descriptor", "course_main"),
        ("hammerUniqueId", "11"),
        ("origin", "0 0 64"),
    ]
    .into_iter()
    .collect();

    let end_zone_kv: EntityKeyValues = [
        ("classname", "trigger_multiple"),
        ("timer_trigger_type", "6"),
        ("timer_zone_course_descriptor", "course_main"),
        ("hammerUniqueId", "12"),
        ("origin", "4096 0 64"),
    ]
    .into_iter()
    .collect();

    let start_marker_kv: EntityKeyValues = [
        ("classname", "info_teleport_destination"),
        ("targetname", "timer_start"),
        ("timer_zone_course_descriptor", "course_main"),
        ("origin", "64 0 64"),
        ("angles", "0 90 0"),
    ]
    .into_iter()
    .collect();

    world.trigger(SpawnGroupCreated {
        keyvalues: vec![
            worldspawn,
            course_kv.clone(),
            start_zone_kv.clone(),
            end_zone_kv.clone(),
            start_marker_kv.clone(),
        ],
    });

    // 3. The entities spawn and the batch is classified in two passes.
    let course = world.spawn_empty().id();
    let start_zone = world.spawn_empty().id();
    let end_zone = world.spawn_empty().id();
    let start_marker = world.spawn_empty().id();
    world.trigger(EntityBatchSpawned {
        entities: vec![
            SpawnedEntity::new(course, course_kv),
            SpawnedEntity::new(start_zone, start_zone_kv),
            SpawnedEntity::new(end_zone, end_zone_kv),
            SpawnedEntity::new(start_marker, start_marker_kv),
        ],
    });

    // 4. Round start: the window closes and courses are validated.
    world.trigger(RoundStarted);

    {
        let data = world.resource::<MapApiData>();
        info!(
            "catalog ready: {} course(s), {} trigger(s), schema version {}",
            data.course_count(),
            data.triggers().len(),
            data.api_version().raw(),
        );
    }

    // 5. A player runs through both zones.
    let player = world.spawn_empty().id();
    world.trigger(TriggerTouchStarted {
        player,
        trigger: start_zone,
    });
    world.trigger(TriggerTouchEnded {
        player,
        trigger: start_zone,
    });
    world.trigger(TriggerTouchStarted {
        player,
        trigger: end_zone,
    });

    app.update();
}

fn print_touch_started(touch: On<KzTouchStarted>) {
    let event = touch.event();
    let course = event
        .course
        .as_ref()
        .map(|course| course.name.as_str())
        .unwrap_or("-");
    info!(
        "player {:?} entered {} (course {})",
        event.player, event.trigger.kind, course
    );
}

fn print_touch_ended(touch: On<KzTouchEnded>) {
    let event = touch.event();
    info!("player {:?} left {}", event.player, event.trigger.kind);
}

fn print_errors(errors: On<MapErrorMessages>) {
    for line in &errors.event().messages {
        warn!("MAP ERROR: {line}");
    }
}

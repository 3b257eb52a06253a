//! Pass-1 classification of `trigger_multiple` volumes.

use bevy_kzmap_entities::keyvalues::EntityKeyValues;
use bevy_kzmap_entities::spawn::{
    KEY_ANTI_BHOP_TIME, KEY_MODIFIER_DISABLE_CHECKPOINTS, KEY_MODIFIER_DISABLE_JUMPSTATS,
    KEY_MODIFIER_DISABLE_PAUSE, KEY_MODIFIER_DISABLE_TELEPORTS, KEY_MODIFIER_ENABLE_SLIDE,
    KEY_TELEPORT_DELAY, KEY_TELEPORT_DESTINATION, KEY_TELEPORT_RELATIVE,
    KEY_TELEPORT_REORIENT_PLAYER, KEY_TELEPORT_RESET_SPEED, KEY_TELEPORT_USE_DEST_ANGLES,
    KEY_TRIGGER_TYPE, KEY_ZONE_CHECKPOINT_NUMBER, KEY_ZONE_COURSE_DESCRIPTOR,
    KEY_ZONE_SPLIT_NUMBER, KEY_ZONE_STAGE_NUMBER, LEGACY_COURSE_TARGETNAME,
    LEGACY_END_ZONE_NAME, LEGACY_START_ZONE_NAME, SpawnedEntity,
};

use crate::catalog::MapApiData;
use crate::catalog::course::CourseDescriptor;
use crate::catalog::trigger::{
    INVALID_ZONE_NUMBER, KzTrigger, MIN_BHOP_RETRIGGER_DELAY, ModifierProps, TeleportProps,
    TriggerKind, TriggerPayload, ZoneProps,
};
use crate::errors::MapApiError;
use crate::version::MapApiVersion;

/// Classify one `trigger_multiple` into a trigger record, or queue a
/// diagnostic and drop it.
pub(crate) fn classify_trigger(data: &mut MapApiData, spawned: &SpawnedEntity) {
    let kv = &spawned.keyvalues;
    let hammer_id = kv.hammer_id();
    let origin = kv.origin();

    let code = kv.get_i32(KEY_TRIGGER_TYPE, TriggerKind::Disabled.code());
    let Some(kind) = TriggerKind::from_code(code) else {
        data.errors.record(MapApiError::InvalidTriggerType {
            code,
            hammer_id,
            origin: origin.into(),
        });
        return;
    };

    if !data.is_load_window_open() {
        // Designers must not inject zones after load.
        data.errors.record(MapApiError::TriggerAfterLoad {
            kind,
            hammer_id,
            origin: origin.into(),
        });
        return;
    }

    let payload = match kind {
        TriggerKind::Disabled => {
            // Pre-schema maps mark their zones with reserved names on plain
            // triggers; everything else really is a plain trigger_multiple.
            if data.api_version() == MapApiVersion::NoApi
                && (spawned.name_matches(LEGACY_START_ZONE_NAME)
                    || spawned.name_matches(LEGACY_END_ZONE_NAME))
            {
                synthesize_legacy_zone(data, spawned, hammer_id);
                return;
            }
            TriggerPayload::None
        }
        TriggerKind::Modifier => TriggerPayload::Modifier(ModifierProps {
            disable_pausing: kv.get_bool(KEY_MODIFIER_DISABLE_PAUSE),
            disable_checkpoints: kv.get_bool(KEY_MODIFIER_DISABLE_CHECKPOINTS),
            disable_teleports: kv.get_bool(KEY_MODIFIER_DISABLE_TELEPORTS),
            disable_jumpstats: kv.get_bool(KEY_MODIFIER_DISABLE_JUMPSTATS),
            enable_slide: kv.get_bool(KEY_MODIFIER_ENABLE_SLIDE),
        }),
        TriggerKind::ResetCheckpoints | TriggerKind::SingleBhopReset => TriggerPayload::None,
        TriggerKind::AntiBhop => TriggerPayload::AntiBhop {
            time: kv.get_f32(KEY_ANTI_BHOP_TIME, 0.0).max(0.0),
        },
        TriggerKind::ZoneStart
        | TriggerKind::ZoneEnd
        | TriggerKind::ZoneSplit
        | TriggerKind::ZoneCheckpoint
        | TriggerKind::ZoneStage => match zone_payload(data, kind, kv, hammer_id) {
            Some(payload) => payload,
            None => return,
        },
        TriggerKind::Teleport
        | TriggerKind::MultiBhop
        | TriggerKind::SingleBhop
        | TriggerKind::SequentialBhop => teleport_payload(kind, kv),
    };

    data.add_trigger(KzTrigger {
        kind,
        entity: spawned.entity,
        hammer_id,
        origin,
        payload,
    });
}

/// Extract the course link and, for numbered kinds, the sequence number.
fn zone_payload(
    data: &mut MapApiData,
    kind: TriggerKind,
    kv: &EntityKeyValues,
    hammer_id: i32,
) -> Option<TriggerPayload> {
    let course_descriptor = kv.get_str(KEY_ZONE_COURSE_DESCRIPTOR);
    if course_descriptor.is_empty() {
        data.errors.record(MapApiError::EmptyCourseDescriptor {
            kind,
            hammer_id,
            origin: kv.origin().into(),
        });
        return None;
    }

    let number = match kind {
        TriggerKind::ZoneSplit => read_zone_number(data, kind, kv, KEY_ZONE_SPLIT_NUMBER, hammer_id)?,
        TriggerKind::ZoneCheckpoint => {
            read_zone_number(data, kind, kv, KEY_ZONE_CHECKPOINT_NUMBER, hammer_id)?
        }
        TriggerKind::ZoneStage => read_zone_number(data, kind, kv, KEY_ZONE_STAGE_NUMBER, hammer_id)?,
        _ => INVALID_ZONE_NUMBER,
    };

    Some(TriggerPayload::Zone(ZoneProps {
        course_descriptor: course_descriptor.to_string(),
        number,
    }))
}

fn read_zone_number(
    data: &mut MapApiData,
    kind: TriggerKind,
    kv: &EntityKeyValues,
    key: &str,
    hammer_id: i32,
) -> Option<i32> {
    let number = kv.get_i32(key, INVALID_ZONE_NUMBER);
    if number <= INVALID_ZONE_NUMBER {
        data.errors.record(MapApiError::InvalidZoneNumber {
            kind,
            number,
            hammer_id,
            origin: kv.origin().into(),
        });
        return None;
    }
    Some(number)
}

fn teleport_payload(kind: TriggerKind, kv: &EntityKeyValues) -> TriggerPayload {
    let mut delay = kv.get_f32(KEY_TELEPORT_DELAY, 0.0).max(0.0);
    if kind.is_bhop() {
        delay = delay.max(MIN_BHOP_RETRIGGER_DELAY);
    }
    TriggerPayload::Teleport(TeleportProps {
        destination: kv.get_str(KEY_TELEPORT_DESTINATION).to_string(),
        delay,
        use_destination_angles: kv.get_bool(KEY_TELEPORT_USE_DEST_ANGLES),
        reset_speed: kv.get_bool(KEY_TELEPORT_RESET_SPEED),
        reorient_player: kv.get_bool(KEY_TELEPORT_REORIENT_PLAYER),
        relative: kv.get_bool(KEY_TELEPORT_RELATIVE),
    })
}

/// Legacy-compat shim: a reserved-name trigger becomes a start/end zone of
/// the implicit singleton course, creating that course on first use.
fn synthesize_legacy_zone(data: &mut MapApiData, spawned: &SpawnedEntity, hammer_id: i32) {
    let kind = if spawned.name_matches(LEGACY_START_ZONE_NAME) {
        TriggerKind::ZoneStart
    } else {
        TriggerKind::ZoneEnd
    };

    data.create_course(CourseDescriptor::legacy());
    data.add_trigger(KzTrigger {
        kind,
        entity: spawned.entity,
        hammer_id,
        origin: spawned.keyvalues.origin(),
        payload: TriggerPayload::Zone(ZoneProps {
            course_descriptor: LEGACY_COURSE_TARGETNAME.to_string(),
            number: INVALID_ZONE_NUMBER,
        }),
    });
}

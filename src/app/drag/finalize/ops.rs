//! Wiederverwendbare Änderungsschritte auf einer [`Draft`].
//!
//! Jeder Schritt hält die Struktur-Invarianten ein: Links bleiben an ihren
//! Geräten verankert, Zonen-Mitglieder sitzen auf ihren festen Offsets und
//! Kanal-Mitgliedschaften folgen den CC-Links.

use glam::Vec2;

use super::draft::Draft;
use crate::app::error::EditorError;
use crate::core::zone::member_positions_for;
use crate::core::{
    CardId, ChannelId, DeviceId, Link, LinkId, LinkKind, LinkTarget, SensorZone, ZoneId,
};

/// Zieht Start- und Endpunkte aller betroffenen Links auf die Geräteposition nach.
pub fn sync_device_links(draft: &mut Draft<'_>, device_id: DeviceId) {
    let Some(device) = draft.device(device_id) else {
        log::warn!("Gerät {} fehlt beim Nachziehen der Links", device_id);
        return;
    };
    let position = device.position;
    let own: Vec<LinkId> = device.own_links().collect();
    for link_id in own {
        if let Some(link) = draft.link_mut(link_id) {
            link.set_start(position);
        }
    }
    for link_id in draft.links_targeting(device_id) {
        if let Some(link) = draft.link_mut(link_id) {
            link.set_end(position);
        }
    }
}

/// Setzt alle Mitglieder einer Zone auf ihre Offsets und zieht deren Links nach.
pub fn layout_zone(draft: &mut Draft<'_>, zone_id: ZoneId) {
    let Some(zone) = draft.zone(zone_id) else {
        log::warn!("Zone {} fehlt beim Anordnen", zone_id);
        return;
    };
    let members = zone.sensor_ids.clone();
    let positions = member_positions_for(zone.anchor, zone.rotation_deg, members.len());
    for (sensor_id, position) in members.into_iter().zip(positions) {
        if let Some(device) = draft.device_mut(sensor_id) {
            device.position = position;
            device.zone_id = Some(zone_id);
        }
        sync_device_links(draft, sensor_id);
    }
}

/// Entfernt einen Sensor aus seiner Zone. Leere Zonen werden gelöscht,
/// verbleibende Mitglieder neu angeordnet. Liefert die bisherige Zone.
pub fn detach_from_zone(draft: &mut Draft<'_>, sensor_id: DeviceId) -> Option<ZoneId> {
    let zone_id = draft.device(sensor_id)?.zone_id?;
    if let Some(device) = draft.device_mut(sensor_id) {
        device.zone_id = None;
    }
    let Some(zone) = draft.zone_mut(zone_id) else {
        log::warn!("Zone {} von Sensor {} fehlt", zone_id, sensor_id);
        return None;
    };
    zone.remove_member(sensor_id);
    if zone.sensor_ids.is_empty() {
        draft.remove_zone(zone_id);
    } else {
        layout_zone(draft, zone_id);
    }
    Some(zone_id)
}

/// Legt eine neue Zone mit dem Sensor als einzigem Mitglied an.
pub fn create_zone(draft: &mut Draft<'_>, sensor_id: DeviceId, anchor: Vec2) -> ZoneId {
    let zone_id = draft.next_zone_id();
    draft.put_zone(SensorZone::new(zone_id, anchor, sensor_id));
    layout_zone(draft, zone_id);
    zone_id
}

/// Fügt einen Sensor an `index` in eine Zone ein und ordnet sie neu an.
pub fn insert_into_zone(draft: &mut Draft<'_>, zone_id: ZoneId, sensor_id: DeviceId, index: usize) {
    if let Some(zone) = draft.zone_mut(zone_id) {
        zone.insert_member(index, sensor_id);
    }
    layout_zone(draft, zone_id);
}

/// Löscht einen Link samt Rückverweis am Besitzer und Kanal-Mitgliedschaft.
///
/// Liefert die Karte des bisherigen Kanals (nur CC-Links).
pub fn delete_link(draft: &mut Draft<'_>, link_id: LinkId) -> Option<CardId> {
    let link = draft.link(link_id)?.clone();
    draft.remove_link(link_id);
    if let Some(owner) = draft.device_mut(link.owner) {
        match link.kind {
            LinkKind::Rf => {
                if owner.rf_link == Some(link_id) {
                    owner.rf_link = None;
                }
            }
            LinkKind::Cc => owner.cc_links.retain(|id| *id != link_id),
        }
    }
    match link.target {
        LinkTarget::Channel(channel_id) => leave_channel(draft, channel_id, link.owner),
        LinkTarget::Device(_) => None,
    }
}

/// Entfernt den Sensor aus dem Kanal; liefert die Karte des Kanals.
pub fn leave_channel(draft: &mut Draft<'_>, channel_id: ChannelId, sensor_id: DeviceId) -> Option<CardId> {
    let channel = draft.channel_mut(channel_id)?;
    channel.remove_sensor(sensor_id);
    Some(channel.card_id)
}

/// Löscht alle Links eines Geräts (eigene und auf es zielende).
///
/// Liefert die Karten, deren Kanäle dabei Mitglieder verloren haben.
pub fn strip_links(draft: &mut Draft<'_>, device_id: DeviceId) -> Vec<CardId> {
    let mut link_ids: Vec<LinkId> = draft
        .device(device_id)
        .map(|d| d.own_links().collect())
        .unwrap_or_default();
    link_ids.extend(draft.links_targeting(device_id));
    let mut cards = Vec::new();
    for link_id in link_ids {
        if let Some(card_id) = delete_link(draft, link_id) {
            if !cards.contains(&card_id) {
                cards.push(card_id);
            }
        }
    }
    cards
}

/// Prüft, ob ein Sensor einem Kanal beitreten darf.
pub fn check_channel_join(
    draft: &Draft<'_>,
    channel_id: ChannelId,
    sensor_id: DeviceId,
    capacity: usize,
) -> Result<(), EditorError> {
    let Some(channel) = draft.channel(channel_id) else {
        return Err(EditorError::UnexpectedDispatch(format!(
            "Kanal {} existiert nicht",
            channel_id
        )));
    };
    let linked = draft
        .links()
        .any(|l| l.owner == sensor_id && l.target == LinkTarget::Channel(channel_id));
    if linked || channel.has_sensor(sensor_id) {
        return Err(EditorError::DuplicateLink {
            sensor: sensor_id,
            channel: channel_id,
        });
    }
    if channel.members.len() >= capacity {
        return Err(EditorError::ChannelFull {
            channel: channel_id,
            capacity,
        });
    }
    Ok(())
}

/// Prüft, ob ein CC-Link von `from` nach `to` wechseln darf (gleiche Signalart).
pub fn check_channel_kind(
    draft: &Draft<'_>,
    link_id: LinkId,
    from: ChannelId,
    to: ChannelId,
) -> Result<(), EditorError> {
    let (Some(old), Some(new)) = (draft.channel(from), draft.channel(to)) else {
        return Ok(());
    };
    if old.kind != new.kind {
        return Err(EditorError::ChannelKindMismatch {
            link: link_id,
            channel: to,
            from: old.kind,
            to: new.kind,
        });
    }
    Ok(())
}

/// Trägt den Sensor im Kanal ein; liefert die Karte des Kanals.
pub fn join_channel(draft: &mut Draft<'_>, channel_id: ChannelId, sensor_id: DeviceId) -> Option<CardId> {
    let channel = draft.channel_mut(channel_id)?;
    channel.add_sensor(sensor_id);
    Some(channel.card_id)
}

/// Legt einen neuen CC-Link vom Sensor zum Kanal an.
pub fn create_cc_link(
    draft: &mut Draft<'_>,
    sensor_id: DeviceId,
    channel_id: ChannelId,
) -> Option<(LinkId, CardId)> {
    let start = draft.device(sensor_id)?.position;
    let end = draft.channel(channel_id)?.anchor;
    let link_id = draft.next_link_id();
    draft.put_link(Link::new(
        link_id,
        LinkKind::Cc,
        sensor_id,
        LinkTarget::Channel(channel_id),
        start,
        end,
    ));
    if let Some(sensor) = draft.device_mut(sensor_id) {
        sensor.cc_links.push(link_id);
    }
    let card_id = join_channel(draft, channel_id, sensor_id)?;
    Some((link_id, card_id))
}

/// Prüft, ob `target` als Uplink von `device_id` keinen Kreis schließt.
pub fn check_uplink(draft: &Draft<'_>, device_id: DeviceId, target: DeviceId) -> Result<(), EditorError> {
    if target == device_id || draft.base().upstream_contains(target, device_id) {
        return Err(EditorError::CyclicUplink {
            device: device_id,
            target,
        });
    }
    Ok(())
}

/// Setzt den RF-Uplink eines Geräts auf `target` (bestehender Link wird umgehängt).
pub fn set_uplink(draft: &mut Draft<'_>, device_id: DeviceId, target: DeviceId) -> Option<LinkId> {
    let device = draft.device(device_id)?;
    let start = device.position;
    let existing = device.rf_link;
    let end = draft.device(target)?.position;
    match existing {
        Some(link_id) => {
            let link = draft.link_mut(link_id)?;
            link.target = LinkTarget::Device(target);
            link.points = vec![start, end];
            Some(link_id)
        }
        None => {
            let link_id = draft.next_link_id();
            draft.put_link(Link::new(
                link_id,
                LinkKind::Rf,
                device_id,
                LinkTarget::Device(target),
                start,
                end,
            ));
            if let Some(device) = draft.device_mut(device_id) {
                device.rf_link = Some(link_id);
            }
            Some(link_id)
        }
    }
}

/// Karten, die nach der Änderung leer sind und nicht mehr melden.
pub fn orphaned_cards(draft: &Draft<'_>, cards: &[CardId]) -> Vec<CardId> {
    cards
        .iter()
        .copied()
        .filter(|&card_id| {
            draft.card_is_empty(card_id) && draft.card(card_id).is_some_and(|c| !c.reporting)
        })
        .collect()
}

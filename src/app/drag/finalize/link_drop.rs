use super::draft::Draft;
use super::{ops, FinalizeContext, FinalizeOutcome};
use crate::app::drag::session::{DeviceDrag, LinkDrag};
use crate::app::error::EditorError;
use crate::app::events::HitTarget;
use crate::app::state::Selectable;
use crate::core::{ChannelId, DeviceId, LinkKind, LinkTarget};

/// Sensor/Repeater auf Radio/Repeater abgelegt: Uplink setzen oder ersetzen.
/// Das Gerät selbst bleibt an seiner Position.
pub fn uplink_by_drop(
    drag: &DeviceDrag,
    target: DeviceId,
    ctx: &FinalizeContext<'_>,
) -> Result<FinalizeOutcome, EditorError> {
    let mut draft = Draft::new(ctx.topology);
    ops::check_uplink(&draft, drag.device_id, target)?;
    if ops::set_uplink(&mut draft, drag.device_id, target).is_none() {
        log::warn!("Uplink {} → {} nicht möglich", drag.device_id, target);
        return Ok(FinalizeOutcome::bounce());
    }
    Ok(FinalizeOutcome {
        batch: draft.into_batch("Uplink setzen"),
        selection: Some(Some(Selectable::Device(drag.device_id))),
        ..FinalizeOutcome::default()
    })
}

/// Sensor auf einen Kanal abgelegt: neuer CC-Link.
pub fn cc_link_by_drop(
    drag: &DeviceDrag,
    channel_id: ChannelId,
    ctx: &FinalizeContext<'_>,
) -> Result<FinalizeOutcome, EditorError> {
    let mut draft = Draft::new(ctx.topology);
    if draft.channel(channel_id).is_none() {
        log::warn!("Kanal {} fehlt beim Ablegen von Sensor {}", channel_id, drag.device_id);
        return Ok(FinalizeOutcome::select(Selectable::Device(drag.device_id)));
    }
    ops::check_channel_join(&draft, channel_id, drag.device_id, ctx.options.channel_capacity)?;
    let Some((link_id, card_id)) = ops::create_cc_link(&mut draft, drag.device_id, channel_id) else {
        log::warn!("CC-Link {} → Kanal {} nicht möglich", drag.device_id, channel_id);
        return Ok(FinalizeOutcome::bounce());
    };
    Ok(FinalizeOutcome {
        batch: draft.into_batch("CC-Link anlegen"),
        selection: Some(Some(Selectable::Link(link_id))),
        cancel_cards: vec![card_id],
        ..FinalizeOutcome::default()
    })
}

/// Abschluss einer Gelenk-Geste an einem Link.
///
/// Innere Gelenke ändern nur den Verlauf. Der Endpunkt wird auf ein gültiges
/// Ziel umgehängt; ohne Ziel wird ein CC-Link gelöscht und ein RF-Link
/// springt zurück.
pub fn finish_link_edit(
    drag: &LinkDrag,
    hover: Option<HitTarget>,
    ctx: &FinalizeContext<'_>,
) -> Result<FinalizeOutcome, EditorError> {
    let mut draft = Draft::new(ctx.topology);
    let Some(link) = draft.link(drag.link_id) else {
        log::warn!("Link {} fehlt beim Abschluss", drag.link_id);
        return Ok(FinalizeOutcome::bounce());
    };
    let old_target = link.target;
    let selected = Selectable::Link(drag.link_id);

    if !drag.moves_terminal() {
        if let Some(link) = draft.link_mut(drag.link_id) {
            link.points = drag.preview.points.clone();
        }
        return Ok(FinalizeOutcome {
            batch: draft.into_batch("Link-Verlauf ändern"),
            selection: Some(Some(selected)),
            ..FinalizeOutcome::default()
        });
    }

    let mut outcome = FinalizeOutcome {
        selection: Some(Some(selected)),
        ..FinalizeOutcome::default()
    };
    match (drag.kind, hover) {
        (LinkKind::Rf, Some(HitTarget::Device(target))) => {
            ops::check_uplink(&draft, drag.owner, target)?;
            let Some(end) = draft.device(target).map(|d| d.position) else {
                return Ok(FinalizeOutcome::bounce());
            };
            if let Some(link) = draft.link_mut(drag.link_id) {
                link.target = LinkTarget::Device(target);
                link.points = drag.preview.points.clone();
                link.set_end(end);
            }
            outcome.batch = draft.into_batch("Uplink umhängen");
        }
        (LinkKind::Cc, Some(HitTarget::Channel(channel_id))) => {
            let Some(end) = draft.channel(channel_id).map(|c| c.anchor) else {
                log::warn!("Kanal {} fehlt beim Umhängen von Link {}", channel_id, drag.link_id);
                return Ok(FinalizeOutcome::select(selected));
            };
            let moved_channel = old_target != LinkTarget::Channel(channel_id);
            if moved_channel {
                if let LinkTarget::Channel(old_channel) = old_target {
                    ops::check_channel_kind(&draft, drag.link_id, old_channel, channel_id)?;
                }
                ops::check_channel_join(&draft, channel_id, drag.owner, ctx.options.channel_capacity)?;
            }
            if let Some(link) = draft.link_mut(drag.link_id) {
                link.target = LinkTarget::Channel(channel_id);
                link.points = drag.preview.points.clone();
                link.set_end(end);
            }
            if moved_channel {
                if let LinkTarget::Channel(old_channel) = old_target {
                    if let Some(old_card) = ops::leave_channel(&mut draft, old_channel, drag.owner) {
                        outcome.schedule_cards = ops::orphaned_cards(&draft, &[old_card]);
                    }
                }
                if let Some(new_card) = ops::join_channel(&mut draft, channel_id, drag.owner) {
                    outcome.cancel_cards.push(new_card);
                    outcome.schedule_cards.retain(|c| *c != new_card);
                }
            }
            outcome.batch = draft.into_batch("CC-Link umhängen");
        }
        (LinkKind::Cc, None) => {
            let card = ops::delete_link(&mut draft, drag.link_id);
            outcome.schedule_cards = ops::orphaned_cards(&draft, card.as_slice());
            outcome.batch = draft.into_batch("CC-Link lösen");
            outcome.selection = Some(None);
        }
        (LinkKind::Rf, None) => {
            log::debug!("RF-Link {} ohne Ziel losgelassen, springt zurück", drag.link_id);
            return Ok(FinalizeOutcome::select(selected));
        }
        (kind, Some(other)) => {
            return Err(EditorError::UnexpectedDispatch(format!(
                "{:?}-Link {} auf {:?}",
                kind, drag.link_id, other
            )));
        }
    }
    Ok(outcome)
}

use crate::catalog::{NeedSpec, TemplateEntry};
use crate::models::{RawEvent, ShiftRecord};
use crate::utils::time::{add_minutes, minutes_between};
use tracing::{debug, warn};

/// One shift per need spec of `template`, in declaration order.
///
/// For each spec: start = event.start + offset_start, end = event.end +
/// offset_end, duration = whole minutes between them, capped at
/// `max_length` (start unchanged). Specs whose duration is not positive
/// emit nothing, as do specs whose offsets overflow the calendar. The
/// iterator borrows its inputs and holds no other state, so calling this
/// again yields the same records.
pub fn synthesize<'a>(
    event: &'a RawEvent,
    template: &'a TemplateEntry,
) -> impl Iterator<Item = ShiftRecord> + 'a {
    template
        .need_ids
        .iter()
        .filter_map(move |spec| shift_for(event, spec))
}

/// The shift one need spec yields for one event, if any.
pub fn shift_for(event: &RawEvent, spec: &NeedSpec) -> Option<ShiftRecord> {
    let (Some(start), Some(end)) = (
        add_minutes(event.start, spec.offset_start),
        add_minutes(event.end, spec.offset_end),
    ) else {
        warn!(
            title = %event.title,
            need_id = %spec.id,
            offset_start = spec.offset_start,
            offset_end = spec.offset_end,
            "need spec skipped: offsets out of range"
        );
        return None;
    };
    let mut duration = minutes_between(start, end);

    if let Some(max) = spec.max_length
        && duration > max
    {
        duration = max;
    }

    if duration <= 0 {
        debug!(
            title = %event.title,
            need = %spec.description,
            need_id = %spec.id,
            duration,
            "need spec skipped: non-positive duration"
        );
        return None;
    }

    Some(ShiftRecord::new(spec.id.clone(), start, duration, spec.slots))
}

use tracing::debug;

use super::command::{MoveCommand, MoveKind, MoveOutcome};
use super::commit::relocate;
use super::request::MoveRequest;
use crate::engine::errors::ExtentError;
use crate::engine::extent::NamedExtents;

/// Free units immediately available at the request's destination.
///
/// Used to order the direct pass: requests that can make the most progress
/// right now go first.
pub fn overlap_score(request: &MoveRequest, free: &NamedExtents) -> u64 {
    if request.is_local() && !free.policy(&request.to_set).local_allowed {
        return 0;
    }
    free.find_overlap(&request.to_set, request.to_start, request.size)
        .map_or(0, |overlap| overlap.size)
}

/// Lands as much of `request` as the destination's free space allows.
///
/// Only the first free run overlapping the destination is used. Uncovered
/// units before and after it come back as fragments; cutting on both sides
/// requires the destination device to allow splitting.
pub fn direct_move(
    request: MoveRequest,
    free: &mut NamedExtents,
    used: &mut NamedExtents,
) -> Result<MoveOutcome, ExtentError> {
    let policy = free.policy(&request.to_set);
    if request.is_local() && !policy.local_allowed {
        debug!(
            target: "planner::direct",
            name = %request.name,
            device = %request.to_set,
            "Local move not allowed on device"
        );
        return Ok(MoveOutcome::Deferred(request));
    }

    let Some(overlap) = free.find_overlap(&request.to_set, request.to_start, request.size) else {
        return Ok(MoveOutcome::Deferred(request));
    };

    if overlap.is_interior() && !policy.split_allowed {
        debug!(
            target: "planner::direct",
            name = %request.name,
            device = %request.to_set,
            overlap_start = overlap.start,
            overlap_size = overlap.size,
            "Destination free space is interior and device forbids splitting"
        );
        return Ok(MoveOutcome::Deferred(request));
    }

    let leading = overlap.leading(request.to_start);
    let trailing = overlap.trailing(request.to_start, request.size);

    let mut fragments = Vec::new();
    if leading > 0 {
        fragments.push(request.slice(0, leading));
    }
    if trailing > 0 {
        fragments.push(request.slice(request.size - trailing, trailing));
    }

    let from_start = request.from_start + leading;
    relocate(
        free,
        used,
        &request.from_set,
        from_start,
        &request.to_set,
        overlap.start,
        overlap.size,
    )?;

    let kind = if overlap.size == request.size {
        MoveKind::Full
    } else {
        MoveKind::Partial
    };

    Ok(MoveOutcome::Direct {
        command: MoveCommand {
            from_set: request.from_set,
            from_start,
            to_set: request.to_set,
            to_start: overlap.start,
            size: overlap.size,
            name: request.name,
            kind,
        },
        fragments,
    })
}

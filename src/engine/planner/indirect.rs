use tracing::debug;

use super::command::{MoveCommand, MoveKind, MoveOutcome};
use super::commit::relocate;
use super::request::MoveRequest;
use crate::engine::errors::ExtentError;
use crate::engine::extent::NamedExtents;

/// Devices whose free space may stage `request`: every device that allows
/// indirect use, minus the request's own source device unless that device
/// also allows local moves. Registry order is preserved.
pub fn staging_devices(request: &MoveRequest, free: &NamedExtents) -> Vec<String> {
    free.iter()
        .filter(|set| set.indirect_allowed())
        .filter(|set| set.device() != request.from_set || set.local_allowed())
        .map(|set| set.device().to_string())
        .collect()
}

/// Parks `request` in free space somewhere else so its current placement is
/// released for other pending moves.
///
/// A request is staged at most once. When no staging region holds the
/// whole request, the first region of at least `min_fragment_size` units
/// takes a leading piece and the rest comes back as a fragment.
pub fn indirect_move(
    request: MoveRequest,
    free: &mut NamedExtents,
    used: &mut NamedExtents,
    min_fragment_size: u64,
) -> Result<MoveOutcome, ExtentError> {
    if request.moved {
        return Ok(MoveOutcome::Deferred(request));
    }

    let candidates = staging_devices(&request, free);

    // The destination is neither free nor occupied by a pending request yet;
    // a direct move will take it once whatever holds it moves away.
    if candidates.iter().any(|d| *d == request.to_set)
        && !used.is_used(&request.to_set, request.to_start, request.size)
    {
        return Ok(MoveOutcome::Deferred(request));
    }

    let min_chunk = min_fragment_size.max(1);
    let found = free
        .find(&request.to_set, request.size, Some(candidates.as_slice()))
        .or_else(|| {
            (min_chunk < request.size)
                .then(|| free.find(&request.to_set, min_chunk, Some(candidates.as_slice())))
                .flatten()
        });

    let Some(found) = found else {
        debug!(
            target: "planner::indirect",
            name = %request.name,
            size = request.size,
            candidates = ?candidates,
            "No staging space for request"
        );
        return Ok(MoveOutcome::Failed(request));
    };

    let placed = found.size.min(request.size);
    let mut fragments = Vec::new();
    if placed < request.size {
        fragments.push(request.slice(placed, request.size - placed));
    }

    relocate(
        free,
        used,
        &request.from_set,
        request.from_start,
        &found.device,
        found.start,
        placed,
    )?;

    let command = MoveCommand {
        from_set: request.from_set.clone(),
        from_start: request.from_start,
        to_set: found.device.clone(),
        to_start: found.start,
        size: placed,
        name: request.name.clone(),
        kind: MoveKind::Indirect,
    };

    let staged = MoveRequest {
        from_set: found.device,
        from_start: found.start,
        size: placed,
        moved: true,
        ..request
    };

    Ok(MoveOutcome::Indirect {
        command,
        staged,
        fragments,
    })
}

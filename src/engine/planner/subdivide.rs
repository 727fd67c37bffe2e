use std::collections::BTreeSet;

use super::request::MoveRequest;

/// Splits every request wherever another request's current placement
/// begins or ends strictly inside its destination range.
///
/// The destination will be vacated piece by piece as those other requests
/// move out, so each piece is planned on its own instead of the whole
/// request being reported as a partial move later.
pub fn subdivide_destinations(requests: Vec<MoveRequest>) -> Vec<MoveRequest> {
    let cuts_per_request: Vec<BTreeSet<u64>> = requests
        .iter()
        .enumerate()
        .map(|(i, req)| {
            requests
                .iter()
                .enumerate()
                .filter(|(j, other)| *j != i && other.from_set == req.to_set)
                .flat_map(|(_, other)| [other.from_start, other.from_end()])
                .filter(|b| *b > req.to_start && *b < req.to_end())
                .map(|b| b - req.to_start)
                .collect()
        })
        .collect();

    let mut out = Vec::with_capacity(requests.len());
    for (req, cuts) in requests.into_iter().zip(cuts_per_request) {
        if cuts.is_empty() {
            out.push(req);
            continue;
        }

        tracing::debug!(
            target: "planner::subdivide",
            name = %req.name,
            pieces = cuts.len() + 1,
            "Subdividing request at source boundaries inside its destination"
        );

        let mut offset = 0;
        for cut in cuts.into_iter().chain(std::iter::once(req.size)) {
            out.push(req.slice(offset, cut - offset));
            offset = cut;
        }
    }
    out
}

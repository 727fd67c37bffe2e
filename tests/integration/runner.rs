use crate::integration::scenarios::TestScenario;
use pvshuffle::engine::extent::NamedExtents;
use pvshuffle::engine::planner::{MoveKind, PlanOutcome, plan_moves};
use std::collections::HashMap;
use tracing::{debug, info};

fn device_totals(free: &NamedExtents, used: &NamedExtents) -> HashMap<String, u64> {
    let mut totals: HashMap<String, u64> = HashMap::new();
    for (device, size) in free.totals().into_iter().chain(used.totals()) {
        *totals.entry(device).or_default() += size;
    }
    totals.retain(|_, size| *size > 0);
    totals
}

/// `(device, offset)` -> `(request name, unit index within the request)`.
type Cells = HashMap<(String, u64), (String, u64)>;

/// Replays the commands unit by unit. Every command must carry only its own
/// request's units into empty cells; a complete plan must leave each
/// request's units in order across its destination, and a failed request's
/// units must sit where the outcome says they are.
fn check_unit_placement(scenario: &TestScenario, outcome: &PlanOutcome) {
    let mut cells: Cells = HashMap::new();
    for req in &scenario.requests {
        for unit in 0..req.size {
            cells.insert((req.from_set.clone(), req.from_start + unit), (req.name.clone(), unit));
        }
    }
    let origin: HashMap<&str, (&str, u64)> = scenario
        .requests
        .iter()
        .map(|r| (r.name.as_str(), (r.to_set.as_str(), r.to_start)))
        .collect();

    for cmd in &outcome.moves {
        let carried: Vec<(String, u64)> = (0..cmd.size)
            .map(|k| {
                let unit = cells
                    .remove(&(cmd.from_set.clone(), cmd.from_start + k))
                    .unwrap_or_else(|| {
                        panic!("[{}] {} reads an empty cell at +{}", scenario.name, cmd, k)
                    });
                assert_eq!(
                    unit.0, cmd.name,
                    "[{}] {} carries units of another request",
                    scenario.name, cmd
                );
                unit
            })
            .collect();
        for (k, unit) in carried.into_iter().enumerate() {
            let cell = (cmd.to_set.clone(), cmd.to_start + k as u64);
            assert!(
                !cells.contains_key(&cell),
                "[{}] {} overwrites {}:{}",
                scenario.name,
                cmd,
                cell.0,
                cell.1
            );
            cells.insert(cell, unit);
        }
    }

    if outcome.is_complete() {
        for req in &scenario.requests {
            for unit in 0..req.size {
                assert_eq!(
                    cells.get(&(req.to_set.clone(), req.to_start + unit)),
                    Some(&(req.name.clone(), unit)),
                    "[{}] '{}' unit {} is not at its destination",
                    scenario.name,
                    req.name,
                    unit
                );
            }
        }
    }

    for req in &outcome.failed_moves {
        let (to_set, to_start) = origin[req.name.as_str()];
        let first_unit = req.to_start - to_start;
        assert_eq!(req.to_set, to_set, "[{}] failed request retargeted", scenario.name);
        for k in 0..req.size {
            assert_eq!(
                cells.get(&(req.from_set.clone(), req.from_start + k)),
                Some(&(req.name.clone(), first_unit + k)),
                "[{}] failed request '{}' lost its current placement",
                scenario.name,
                req.name
            );
        }
    }
}

pub fn run_scenario(scenario: &TestScenario) {
    info!("▶ Running scenario: {}", scenario.name);

    let mut free = NamedExtents::new();
    for (device, policy) in &scenario.policies {
        free.set_policy(device, *policy);
    }
    free.add_extents(&scenario.free);
    let mut used = NamedExtents::new();

    let mut original: HashMap<String, u64> = HashMap::new();
    let mut before = free.totals().into_iter().collect::<HashMap<_, _>>();
    for req in &scenario.requests {
        *original.entry(req.name.clone()).or_default() += req.size;
        *before.entry(req.from_set.clone()).or_default() += req.size;
    }
    before.retain(|_, size| *size > 0);

    let outcome = plan_moves(scenario.requests.clone(), &mut free, &mut used)
        .unwrap_or_else(|e| panic!("[{}] planning failed: {e}", scenario.name));
    debug!(
        moves = outcome.moves.len(),
        failed = outcome.failed_moves.len(),
        rounds = outcome.rounds,
        "[{}] planned",
        scenario.name
    );

    // Space is neither created nor lost.
    assert_eq!(
        device_totals(&free, &used),
        before,
        "[{}] device capacity changed",
        scenario.name
    );

    // Free and used never claim the same units.
    for set in used.iter() {
        for iv in set.intervals() {
            assert!(
                free.find_overlap(set.device(), iv.start, iv.size).is_none(),
                "[{}] {}[{}, {}) is both free and used",
                scenario.name,
                set.device(),
                iv.start,
                iv.end()
            );
        }
    }

    // Landed pieces and leftovers add up to every request.
    let mut accounted: HashMap<String, u64> = HashMap::new();
    for cmd in outcome.moves.iter().filter(|c| c.kind != MoveKind::Indirect) {
        *accounted.entry(cmd.name.clone()).or_default() += cmd.size;
    }
    for req in outcome.failed_moves.iter().chain(&outcome.unchanged) {
        *accounted.entry(req.name.clone()).or_default() += req.size;
    }
    accounted.retain(|_, size| *size > 0);
    let mut expected = original.clone();
    expected.retain(|_, size| *size > 0);
    assert_eq!(accounted, expected, "[{}] size accounting", scenario.name);

    check_unit_placement(scenario, &outcome);

    if let Some(expect) = &scenario.expect {
        assert_eq!(
            outcome.is_complete(),
            expect.complete,
            "[{}] completeness",
            scenario.name
        );
        if let Some(kinds) = &expect.kinds {
            let actual: Vec<MoveKind> = outcome.moves.iter().map(|c| c.kind).collect();
            assert_eq!(&actual, kinds, "[{}] command kinds", scenario.name);
        }
        let mut failed: Vec<&str> = outcome.failed_moves.iter().map(|r| r.name.as_str()).collect();
        failed.sort_unstable();
        failed.dedup();
        assert_eq!(failed, expect.failed, "[{}] failed requests", scenario.name);
    }

    info!("✓ Scenario passed: {}", scenario.name);
}

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use super::segment::{FREE_SEGTYPE, Segment};
use crate::engine::errors::ReportError;

#[derive(Debug, Deserialize)]
struct Report {
    report: Vec<ReportSection>,
}

#[derive(Debug, Deserialize)]
struct ReportSection {
    #[serde(default)]
    pv: Option<Vec<PvsEntry>>,
}

/// One row of `pvs --segments --reportformat json`. LVM prints every value
/// as a string; numeric columns of free segments may be empty.
#[derive(Debug, Deserialize)]
struct PvsEntry {
    pv_name: String,
    pvseg_start: String,
    pvseg_size: String,
    #[serde(default)]
    segtype: String,
    #[serde(default)]
    lv_name: String,
    #[serde(default)]
    seg_start_pe: String,
    #[serde(default)]
    seg_size_pe: String,
}

fn parse_num(field: &'static str, value: &str) -> Result<u64, ReportError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse().map_err(|_| ReportError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Parses an LVM `pvs` JSON segment report into normalized [`Segment`]s.
///
/// Segments come out ordered by device name then start. Occupied segments
/// are numbered per logical volume (1-based) in logical order.
pub fn parse_pvs_report(json: &str) -> Result<Vec<Segment>, ReportError> {
    let report: Report = serde_json::from_str(json)?;
    let entries = report
        .report
        .into_iter()
        .next()
        .and_then(|section| section.pv)
        .ok_or(ReportError::MissingSection)?;

    let mut rows = Vec::with_capacity(entries.len());
    for entry in entries {
        let pv_start = parse_num("pvseg_start", &entry.pvseg_start)?;
        let pv_size = parse_num("pvseg_size", &entry.pvseg_size)?;
        let lv_start = parse_num("seg_start_pe", &entry.seg_start_pe)?;
        let lv_size = parse_num("seg_size_pe", &entry.seg_size_pe)?;
        rows.push((entry, pv_start, pv_size, lv_start, lv_size));
    }
    rows.sort_by(|a, b| (&a.0.pv_name, a.1).cmp(&(&b.0.pv_name, b.1)));

    // Logical order of each LV's segments -> 1-based index.
    let index_of = {
        let mut by_lv: HashMap<&str, Vec<(u64, usize)>> = HashMap::new();
        for (i, (entry, _, _, lv_start, _)) in rows.iter().enumerate() {
            if !entry.lv_name.is_empty() {
                by_lv
                    .entry(entry.lv_name.as_str())
                    .or_default()
                    .push((*lv_start, i));
            }
        }
        let mut index_of = vec![None; rows.len()];
        for segs in by_lv.values_mut() {
            segs.sort();
            for (n, (_, row)) in segs.iter().enumerate() {
                index_of[*row] = Some(n as u32 + 1);
            }
        }
        index_of
    };

    let segments: Vec<Segment> = rows
        .into_iter()
        .zip(index_of)
        .map(|((entry, pv_start, pv_size, lv_start, lv_size), lv_index)| {
            let segtype = if entry.segtype.is_empty() {
                FREE_SEGTYPE.to_string()
            } else {
                entry.segtype
            };
            if segtype == FREE_SEGTYPE || entry.lv_name.is_empty() {
                return Segment {
                    segtype,
                    ..Segment::free(entry.pv_name, pv_start, pv_size)
                };
            }
            Segment {
                segtype,
                pv_name: entry.pv_name,
                pv_start,
                pv_size,
                lv_name: Some(entry.lv_name),
                lv_start: Some(lv_start),
                lv_size: Some(lv_size),
                lv_index,
                moved: false,
                moved_pv_name: None,
                moved_pv_start: None,
            }
        })
        .collect();

    debug!(
        target: "report::pvs",
        segments = segments.len(),
        "Parsed pvs report"
    );
    Ok(segments)
}

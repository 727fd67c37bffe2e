use crate::engine::errors::ExtentError;
use crate::engine::extent::NamedExtents;

/// Moves `size` units from `from_set[from_start..]` to `to_set[to_start..]`
/// in the bookkeeping: the source is vacated (used -> free), then the
/// destination occupied (free -> used).
///
/// Fails if the source is not wholly used or the destination not wholly
/// free; both mean the model is corrupt.
pub fn relocate(
    free: &mut NamedExtents,
    used: &mut NamedExtents,
    from_set: &str,
    from_start: u64,
    to_set: &str,
    to_start: u64,
    size: u64,
) -> Result<(), ExtentError> {
    used.remove(from_set, from_start, size)?;
    free.add(from_set, from_start, size);

    free.remove(to_set, to_start, size)?;
    used.add(to_set, to_start, size);
    Ok(())
}

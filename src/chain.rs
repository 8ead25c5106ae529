use crate::error::FcfError;
use crate::log;
use crate::utils;
use std::fs;

/// Bytes taken by the four leading integers of each cut record.
const CUT_HEADER_SIZE: usize = 16;

/// A cut as stored in the binary cut file, already placed in
/// chronological order. The on-disk backward pointer is consumed during
/// traversal and not kept.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCut {
    /// 1-based construction order, assigned after traversal.
    pub chronological_index: usize,
    pub construction_iteration: i32,
    pub forward_pass_index: i32,
    /// Iteration at which the cut was deactivated, 0 while active.
    pub deactivation_iteration: i32,
    pub rhs: f64,
    /// Every 64-bit value of the record after the RHS, in file order.
    pub coefficients: Vec<f64>,
}

/// Number of 64-bit values (RHS included) in a cut record of the given
/// size. Fails for sizes that cannot hold the header and at least the
/// RHS, or that do not align to whole values.
pub fn record_value_count(record_size: usize) -> Result<usize, FcfError> {
    let payload = record_size.saturating_sub(CUT_HEADER_SIZE);
    if payload < 8 || payload % 8 != 0 {
        return Err(FcfError::InvalidRecordSize { record_size });
    }
    Ok(payload / 8)
}

/// Decodes the binary cut file by following the backward linked list
/// embedded in its records. Each record at byte offset
/// `(index - 1) * record_size` starts with four integers
/// (`previous_index`, construction iteration, forward pass index,
/// deactivation iteration) followed by the RHS and the coefficients.
///
/// Traversal starts at `last_cut_index` and follows `previous_index`
/// until the null pointer (0), an out-of-bounds pointer, or `max_cuts`
/// reads. Every termination is normal and returns the cuts accumulated
/// so far, reversed into chronological order and reindexed 1..N. The
/// record size is validated before any I/O.
pub fn decode_cut_chain(
    path: &str,
    record_size: usize,
    last_cut_index: i32,
    max_cuts: usize,
) -> Result<Vec<RawCut>, FcfError> {
    let value_count = record_value_count(record_size)?;
    let buffer = fs::read(path).map_err(|e| FcfError::io(path, e))?;

    let mut newest_first = Vec::<RawCut>::new();
    let mut index = last_cut_index;
    let mut bounded = false;
    loop {
        // null pointer: the chain is fully traversed
        if index == 0 {
            break;
        }
        if newest_first.len() >= max_cuts {
            bounded = true;
            break;
        }
        let offset = match record_offset(index, record_size, buffer.len()) {
            Some(offset) => offset,
            None => {
                log::out_of_bounds_pointer_warning(
                    path,
                    index,
                    (index.max(1) as usize - 1) * record_size,
                    buffer.len(),
                );
                break;
            }
        };
        let (previous_index, cut) =
            decode_cut_record(&buffer, offset, value_count);
        newest_first.push(cut);
        index = previous_index;
    }
    log::traversal_summary(path, newest_first.len(), bounded);

    Ok(reindex(newest_first))
}

/// Byte offset of the record at a 1-based index, when it lies fully
/// inside the file.
fn record_offset(
    index: i32,
    record_size: usize,
    file_size: usize,
) -> Option<usize> {
    if index < 1 {
        return None;
    }
    let offset = (index as usize - 1) * record_size;
    if offset + record_size > file_size {
        return None;
    }
    Some(offset)
}

fn decode_cut_record(
    buffer: &[u8],
    offset: usize,
    value_count: usize,
) -> (i32, RawCut) {
    let previous_index = utils::read_i32(buffer, offset);
    let construction_iteration = utils::read_i32(buffer, offset + 4);
    let forward_pass_index = utils::read_i32(buffer, offset + 8);
    let deactivation_iteration = utils::read_i32(buffer, offset + 12);
    let rhs = utils::read_f64(buffer, offset + CUT_HEADER_SIZE);
    let mut coefficients = Vec::<f64>::with_capacity(value_count - 1);
    for i in 1..value_count {
        coefficients
            .push(utils::read_f64(buffer, offset + CUT_HEADER_SIZE + 8 * i));
    }
    let cut = RawCut {
        chronological_index: 0,
        construction_iteration,
        forward_pass_index,
        deactivation_iteration,
        rhs,
        coefficients,
    };
    (previous_index, cut)
}

/// Reverses the newest-first traversal order and assigns 1-based
/// chronological indices, producing new cuts instead of mutating.
fn reindex(mut newest_first: Vec<RawCut>) -> Vec<RawCut> {
    newest_first.reverse();
    newest_first
        .into_iter()
        .enumerate()
        .map(|(position, cut)| RawCut {
            chronological_index: position + 1,
            ..cut
        })
        .collect()
}

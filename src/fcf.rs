use crate::cut::{BendersCut, CutSet};
use rayon::prelude::*;
use std::collections::HashMap;

/// Evaluates the future cost function at the given stored volumes: the
/// maximum over all cuts of `rhs + sum(coefficient * volume)`, with
/// missing volumes treated as 0.0. Returns the cost and the
/// chronological index of the binding cut; ties resolve to the lowest
/// index, which fixes the cut whose coefficients are reported as
/// marginal values. An empty cut set evaluates to cost 0.0 with no
/// binding cut.
///
/// Summation order over a cut's sparse coefficient map is unspecified,
/// so independently built cut sets may differ at the ULP level.
pub fn evaluate(
    cut_set: &CutSet,
    volumes: &HashMap<i32, f64>,
) -> (f64, Option<usize>) {
    let mut cost = 0.0;
    let mut binding_cut: Option<usize> = None;
    for cut in cut_set.cuts.iter() {
        let height = cut.eval_height_at_volumes(volumes);
        // strict comparison keeps the first cut on ties
        if binding_cut.is_none() || height > cost {
            cost = height;
            binding_cut = Some(cut.id);
        }
    }
    (cost, binding_cut)
}

/// The marginal value of stored water in one reservoir: the binding
/// cut's coefficient for `reservoir_id`, or 0.0 when the coefficient
/// is absent or the cut set is empty.
pub fn water_value(
    cut_set: &CutSet,
    volumes: &HashMap<i32, f64>,
    reservoir_id: i32,
) -> f64 {
    match binding_cut(cut_set, volumes) {
        Some(cut) => cut
            .reservoir_coefficients
            .get(&reservoir_id)
            .copied()
            .unwrap_or(0.0),
        None => 0.0,
    }
}

/// All marginal water values at once, taken from the same binding cut
/// as `water_value` in a single evaluation pass.
pub fn water_values(
    cut_set: &CutSet,
    volumes: &HashMap<i32, f64>,
) -> HashMap<i32, f64> {
    match binding_cut(cut_set, volumes) {
        Some(cut) => cut.reservoir_coefficients.clone(),
        None => HashMap::new(),
    }
}

/// Evaluates the future cost function at many volume points in
/// parallel. The cut set is immutable and the evaluation pure, so the
/// points are independent.
pub fn evaluate_sweep(
    cut_set: &CutSet,
    volume_points: &[HashMap<i32, f64>],
) -> Vec<(f64, Option<usize>)> {
    volume_points
        .par_iter()
        .map(|volumes| evaluate(cut_set, volumes))
        .collect()
}

fn binding_cut<'a>(
    cut_set: &'a CutSet,
    volumes: &HashMap<i32, f64>,
) -> Option<&'a BendersCut> {
    let (_, binding_id) = evaluate(cut_set, volumes);
    binding_id
        .and_then(|id| cut_set.cuts.iter().find(|cut| cut.id == id))
}

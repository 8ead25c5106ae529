use crate::chain::RawCut;
use crate::log;
use std::collections::HashMap;

/// Bytes of a cut record not occupied by 64-bit values.
const CUT_HEADER_SIZE: usize = 16;

/// A decoded Benders cut: a supporting hyperplane of the future cost
/// function. Reservoir coefficients are kept as a sparse map over
/// reservoir codes; a missing entry means exactly 0.0. Coefficients
/// beyond the reservoir block (travel-time and thermal terms) are kept
/// opaque, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct BendersCut {
    /// 1-based chronological index.
    pub id: usize,
    pub construction_iteration: i32,
    pub forward_pass_index: i32,
    /// Iteration at which the producer deactivated the cut, 0 while active.
    pub deactivation_iteration: i32,
    pub rhs: f64,
    pub reservoir_coefficients: HashMap<i32, f64>,
    pub residual_coefficients: Vec<f64>,
}

impl BendersCut {
    pub fn is_active(&self) -> bool {
        self.deactivation_iteration == 0
    }

    /// Height of the cut hyperplane at the given stored volumes.
    /// Reservoirs absent from `volumes` contribute with volume 0.0.
    pub fn eval_height_at_volumes(
        &self,
        volumes: &HashMap<i32, f64>,
    ) -> f64 {
        let mut height = self.rhs;
        for (reservoir_id, coefficient) in self.reservoir_coefficients.iter()
        {
            height +=
                coefficient * volumes.get(reservoir_id).copied().unwrap_or(0.0);
        }
        height
    }
}

/// An immutable, chronologically ordered set of Benders cuts together
/// with the reservoir ordering used to build it.
#[derive(Debug, Clone, PartialEq)]
pub struct CutSet {
    pub cuts: Vec<BendersCut>,
    pub reservoir_ids: Vec<i32>,
    /// Size in bytes of the cut records these cuts were decoded from,
    /// 0 for an empty set.
    pub record_size: usize,
    pub stage_count: usize,
}

impl CutSet {
    pub fn cut_count(&self) -> usize {
        self.cuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }

    /// Cuts the producer had not deactivated when the file was written.
    pub fn active_cuts(&self) -> impl Iterator<Item = &BendersCut> {
        self.cuts.iter().filter(|cut| cut.is_active())
    }
}

/// Merges raw cuts with the reservoir ordering from the mapcut file.
/// The first `reservoir_ids.len()` coefficients of each cut map
/// positionally to reservoir codes; the remainder becomes the opaque
/// residual vector. Zero-valued coefficients are omitted from the
/// sparse map. A cut with fewer coefficients than reservoirs maps the
/// overlapping prefix with a warning; the build never aborts.
pub fn build_cut_set(
    raw_cuts: Vec<RawCut>,
    reservoir_ids: &[i32],
) -> CutSet {
    let record_size = raw_cuts
        .first()
        .map(|cut| CUT_HEADER_SIZE + 8 * (1 + cut.coefficients.len()))
        .unwrap_or(0);
    let cuts = raw_cuts
        .into_iter()
        .map(|raw_cut| build_cut(raw_cut, reservoir_ids))
        .collect();
    CutSet {
        cuts,
        reservoir_ids: reservoir_ids.to_vec(),
        record_size,
        stage_count: 0,
    }
}

fn build_cut(raw_cut: RawCut, reservoir_ids: &[i32]) -> BendersCut {
    let mapped_count = reservoir_ids.len().min(raw_cut.coefficients.len());
    if mapped_count < reservoir_ids.len() {
        log::short_coefficient_vector_warning(
            raw_cut.chronological_index,
            reservoir_ids.len(),
            raw_cut.coefficients.len(),
        );
    }
    let mut reservoir_coefficients =
        HashMap::<i32, f64>::with_capacity(mapped_count);
    for (position, reservoir_id) in
        reservoir_ids[..mapped_count].iter().enumerate()
    {
        let coefficient = raw_cut.coefficients[position];
        if coefficient != 0.0 {
            reservoir_coefficients.insert(*reservoir_id, coefficient);
        }
    }
    let residual_coefficients = raw_cut.coefficients[mapped_count..].to_vec();
    BendersCut {
        id: raw_cut.chronological_index,
        construction_iteration: raw_cut.construction_iteration,
        forward_pass_index: raw_cut.forward_pass_index,
        deactivation_iteration: raw_cut.deactivation_iteration,
        rhs: raw_cut.rhs,
        reservoir_coefficients,
        residual_coefficients,
    }
}

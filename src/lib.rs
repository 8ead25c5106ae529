pub mod chain;
pub mod config;
pub mod cut;
pub mod error;
pub mod fcf;
mod log;
pub mod mapcut;
pub mod utils;

pub use chain::{decode_cut_chain, RawCut};
pub use config::DecodeConfig;
pub use cut::{build_cut_set, BendersCut, CutSet};
pub use error::FcfError;
pub use fcf::{evaluate, evaluate_sweep, water_value, water_values};
pub use mapcut::{decode_mapcut, MapcutMetadata};

/// Loads the full future cost function from a mapcut/cut file pair:
/// decodes the mapcut metadata, follows the cut chain from the newest
/// recorded cut and merges the coefficients with the mapcut's reservoir
/// ordering. The cut record size comes from `config.cut_record_size`
/// when set, otherwise from the mapcut file itself.
pub fn load_fcf(
    mapcut_path: &str,
    cut_path: &str,
    config: &DecodeConfig,
) -> Result<CutSet, FcfError> {
    let metadata = decode_mapcut(mapcut_path, config)?;
    let record_size = config
        .cut_record_size
        .unwrap_or(metadata.cut_record_size.max(0) as usize);
    let raw_cuts = decode_cut_chain(
        cut_path,
        record_size,
        metadata.last_cut_index(),
        config.max_cuts,
    )?;
    let mut cut_set = build_cut_set(raw_cuts, &metadata.reservoir_ids);
    if let Some(stages) = &metadata.stages {
        cut_set.stage_count = stages.stage_count.max(0) as usize;
    }
    Ok(cut_set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    // header + rhs + 2 coefficients per cut record
    const CUT_RECORD_SIZE: usize = 40;

    fn push_i32s(buffer: &mut Vec<u8>, values: &[i32]) {
        for value in values {
            buffer.extend_from_slice(&value.to_le_bytes());
        }
    }

    fn test_config() -> DecodeConfig {
        DecodeConfig {
            mapcut_record_size: 64,
            ..DecodeConfig::default()
        }
    }

    /// A mapcut/cut pair with reservoirs [1, 17] and three chained cuts.
    fn write_case(
        dir: &tempfile::TempDir,
        config: &DecodeConfig,
    ) -> (String, String) {
        let record_size = config.mapcut_record_size;
        let mut mapcut = Vec::<u8>::new();
        push_i32s(&mut mapcut, &[3, 3, 1, 2, 1]);
        push_i32s(&mut mapcut, &[3]);
        mapcut.resize(record_size, 0u8);
        push_i32s(&mut mapcut, &[CUT_RECORD_SIZE as i32, 1, 1, 2025]);
        mapcut.resize(2 * record_size, 0u8);
        push_i32s(&mut mapcut, &[1, 17]);
        mapcut.resize(config.stage_record_index * record_size, 0u8);
        push_i32s(&mut mapcut, &[3, 1, 2, 3, 1, 1, 1]);

        let mut cuts = Vec::<u8>::new();
        let records: [(i32, f64, [f64; 2]); 3] = [
            (0, 100.0, [-2.0, 0.0]),
            (1, 50.0, [1.0, 0.5]),
            (2, 75.0, [0.0, -1.0]),
        ];
        for (index, (previous, rhs, coefficients)) in
            records.iter().enumerate()
        {
            push_i32s(&mut cuts, &[*previous, index as i32 + 1, 1, 0]);
            cuts.extend_from_slice(&rhs.to_le_bytes());
            for coefficient in coefficients {
                cuts.extend_from_slice(&coefficient.to_le_bytes());
            }
        }

        let mapcut_path = dir.path().join("mapcut.dat");
        let cut_path = dir.path().join("cortes.dat");
        std::fs::File::create(&mapcut_path)
            .unwrap()
            .write_all(&mapcut)
            .unwrap();
        std::fs::File::create(&cut_path)
            .unwrap()
            .write_all(&cuts)
            .unwrap();
        (
            mapcut_path.to_str().unwrap().to_owned(),
            cut_path.to_str().unwrap().to_owned(),
        )
    }

    #[test]
    fn test_load_fcf_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config();
        let (mapcut_path, cut_path) = write_case(&dir, &config);

        let cut_set = load_fcf(&mapcut_path, &cut_path, &config).unwrap();
        assert_eq!(cut_set.cut_count(), 3);
        assert_eq!(cut_set.reservoir_ids, vec![1, 17]);
        assert_eq!(cut_set.record_size, CUT_RECORD_SIZE);
        assert_eq!(cut_set.stage_count, 3);

        // chronological order recovered from the backward chain
        let ids: Vec<usize> = cut_set.cuts.iter().map(|cut| cut.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(cut_set.cuts[0].rhs, 100.0);
        assert_eq!(cut_set.cuts[2].rhs, 75.0);

        // low storage: the steep first cut binds
        let volumes = HashMap::from([(1, 10.0), (17, 0.0)]);
        let (cost, binding) = evaluate(&cut_set, &volumes);
        assert_eq!(cost, 80.0);
        assert_eq!(binding, Some(1));
        assert_eq!(water_value(&cut_set, &volumes, 1), -2.0);
    }

    #[test]
    fn test_load_fcf_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config();
        let (mapcut_path, cut_path) = write_case(&dir, &config);

        let first = load_fcf(&mapcut_path, &cut_path, &config).unwrap();
        let second = load_fcf(&mapcut_path, &cut_path, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_fcf_explicit_record_size_override() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config();
        let (mapcut_path, cut_path) = write_case(&dir, &config);
        config.cut_record_size = Some(CUT_RECORD_SIZE);

        let cut_set = load_fcf(&mapcut_path, &cut_path, &config).unwrap();
        assert_eq!(cut_set.cut_count(), 3);
    }

    #[test]
    fn test_load_fcf_empty_mapcut_yields_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config();
        let mapcut_path = dir.path().join("mapcut.dat");
        let cut_path = dir.path().join("cortes.dat");
        std::fs::write(&mapcut_path, [0u8; 8]).unwrap();
        std::fs::write(&cut_path, [0u8; 0]).unwrap();

        // zeroed metadata has no usable record size: the cut decode must
        // refuse it as a configuration error before touching the file
        let result = load_fcf(
            mapcut_path.to_str().unwrap(),
            cut_path.to_str().unwrap(),
            &config,
        );
        assert!(matches!(result, Err(FcfError::InvalidRecordSize { .. })));
    }
}

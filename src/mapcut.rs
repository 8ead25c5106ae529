use crate::config::DecodeConfig;
use crate::error::FcfError;
use crate::log;
use crate::utils;
use chrono::NaiveDate;
use std::fs;

/// Number of 32-bit integers in the fixed header of record 0.
const HEADER_FIELD_COUNT: usize = 5;
/// Minimum file size for a decodable mapcut: the fixed header fields.
const MIN_HEADER_SIZE: usize = 4 * HEADER_FIELD_COUNT;

/// Optional stage structure written by some producer versions at a
/// configurable record position of the mapcut file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageStructure {
    pub stage_count: i32,
    pub first_node_per_stage: Vec<i32>,
    pub load_levels_per_stage: Vec<i32>,
}

/// Metadata decoded from the binary mapcut file. The ordered
/// `reservoir_ids` list is the hard requirement downstream: it gives
/// positional meaning to the coefficients of every cut record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapcutMetadata {
    pub iteration_count: i32,
    pub cut_count: i32,
    pub submarket_count: i32,
    pub reservoir_count: i32,
    pub scenario_count: i32,
    /// Index of the newest cut of each scenario node in the cut file.
    pub last_cut_indices: Vec<i32>,
    /// Size in bytes of each record of the companion cut file.
    pub cut_record_size: i32,
    pub start_date: Option<NaiveDate>,
    /// Reservoir codes in coefficient order.
    pub reservoir_ids: Vec<i32>,
    pub stages: Option<StageStructure>,
}

impl MapcutMetadata {
    /// The starting point for a full cut chain traversal: the largest
    /// per-scenario index, whose backward chain reaches every cut.
    pub fn last_cut_index(&self) -> i32 {
        self.last_cut_indices.iter().copied().max().unwrap_or(0)
    }
}

/// Decodes the binary mapcut file. The file is partitioned into logical
/// records of `config.mapcut_record_size` bytes:
///
/// - record 0: five header integers (iteration, cut, submarket,
///   reservoir and scenario counts) followed by one last-cut index per
///   scenario node,
/// - record 1: cut-file record size and case start day/month/year,
/// - record 2: the ordered reservoir codes,
/// - record `config.stage_record_index`: optional stage structure.
///
/// A file shorter than the minimum header yields the zeroed metadata
/// object with a warning. Truncated arrays keep their valid prefix.
/// Only I/O failures are returned as errors.
pub fn decode_mapcut(
    path: &str,
    config: &DecodeConfig,
) -> Result<MapcutMetadata, FcfError> {
    let buffer = fs::read(path).map_err(|e| FcfError::io(path, e))?;
    if buffer.len() < MIN_HEADER_SIZE {
        log::short_file_warning(path, MIN_HEADER_SIZE, buffer.len());
        return Ok(MapcutMetadata::default());
    }

    let mut metadata = MapcutMetadata {
        iteration_count: utils::read_i32(&buffer, 0),
        cut_count: utils::read_i32(&buffer, 4),
        submarket_count: utils::read_i32(&buffer, 8),
        reservoir_count: utils::read_i32(&buffer, 12),
        scenario_count: utils::read_i32(&buffer, 16),
        ..MapcutMetadata::default()
    };

    let scenario_count = metadata.scenario_count.max(0) as usize;
    metadata.last_cut_indices =
        utils::read_i32_array(&buffer, MIN_HEADER_SIZE, scenario_count);
    if metadata.last_cut_indices.len() < scenario_count {
        log::truncated_record_warning(
            path,
            MIN_HEADER_SIZE,
            MIN_HEADER_SIZE + 4 * scenario_count,
            buffer.len(),
        );
    }

    decode_case_record(path, &buffer, config, &mut metadata);
    decode_reservoir_record(path, &buffer, config, &mut metadata);
    metadata.stages = decode_stage_record(path, &buffer, config);

    Ok(metadata)
}

fn decode_case_record(
    path: &str,
    buffer: &[u8],
    config: &DecodeConfig,
    metadata: &mut MapcutMetadata,
) {
    let offset = config.mapcut_record_size;
    if offset + 16 > buffer.len() {
        log::truncated_record_warning(path, offset, offset + 16, buffer.len());
        return;
    }
    metadata.cut_record_size = utils::read_i32(buffer, offset);
    let day = utils::read_i32(buffer, offset + 4);
    let month = utils::read_i32(buffer, offset + 8);
    let year = utils::read_i32(buffer, offset + 12);
    // garbage day/month/year fields decode to None instead of failing
    metadata.start_date =
        NaiveDate::from_ymd_opt(year, month as u32, day as u32);
}

fn decode_reservoir_record(
    path: &str,
    buffer: &[u8],
    config: &DecodeConfig,
    metadata: &mut MapcutMetadata,
) {
    let offset = 2 * config.mapcut_record_size;
    let reservoir_count = metadata.reservoir_count.max(0) as usize;
    metadata.reservoir_ids =
        utils::read_i32_array(buffer, offset, reservoir_count);
    if metadata.reservoir_ids.len() < reservoir_count {
        log::truncated_record_warning(
            path,
            offset,
            offset + 4 * reservoir_count,
            buffer.len(),
        );
    }
}

fn decode_stage_record(
    path: &str,
    buffer: &[u8],
    config: &DecodeConfig,
) -> Option<StageStructure> {
    let offset = config.stage_record_index * config.mapcut_record_size;
    if offset + 4 > buffer.len() {
        log::missing_stage_record(path, offset);
        return None;
    }
    let stage_count = utils::read_i32(buffer, offset);
    if stage_count <= 0 {
        log::missing_stage_record(path, offset);
        return None;
    }
    let count = stage_count as usize;
    let first_node_per_stage =
        utils::read_i32_array(buffer, offset + 4, count);
    let load_levels_per_stage =
        utils::read_i32_array(buffer, offset + 4 + 4 * count, count);
    if first_node_per_stage.len() < count || load_levels_per_stage.len() < count
    {
        log::missing_stage_record(path, offset);
        return None;
    }
    Some(StageStructure {
        stage_count,
        first_node_per_stage,
        load_levels_per_stage,
    })
}

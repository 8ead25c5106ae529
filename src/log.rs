use tracing::{debug, warn};

/// Helper function for warning about a file that is too short to hold
/// even the fixed header of its format.
pub fn short_file_warning(path: &str, expected: usize, actual: usize) {
    warn!(
        path,
        expected_bytes = expected,
        actual_bytes = actual,
        "file shorter than minimum header, returning empty metadata"
    );
}

/// Helper function for warning about a logical record that ends past
/// the end of the file. The valid prefix is kept.
pub fn truncated_record_warning(
    path: &str,
    offset: usize,
    expected: usize,
    actual: usize,
) {
    warn!(
        path,
        offset,
        expected_bytes = expected,
        actual_bytes = actual,
        "truncated record, keeping valid prefix"
    );
}

/// Helper function for warning about a backward pointer that falls
/// outside the valid record range of the cut file.
pub fn out_of_bounds_pointer_warning(
    path: &str,
    index: i32,
    offset: usize,
    file_size: usize,
) {
    warn!(
        path,
        index,
        offset,
        file_size,
        "cut pointer outside file bounds, stopping traversal"
    );
}

/// Helper function for warning about a cut whose coefficient vector is
/// shorter than the reservoir ordering expects.
pub fn short_coefficient_vector_warning(
    cut_index: usize,
    expected: usize,
    actual: usize,
) {
    warn!(
        cut_index,
        expected_coefficients = expected,
        actual_coefficients = actual,
        "cut has fewer coefficients than reservoirs, mapping prefix"
    );
}

/// Helper function for reporting a skipped optional stage record.
pub fn missing_stage_record(path: &str, offset: usize) {
    debug!(path, offset, "stage structure record absent, skipping");
}

/// Helper function for reporting how a cut chain traversal ended.
pub fn traversal_summary(path: &str, cut_count: usize, bounded: bool) {
    debug!(
        path,
        cut_count, bounded, "cut chain traversal finished"
    );
}

/// Helper function for reading a little-endian 32-bit signed integer
/// from a byte buffer. The caller is expected to have checked that
/// `offset + 4` is within bounds.
///
/// ## Example
///
/// ```
/// let buffer = 42i32.to_le_bytes();
///
/// let value = fcf_rs::utils::read_i32(&buffer, 0);
/// assert_eq!(value, 42);
/// ```
pub fn read_i32(buffer: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes(buffer[offset..offset + 4].try_into().unwrap())
}

/// Helper function for reading a little-endian 64-bit float from a
/// byte buffer. The caller is expected to have checked that
/// `offset + 8` is within bounds.
///
/// ## Example
///
/// ```
/// let buffer = 1.5f64.to_le_bytes();
///
/// let value = fcf_rs::utils::read_f64(&buffer, 0);
/// assert_eq!(value, 1.5);
/// ```
pub fn read_f64(buffer: &[u8], offset: usize) -> f64 {
    f64::from_le_bytes(buffer[offset..offset + 8].try_into().unwrap())
}

/// Reads up to `count` consecutive little-endian 32-bit integers starting
/// at `offset`, stopping early at the end of the buffer. The count may
/// come from a file-claimed header field, so the allocation is sized by
/// what the buffer actually holds, not by the claim.
pub fn read_i32_array(buffer: &[u8], offset: usize, count: usize) -> Vec<i32> {
    let count = count.min(buffer.len().saturating_sub(offset) / 4);
    let mut values = Vec::<i32>::with_capacity(count);
    for i in 0..count {
        values.push(read_i32(buffer, offset + 4 * i));
    }
    values
}

//! # 位平面读写原语
//!
//! 以 1 bit / 采样的方式把整数写入连续采样的最低有效位，或从中读回。
//! 位序为 MSB 优先：区域中的第一个采样承载最高位。

use crate::constants::LSB_MASK;
use crate::error::{Result, StegoError};

fn region_end(len: usize, dix: usize, size: usize) -> Result<usize> {
    match dix.checked_add(size) {
        Some(end) if end <= len => Ok(end),
        _ => Err(StegoError::TruncatedImage {
            required: dix.saturating_add(size),
            available: len,
        }),
    }
}

/// 将 `value` 的低 `size` 位写入 `pix[dix..dix + size]` 的最低有效位。
///
/// 采样的其余 7 位保持不变。
///
/// # Errors
///
/// 区域越过缓冲区末尾时返回 [`StegoError::TruncatedImage`]，此时缓冲区未被修改。
pub fn modify(value: u64, pix: &mut [u8], dix: usize, size: usize) -> Result<()> {
    debug_assert!(size <= u64::BITS as usize);
    let end = region_end(pix.len(), dix, size)?;

    for (i, byte) in pix[dix..end].iter_mut().enumerate() {
        let bit = ((value >> (size - 1 - i)) as u8) & LSB_MASK;
        *byte = (*byte & !LSB_MASK) | bit;
    }

    Ok(())
}

/// 从 `pix[dix..dix + size]` 的最低有效位中按 MSB 优先重建一个整数。
///
/// # Errors
///
/// 区域越过缓冲区末尾时返回 [`StegoError::TruncatedImage`]。
pub fn recover(pix: &[u8], dix: usize, size: usize) -> Result<u64> {
    debug_assert!(size <= u64::BITS as usize);
    let end = region_end(pix.len(), dix, size)?;

    Ok(pix[dix..end]
        .iter()
        .fold(0u64, |acc, &byte| (acc << 1) | u64::from(byte & LSB_MASK)))
}

//! # 容量分析模块
//!
//! 计算一幅图像在 1 bit / 采样策略下能承载的载荷字节数，并将字节数格式化为易读形式。

use crate::constants::{LENGTH_HEADER_BYTES, SAMPLES_PER_BYTE};
use crate::pixels::PixelBuffer;

const UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// 返回图像可隐藏的最大载荷字节数。
///
/// 容量为 `floor(采样数 / 8) - 头部字节数`，小于头部开销的图像返回 0。
/// 长度头部是 32 位宽，因此结果不会超过 `u32::MAX`。
pub fn get_capacity(image: &PixelBuffer) -> usize {
    let capacity = (image.sample_count() / SAMPLES_PER_BYTE).saturating_sub(LENGTH_HEADER_BYTES);
    capacity.min(u32::MAX as usize)
}

/// 以二进制量级 (1024) 和一位小数格式化字节数，例如 `"1.2 MB"`。
pub fn format_capacity(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in &UNITS[..UNITS.len() - 1] {
        if value < 1024.0 {
            return format!("{value:.1} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.1} {}", UNITS[UNITS.len() - 1])
}

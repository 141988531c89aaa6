//! # 像素缓冲区模块
//!
//! [`PixelBuffer`] 是编解码器操作的图像表示：按 (行, 列, 通道) 索引的 `u8` 采样，
//! 以行优先、通道最内层的顺序连续存放。
//! 构造函数负责校验维度，非法的缓冲区无法被构造出来。

use crate::error::{Result, StegoError};
use image::{DynamicImage, RgbImage};

/// 已解码的图像采样缓冲区。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    rows: usize,
    cols: usize,
    channels: usize,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// 由维度和原始采样构造缓冲区。
    ///
    /// # Errors
    ///
    /// 任一维度为 0，或 `samples.len()` 不等于 `rows * cols * channels` 时，
    /// 返回 [`StegoError::InvalidImage`]。
    pub fn new(rows: usize, cols: usize, channels: usize, samples: Vec<u8>) -> Result<Self> {
        if rows == 0 || cols == 0 || channels == 0 {
            return Err(StegoError::InvalidImage {
                reason: format!("dimensions must be positive, got {rows}x{cols}x{channels}"),
            });
        }

        let expected = rows
            .checked_mul(cols)
            .and_then(|n| n.checked_mul(channels))
            .ok_or_else(|| StegoError::InvalidImage {
                reason: format!("dimensions {rows}x{cols}x{channels} overflow the address space"),
            })?;

        if samples.len() != expected {
            return Err(StegoError::InvalidImage {
                reason: format!(
                    "expected {expected} samples for {rows}x{cols}x{channels}, got {}",
                    samples.len()
                ),
            });
        }

        Ok(Self {
            rows,
            cols,
            channels,
            samples,
        })
    }

    /// 由 `image` 库的 RGB 图像构造三通道缓冲区。
    pub fn from_rgb_image(img: RgbImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        Self::new(height as usize, width as usize, 3, img.into_raw())
    }

    /// 将任意解码后的图像转换为三通道缓冲区，Alpha 通道会被丢弃。
    pub fn from_dynamic_image(img: DynamicImage) -> Result<Self> {
        Self::from_rgb_image(img.into_rgb8())
    }

    /// 转回 `image` 库的 RGB 图像，以便无损编码保存。
    ///
    /// # Errors
    ///
    /// 仅三通道缓冲区可以转换；其它通道数或超出 `u32` 的尺寸返回
    /// [`StegoError::InvalidImage`]。
    pub fn into_rgb_image(self) -> Result<RgbImage> {
        if self.channels != 3 {
            return Err(StegoError::InvalidImage {
                reason: format!("expected 3 channels for RGB output, got {}", self.channels),
            });
        }

        let too_large = || StegoError::InvalidImage {
            reason: format!("{}x{} exceeds the encodable image size", self.cols, self.rows),
        };
        let width = u32::try_from(self.cols).map_err(|_| too_large())?;
        let height = u32::try_from(self.rows).map_err(|_| too_large())?;

        RgbImage::from_raw(width, height, self.samples).ok_or_else(|| StegoError::InvalidImage {
            reason: "sample buffer does not match RGB layout".to_string(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// 采样总数，即 `rows * cols * channels`。
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// 读取 (行, 列, 通道) 处的采样，越界时返回 `None`。
    pub fn sample(&self, row: usize, col: usize, channel: usize) -> Option<u8> {
        if row >= self.rows || col >= self.cols || channel >= self.channels {
            return None;
        }
        self.samples
            .get((row * self.cols + col) * self.channels + channel)
            .copied()
    }

    /// 按行优先、通道最内层顺序排列的全部采样。
    pub fn as_samples(&self) -> &[u8] {
        &self.samples
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }
}

//! # lsb_vessel 库
//!
//! 本库包含 LSB 隐写编解码器的核心逻辑：容量分析 ([`get_capacity`], [`format_capacity`])
//! 以及载荷的隐藏与恢复 ([`insert`], [`extract`])。
//! 核心只处理内存中已解码的 [`PixelBuffer`]，文件读写由 [`handler`] 负责。

pub mod capacity;
pub mod cli;
pub mod codec;
pub mod constants;
pub mod error;
pub mod handler;
pub mod pixels;
pub mod steganography;

pub use capacity::{format_capacity, get_capacity};
pub use codec::{extract, insert};
pub use error::{Result, StegoError};
pub use pixels::PixelBuffer;

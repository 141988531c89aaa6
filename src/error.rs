//! # 错误类型模块
//!
//! 核心编解码器的全部失败模式都收敛到 [`StegoError`]，
//! 每个变体携带足够的上下文 (声明值与可用值) 供调用方生成诊断信息。

use thiserror::Error;

/// 核心隐写操作可能出现的错误。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// 图像缓冲区为空或维度与数据长度不一致。
    #[error("invalid image buffer: {reason}")]
    InvalidImage { reason: String },

    /// 载荷超出载体图像的容量。
    #[error("payload of {required} bytes exceeds image capacity of {available} bytes")]
    CapacityExceeded { required: usize, available: usize },

    /// 解出的长度头部大于图像可能承载的字节数。
    #[error(
        "length header declares {declared} bytes but the image can hold at most {available} bytes"
    )]
    CorruptHeader { declared: usize, available: usize },

    /// 图像剩余的采样不足以提供所需的数据位。
    #[error("image is truncated: {required} samples required, {available} available")]
    TruncatedImage { required: usize, available: usize },
}

/// 核心模块统一使用的 `Result` 别名。
pub type Result<T> = std::result::Result<T, StegoError>;

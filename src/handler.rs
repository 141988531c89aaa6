//! # 命令处理逻辑模块
//!
//! 包含处理 `capacity`、`insert` 和 `extract` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、图像的解码与无损编码、调用核心编解码器以及向用户报告结果。

use crate::capacity::{format_capacity, get_capacity};
use crate::cli::{CapacityArgs, ExtractArgs, InsertArgs};
use crate::codec;
use crate::error::StegoError;
use crate::pixels::PixelBuffer;
use anyhow::{Context, Result};
use colored::Colorize;
use image::ImageFormat;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// 在输入文件旁生成 `<prefix>_<文件名>.<extension>` 形式的默认输出路径。
fn default_output_path(input: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_else(|| "image".into());
    input.with_file_name(format!("{prefix}_{stem}.{extension}"))
}

/// 拒绝覆盖已存在的输出文件，除非指定了 `--force`。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 读取并解码图像文件，转换为三通道采样缓冲区。
fn load_image(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    PixelBuffer::from_dynamic_image(img).with_context(|| {
        format!(
            "Image file cannot be used as a carrier: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

fn file_size(path: &Path) -> String {
    fs::metadata(path)
        .map(|meta| format_capacity(meta.len()))
        .unwrap_or_else(|_| "unknown size".to_string())
}

/// 计算图像容量，按需格式化为易读字符串。
///
/// # Errors
///
/// 无法读取或解码图像时返回错误。
pub fn capacity_report(image: &Path, formatted: bool) -> Result<String> {
    let pixels = load_image(image)?;
    let capacity = get_capacity(&pixels);

    info!(
        "{}x{}x{} image can hold {} bytes",
        pixels.rows(),
        pixels.cols(),
        pixels.channels(),
        capacity
    );

    Ok(if formatted {
        format_capacity(capacity as u64)
    } else {
        capacity.to_string()
    })
}

/// 处理 'Capacity' 命令的执行逻辑。
pub fn handle_capacity(args: CapacityArgs) -> Result<()> {
    let report = capacity_report(&args.image, args.formatted)?;
    println!("{report}");
    Ok(())
}

/// 处理 'Insert' 命令的执行逻辑。
///
/// 负责读取载体图像和载荷文件、调用核心编解码器隐藏载荷，
/// 最后将结果以 PNG 格式写入目标路径。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径的 `InsertArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取或解码输入的图像，或无法读取载荷文件。
/// * 图像没有足够的空间来隐藏载荷。
/// * 无法写入目标图像文件。
pub fn handle_insert(args: InsertArgs) -> Result<()> {
    let dest = args
        .dest
        .unwrap_or_else(|| default_output_path(&args.image, "doctored", "png"));
    ensure_writable(&dest, args.force)?;

    if dest
        .extension()
        .is_none_or(|ext| !ext.eq_ignore_ascii_case("png"))
    {
        warn!(
            "Destination {} does not end in .png; the image is written as PNG regardless",
            dest.display()
        );
    }

    let carrier = load_image(&args.image)?;
    let payload = fs::read(&args.payload).with_context(|| {
        format!(
            "Unable to read payload file: {}",
            args.payload.to_string_lossy().red().bold()
        )
    })?;

    info!(
        "Calling LSB insert for {} image.",
        file_size(&args.image)
    );
    let started = Instant::now();

    let stego = codec::insert(&carrier, &payload).map_err(|err| {
        let message = match &err {
            StegoError::CapacityExceeded {
                required,
                available,
            } => format!(
                "Not enough space in the image to hide the payload. \nRequired: {}, Available: {}",
                required.to_string().red().bold(),
                available.to_string().green().bold()
            ),
            _ => "Failed to hide the payload in the image.".to_string(),
        };
        anyhow::Error::new(err).context(message)
    })?;

    info!(
        "LSB insert finished. Seconds elapsed: {:.3}",
        started.elapsed().as_secs_f64()
    );

    stego
        .into_rgb_image()?
        .save_with_format(&dest, ImageFormat::Png)
        .with_context(|| {
            format!(
                "Unable to write to target image file: {}",
                dest.to_string_lossy().red().bold()
            )
        })?;

    println!(
        "The payload has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Extract' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、调用核心编解码器恢复载荷，
/// 最后将恢复的字节写入目标文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取或解码输入的图像。
/// * 图像中没有有效的隐藏数据。
/// * 无法写入目标文件。
pub fn handle_extract(args: ExtractArgs) -> Result<()> {
    let output = args
        .output
        .unwrap_or_else(|| default_output_path(&args.image, "recovered", "bin"));
    ensure_writable(&output, args.force)?;

    let stego = load_image(&args.image)?;

    info!(
        "Calling LSB extract for {} image.",
        file_size(&args.image)
    );
    let started = Instant::now();

    let payload = codec::extract(&stego).with_context(|| {
        format!(
            "Failed to recover a payload from '{}'. \nThe image may not contain hidden data or has been modified.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    info!(
        "LSB extract finished. Seconds elapsed: {:.3}",
        started.elapsed().as_secs_f64()
    );

    fs::write(&output, &payload).with_context(|| {
        format!(
            "Unable to write to target file: {}",
            output.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "{} bytes have been successfully recovered and saved: {}",
        payload.len(),
        output.to_string_lossy().green().bold()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_sit_beside_input() {
        let input = Path::new("/tmp/photos/cat.jpeg");
        assert_eq!(
            default_output_path(input, "doctored", "png"),
            PathBuf::from("/tmp/photos/doctored_cat.png")
        );
        assert_eq!(
            default_output_path(input, "recovered", "bin"),
            PathBuf::from("/tmp/photos/recovered_cat.bin")
        );
    }
}

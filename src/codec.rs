//! # LSB 编解码模块
//!
//! 帧格式：32 位大端长度头部，紧随其后是载荷的每个字节 (MSB 优先)。
//! 所有位按行优先、通道最内层的顺序写入采样的最低有效位。
//! 编解码器无状态，任何符合该帧格式的图像都能被解码。

use crate::capacity::get_capacity;
use crate::constants::{LENGTH_HEADER_BITS, SAMPLES_PER_BYTE};
use crate::error::{Result, StegoError};
use crate::pixels::PixelBuffer;
use crate::steganography::{modify, recover};
use log::debug;

fn payload_offset(index: usize) -> usize {
    LENGTH_HEADER_BITS + SAMPLES_PER_BYTE * index
}

/// 将 `payload` 隐藏到载体图像中，返回新的隐写图像。
///
/// 载体与载荷都不会被修改；输出与载体仅在前 `32 + 8 * payload.len()` 个采样的
/// 最低有效位上可能不同。
///
/// # Errors
///
/// 载荷超过 [`get_capacity`] 时返回 [`StegoError::CapacityExceeded`]，
/// 检查发生在任何写入之前。
pub fn insert(carrier: &PixelBuffer, payload: &[u8]) -> Result<PixelBuffer> {
    let available = get_capacity(carrier);
    if payload.len() > available {
        return Err(StegoError::CapacityExceeded {
            required: payload.len(),
            available,
        });
    }

    let mut stego = carrier.clone();
    let pix = stego.samples_mut();

    modify(payload.len() as u64, pix, 0, LENGTH_HEADER_BITS)?;
    payload.iter().enumerate().try_for_each(|(i, &byte)| {
        modify(u64::from(byte), pix, payload_offset(i), SAMPLES_PER_BYTE)
    })?;

    debug!(
        "Embedded {} payload bytes into {} of {} samples",
        payload.len(),
        payload_offset(payload.len()),
        carrier.sample_count()
    );

    Ok(stego)
}

/// 从隐写图像中恢复载荷。
///
/// # Errors
///
/// * 图像不足 32 个采样、无法读取头部时返回 [`StegoError::TruncatedImage`]。
/// * 头部声明的长度超过图像容量时返回 [`StegoError::CorruptHeader`]，
///   这通常意味着图像从未经过 [`insert`]。
pub fn extract(stego: &PixelBuffer) -> Result<Vec<u8>> {
    let pix = stego.as_samples();

    let declared = recover(pix, 0, LENGTH_HEADER_BITS)? as usize;
    let available = get_capacity(stego);
    if declared > available {
        return Err(StegoError::CorruptHeader {
            declared,
            available,
        });
    }

    debug!("Length header declares {declared} payload bytes (capacity {available})");

    (0..declared)
        .map(|i| recover(pix, payload_offset(i), SAMPLES_PER_BYTE).map(|value| value as u8))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    fn random_image(rows: usize, cols: usize, channels: usize) -> PixelBuffer {
        let mut samples = vec![0u8; rows * cols * channels];
        rand::rng().fill_bytes(&mut samples);
        PixelBuffer::new(rows, cols, channels, samples).unwrap()
    }

    fn random_payload(len: usize) -> Vec<u8> {
        let mut payload = vec![0u8; len];
        rand::rng().fill_bytes(&mut payload);
        payload
    }

    #[test]
    fn round_trip_various_shapes() {
        for (rows, cols, channels, len) in [
            (100, 100, 3, 10),
            (7, 13, 1, 7),
            (31, 17, 4, 0),
            (64, 48, 3, 500),
        ] {
            let carrier = random_image(rows, cols, channels);
            let payload = random_payload(len);
            let stego = insert(&carrier, &payload).unwrap();
            assert_eq!(extract(&stego).unwrap(), payload);
        }
    }

    #[test]
    fn only_frame_samples_change() {
        let carrier = random_image(100, 100, 3);
        let payload = b"0123456789".to_vec();
        let stego = insert(&carrier, &payload).unwrap();

        let frame_samples = 32 + 8 * payload.len();
        assert_eq!(frame_samples, 112);

        let before = carrier.as_samples();
        let after = stego.as_samples();
        assert_eq!(&before[frame_samples..], &after[frame_samples..]);
        for (a, b) in before[..frame_samples].iter().zip(&after[..frame_samples]) {
            assert_eq!(a & 0xFE, b & 0xFE);
        }
        assert_eq!(extract(&stego).unwrap(), payload);
    }

    #[test]
    fn header_is_big_endian_length() {
        let carrier = PixelBuffer::new(10, 10, 3, vec![0; 300]).unwrap();
        let stego = insert(&carrier, &[0xA5; 3]).unwrap();
        let pix = stego.as_samples();

        assert!(pix[..30].iter().all(|&b| b == 0));
        assert_eq!(&pix[30..32], &[1, 1]);
        assert_eq!(&pix[32..40], &[1, 0, 1, 0, 0, 1, 0, 1]);
    }

    #[test]
    fn inputs_are_not_mutated() {
        let carrier = random_image(20, 20, 3);
        let payload = random_payload(40);
        let carrier_snapshot = carrier.clone();
        let payload_snapshot = payload.clone();

        let stego = insert(&carrier, &payload).unwrap();
        let stego_snapshot = stego.clone();
        extract(&stego).unwrap();

        assert_eq!(carrier, carrier_snapshot);
        assert_eq!(payload, payload_snapshot);
        assert_eq!(stego, stego_snapshot);
    }

    #[test]
    fn capacity_boundary() {
        let carrier = random_image(16, 16, 3);
        let capacity = get_capacity(&carrier);

        let exact = random_payload(capacity);
        let stego = insert(&carrier, &exact).unwrap();
        assert_eq!(extract(&stego).unwrap(), exact);

        let err = insert(&carrier, &random_payload(capacity + 1)).unwrap_err();
        assert_eq!(
            err,
            StegoError::CapacityExceeded {
                required: capacity + 1,
                available: capacity
            }
        );
    }

    #[test]
    fn insert_is_deterministic() {
        let carrier = random_image(30, 30, 3);
        let payload = random_payload(64);
        assert_eq!(
            insert(&carrier, &payload).unwrap(),
            insert(&carrier, &payload).unwrap()
        );
    }

    #[test]
    fn implausible_header_is_corrupt() {
        let untouched = PixelBuffer::new(100, 100, 3, vec![0xFF; 30000]).unwrap();
        assert_eq!(
            extract(&untouched).unwrap_err(),
            StegoError::CorruptHeader {
                declared: u32::MAX as usize,
                available: 3746
            }
        );
    }

    #[test]
    fn header_just_over_capacity_is_corrupt() {
        let mut pix = vec![0u8; 300];
        modify(34, &mut pix, 0, LENGTH_HEADER_BITS).unwrap();
        let image = PixelBuffer::new(10, 10, 3, pix).unwrap();
        assert_eq!(get_capacity(&image), 33);
        assert!(matches!(
            extract(&image),
            Err(StegoError::CorruptHeader {
                declared: 34,
                available: 33
            })
        ));
    }

    #[test]
    fn too_few_samples_for_header() {
        let tiny = PixelBuffer::new(3, 3, 3, vec![0; 27]).unwrap();
        assert_eq!(
            extract(&tiny).unwrap_err(),
            StegoError::TruncatedImage {
                required: 32,
                available: 27
            }
        );
        assert!(insert(&tiny, &[]).is_err());
    }
}

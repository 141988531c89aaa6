/// 长度头部占用的位数。
/// 载荷长度以 32 位无符号大端整数写入，每个采样字节只承载 1 bit，
/// 因此头部固定占用前 32 个采样。
pub const LENGTH_HEADER_BITS: usize = 32;

/// 长度头部折算成的字节数，容量计算时需要扣除。
pub const LENGTH_HEADER_BYTES: usize = LENGTH_HEADER_BITS / 8;

/// 隐写载荷中单个字节所需的采样数。
/// 每个字节 8 bits，每个采样 1 bit，所以需要 8 个采样。
pub const SAMPLES_PER_BYTE: usize = 8;

/// 采样字节中用于承载数据的位。
pub const LSB_MASK: u8 = 0x1;

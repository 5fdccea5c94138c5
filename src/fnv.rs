//! FNV-1a digests of configurable width.
//!
//! The accumulator is a `u128`, so any width from 1 to 16 bytes can be
//! computed with the same loop. The standard 32, 64 and 128-bit parameter
//! sets are provided as [`FnvParams`] constants; concept identifiers depend
//! on [`FNV_1A_64`] bit-for-bit.

use crate::error::HashError;

/// Result type for hash operations.
pub type HashResult<T> = std::result::Result<T, HashError>;

/// Largest supported digest width in bytes.
pub const MAX_WIDTH: usize = 16;

/// Parameters for one FNV-1a instantiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FnvParams {
    pub prime: u128,
    pub offset_basis: u128,
    /// Digest width in bytes.
    pub width: usize,
}

pub const FNV_1A_32: FnvParams = FnvParams {
    prime: 0x0100_0193,
    offset_basis: 0x811c_9dc5,
    width: 4,
};

pub const FNV_1A_64: FnvParams = FnvParams {
    prime: 0x0000_0100_0000_01B3,
    offset_basis: 0xcbf2_9ce4_8422_2325,
    width: 8,
};

pub const FNV_1A_128: FnvParams = FnvParams {
    prime: 0x0000_0000_0100_0000_0000_0000_0000_013B,
    offset_basis: 0x6c62_272e_07bb_0142_62b8_2175_6295_c58d,
    width: 16,
};

impl FnvParams {
    /// Hash `data` with these parameters.
    pub fn hash(&self, data: &[u8]) -> HashResult<Vec<u8>> {
        fnv_1a(data, self.prime, self.offset_basis, self.width)
    }
}

/// Compute the FNV-1a digest of `data`, serialized big-endian in `width` bytes.
///
/// Multiplication wraps; bits above `width * 8` are discarded after every
/// byte.
pub fn fnv_1a(data: &[u8], prime: u128, offset_basis: u128, width: usize) -> HashResult<Vec<u8>> {
    if width == 0 || width > MAX_WIDTH {
        return Err(HashError::UnsupportedWidth { width });
    }
    let mask = if width == MAX_WIDTH {
        u128::MAX
    } else {
        (1u128 << (width * 8)) - 1
    };

    let mut hash = offset_basis & mask;
    for &byte in data {
        hash ^= u128::from(byte);
        hash = hash.wrapping_mul(prime) & mask;
    }
    Ok(hash.to_be_bytes()[MAX_WIDTH - width..].to_vec())
}

/// 32-bit FNV-1a.
pub fn fnv_1a_32(data: &[u8]) -> [u8; 4] {
    let mut hash = FNV_1A_32.offset_basis as u32;
    for &byte in data {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(FNV_1A_32.prime as u32);
    }
    hash.to_be_bytes()
}

/// 64-bit FNV-1a. This is the digest behind concept identifiers.
pub fn fnv_1a_64(data: &[u8]) -> [u8; 8] {
    let mut hash = FNV_1A_64.offset_basis as u64;
    for &byte in data {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_1A_64.prime as u64);
    }
    hash.to_be_bytes()
}

/// 128-bit FNV-1a.
pub fn fnv_1a_128(data: &[u8]) -> [u8; 16] {
    let mut hash = FNV_1A_128.offset_basis;
    for &byte in data {
        hash ^= u128::from(byte);
        hash = hash.wrapping_mul(FNV_1A_128.prime);
    }
    hash.to_be_bytes()
}

/// Lowercase hex rendering of a digest.
pub fn to_hex(digest: &[u8]) -> String {
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

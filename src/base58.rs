//! Base-58 text encoding with the Bitcoin alphabet.
//!
//! The alphabet leaves out `0`, `O`, `I` and `l`, so encoded identifiers
//! survive being read aloud or copied by hand, and never contain tabs or
//! URL-reserved characters.

use crate::error::Base58Error;

/// Bitcoin base-58 alphabet.
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

const INVALID: u8 = 0xff;

/// Reverse lookup table: ASCII byte -> digit value, or `INVALID`.
const DIGITS: [u8; 128] = {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Encode bytes as base-58.
///
/// Each leading zero byte becomes a leading `1`; the rest of the input is
/// treated as one big-endian number.
pub fn encode(input: &[u8]) -> String {
    let zeros = input.iter().take_while(|&&b| b == 0).count();

    // Little-endian base-58 digits of the non-zero tail.
    let mut digits: Vec<u8> = Vec::with_capacity(input.len() * 138 / 100 + 1);
    for &byte in &input[zeros..] {
        let mut carry = u32::from(byte);
        for digit in digits.iter_mut() {
            carry += u32::from(*digit) << 8;
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut out = String::with_capacity(zeros + digits.len());
    out.extend(std::iter::repeat_n('1', zeros));
    out.extend(digits.iter().rev().map(|&d| ALPHABET[d as usize] as char));
    out
}

/// Decode a base-58 string back into bytes.
pub fn decode(input: &str) -> Result<Vec<u8>, Base58Error> {
    let ones = input.bytes().take_while(|&b| b == b'1').count();

    // Little-endian base-256 bytes of the value after the leading ones.
    let mut bytes: Vec<u8> = Vec::with_capacity(input.len());
    for (position, character) in input.chars().enumerate().skip(ones) {
        let value = u32::from(character)
            .try_into()
            .ok()
            .and_then(|ascii: u8| DIGITS.get(ascii as usize).copied())
            .filter(|&v| v != INVALID)
            .ok_or(Base58Error::InvalidCharacter {
                character,
                position,
            })?;

        let mut carry = u32::from(value);
        for byte in bytes.iter_mut() {
            carry += u32::from(*byte) * 58;
            *byte = (carry & 0xff) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push((carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    let mut out = vec![0u8; ones];
    out.extend(bytes.iter().rev());
    Ok(out)
}

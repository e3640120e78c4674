//! Test-data generation.
//!
//! `generate_letters` produces the classic benchmark input: 10^magnitude
//! random ASCII letters. `generate_mixed_text` produces text whose sections
//! compress very differently, including multi-byte code points, so the
//! stats printed after encoding have something to show.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Largest accepted magnitude (10^9 letters).
pub const MAX_MAGNITUDE: u32 = 9;

const ASCII_LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate `10^magnitude` random ASCII letters.
///
/// Returns `None` if `magnitude` exceeds [`MAX_MAGNITUDE`].
pub fn generate_letters(seed: u64, magnitude: u32) -> Option<String> {
    if magnitude > MAX_MAGNITUDE {
        return None;
    }
    let len = 10usize.pow(magnitude);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Some(
        (0..len)
            .map(|_| ASCII_LETTERS[rng.gen_range(0..ASCII_LETTERS.len())] as char)
            .collect(),
    )
}

/// Generate `len` symbols of text with mixed compressibility.
pub fn generate_mixed_text(seed: u64, len: usize) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut text = String::with_capacity(len);
    let mut remaining = len;

    while remaining > 0 {
        let section = remaining.min(512);

        match rng.gen_range(0..10u8) {
            // 30% runs of one symbol
            0..=2 => {
                let symbol = pick(&mut rng, "abcxyz€ü");
                text.extend(std::iter::repeat(symbol).take(section));
            }

            // 40% small text-like alphabet
            3..=6 => {
                for _ in 0..section {
                    text.push(pick(&mut rng, "etaoin shrdlu.,\n"));
                }
            }

            // 30% wide alphabet of one- and two-byte code points
            _ => {
                for _ in 0..section {
                    let symbol = char::from_u32(rng.gen_range(0x20..0x800)).unwrap_or('?');
                    text.push(symbol);
                }
            }
        }

        remaining -= section;
    }

    text
}

fn pick(rng: &mut ChaCha8Rng, alphabet: &str) -> char {
    let count = alphabet.chars().count();
    alphabet.chars().nth(rng.gen_range(0..count)).unwrap_or(' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_length() {
        for magnitude in 0..4 {
            let text = generate_letters(7, magnitude).unwrap();
            assert_eq!(text.len(), 10usize.pow(magnitude));
            assert!(text.bytes().all(|b| b.is_ascii_alphabetic()));
        }
    }

    #[test]
    fn test_letters_magnitude_cap() {
        assert!(generate_letters(0, MAX_MAGNITUDE + 1).is_none());
    }

    #[test]
    fn test_determinism() {
        assert_eq!(generate_letters(12345, 3), generate_letters(12345, 3));
        assert_eq!(generate_mixed_text(12345, 5000), generate_mixed_text(12345, 5000));
    }

    #[test]
    fn test_different_seeds() {
        assert_ne!(generate_letters(1, 3), generate_letters(2, 3));
    }

    #[test]
    fn test_mixed_text_symbol_count() {
        for len in [0, 1, 100, 1000, 10000] {
            assert_eq!(generate_mixed_text(999, len).chars().count(), len);
        }
    }

    #[test]
    fn test_mixed_text_fits_one_container() {
        let codec = symhuff_core::HuffmanCodec::new();
        let text = generate_mixed_text(5, 20_000);
        let container = codec.encode(&text).unwrap();
        assert_eq!(codec.decode(&container).unwrap(), text);
    }
}

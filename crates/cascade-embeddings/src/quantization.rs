//! Binary sketches: per-dimension thresholding into packed integers and
//! Hamming distance between them.

/// A fixed-width packed bit vector.
pub trait BitSketch: Copy {
    /// Number of bits the container holds.
    const CAPACITY: usize;

    /// Population count of `self XOR other`.
    fn hamming(self, other: Self) -> u32;
}

impl BitSketch for u32 {
    const CAPACITY: usize = 32;

    #[inline]
    fn hamming(self, other: Self) -> u32 {
        (self ^ other).count_ones()
    }
}

impl BitSketch for u64 {
    const CAPACITY: usize = 64;

    #[inline]
    fn hamming(self, other: Self) -> u32 {
        (self ^ other).count_ones()
    }
}

/// Hamming distance between two sketches of the same width.
#[inline]
pub fn hamming_distance<T: BitSketch>(a: T, b: T) -> u32 {
    a.hamming(b)
}

/// Pack the first `bits` values into a `u64`: bit `i` is set iff
/// `values[i] > threshold`. Values past the end of the slice or past 64 bits
/// are ignored.
pub fn threshold_bits(values: &[f32], bits: usize, threshold: f32) -> u64 {
    values
        .iter()
        .take(bits.min(u64::CAPACITY))
        .enumerate()
        .filter(|(_, v)| **v > threshold)
        .fold(0u64, |acc, (i, _)| acc | (1u64 << i))
}

/// Pack the first `bits` values (at most 32) into the nano sketch.
pub fn threshold_nano(values: &[f32], bits: usize, threshold: f32) -> u32 {
    // Only the low 32 bits can be set.
    threshold_bits(values, bits.min(u32::CAPACITY), threshold) as u32
}

use super::DIVISOR;

/// Checksum of `A ++ B` given `adler32(A)`, `adler32(B)` and `len(B)`.
///
/// Both checksums must have been computed from the initial state. Words at
/// or above [`DIVISOR`] are not accepted by the arithmetic below and give
/// an unspecified (but non-panicking) result.
pub fn combine(adler1: u32, adler2: u32, len2: u64) -> u32 {
    let rem = (len2 % DIVISOR as u64) as u32;

    let mut sum1 = adler1 & 0xFFFF;
    let mut sum2 = (rem * sum1) % DIVISOR;
    sum1 += (adler2 & 0xFFFF) + DIVISOR - 1;
    sum2 += (adler1 >> 16) + (adler2 >> 16) + DIVISOR - rem;

    if sum1 >= DIVISOR {
        sum1 -= DIVISOR;
    }
    if sum1 >= DIVISOR {
        sum1 -= DIVISOR;
    }
    if sum2 >= DIVISOR << 1 {
        sum2 -= DIVISOR << 1;
    }
    if sum2 >= DIVISOR {
        sum2 -= DIVISOR;
    }

    (sum2 << 16) | sum1
}

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use super::{DIVISOR, NMAX, accumulate};

// Column sums are 16-bit and go through `_mm_madd_epi16`, which reads them as
// signed: 4096 / 32 * 255 = 32640 keeps every column below i16::MAX.
const SSE2_BLOCK: usize = 4096;

// No narrow column sums here, so the block only has to respect NMAX.
const AVX2_BLOCK: usize = NMAX & !31;

// Per 32-byte step:
//   s2 += 32 * s1_at_step_start + sum((32 - i) * b[i])
//   s1 += sum(b[i])
// s1_at_step_start is split into the block's starting s1 (added once as
// s1 * n) and the running in-block sum kept in `v_s1_sums`.

#[target_feature(enable = "sse2")]
pub unsafe fn adler32_x86_sse2(adler: u32, p: &[u8]) -> u32 {
    let mut s1 = adler & 0xFFFF;
    let mut s2 = adler >> 16;
    let mut data = p;

    let mults_a = _mm_set_epi16(25, 26, 27, 28, 29, 30, 31, 32);
    let mults_b = _mm_set_epi16(17, 18, 19, 20, 21, 22, 23, 24);
    let mults_c = _mm_set_epi16(9, 10, 11, 12, 13, 14, 15, 16);
    let mults_d = _mm_set_epi16(1, 2, 3, 4, 5, 6, 7, 8);
    let v_zero = _mm_setzero_si128();

    while data.len() >= 32 {
        let n = data.len().min(SSE2_BLOCK) & !31;
        let (block, rest) = data.split_at(n);
        data = rest;

        s2 += s1 * (n as u32);

        let mut v_s1 = _mm_setzero_si128();
        let mut v_s1_sums = _mm_setzero_si128();
        let mut v_byte_sums_a = _mm_setzero_si128();
        let mut v_byte_sums_b = _mm_setzero_si128();
        let mut v_byte_sums_c = _mm_setzero_si128();
        let mut v_byte_sums_d = _mm_setzero_si128();

        for step in block.chunks_exact(32) {
            let data_a = _mm_loadu_si128(step.as_ptr() as *const __m128i);
            let data_b = _mm_loadu_si128(step.as_ptr().add(16) as *const __m128i);

            v_s1_sums = _mm_add_epi32(v_s1_sums, v_s1);
            v_s1 = _mm_add_epi32(
                v_s1,
                _mm_add_epi32(_mm_sad_epu8(data_a, v_zero), _mm_sad_epu8(data_b, v_zero)),
            );

            v_byte_sums_a = _mm_add_epi16(v_byte_sums_a, _mm_unpacklo_epi8(data_a, v_zero));
            v_byte_sums_b = _mm_add_epi16(v_byte_sums_b, _mm_unpackhi_epi8(data_a, v_zero));
            v_byte_sums_c = _mm_add_epi16(v_byte_sums_c, _mm_unpacklo_epi8(data_b, v_zero));
            v_byte_sums_d = _mm_add_epi16(v_byte_sums_d, _mm_unpackhi_epi8(data_b, v_zero));
        }

        let mut v_s2 = _mm_add_epi32(
            _mm_madd_epi16(v_byte_sums_a, mults_a),
            _mm_madd_epi16(v_byte_sums_b, mults_b),
        );
        v_s2 = _mm_add_epi32(
            v_s2,
            _mm_add_epi32(
                _mm_madd_epi16(v_byte_sums_c, mults_c),
                _mm_madd_epi16(v_byte_sums_d, mults_d),
            ),
        );
        v_s2 = _mm_add_epi32(v_s2, _mm_slli_epi32(v_s1_sums, 5));

        s1 += hsum_epi32(v_s1);
        s2 += hsum_epi32(v_s2);

        s1 %= DIVISOR;
        s2 %= DIVISOR;
    }

    accumulate(&mut s1, &mut s2, data);

    (s2 % DIVISOR) << 16 | (s1 % DIVISOR)
}

#[target_feature(enable = "avx2")]
pub unsafe fn adler32_x86_avx2(adler: u32, p: &[u8]) -> u32 {
    let mut s1 = adler & 0xFFFF;
    let mut s2 = adler >> 16;
    let mut data = p;

    let weights = _mm256_set_epi8(
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25,
        26, 27, 28, 29, 30, 31, 32,
    );
    let ones_i16 = _mm256_set1_epi16(1);
    let v_zero = _mm256_setzero_si256();

    while data.len() >= 32 {
        let n = data.len().min(AVX2_BLOCK) & !31;
        let (block, rest) = data.split_at(n);
        data = rest;

        s2 += s1 * (n as u32);

        let mut v_s1 = _mm256_setzero_si256();
        let mut v_s1_sums = _mm256_setzero_si256();
        let mut v_s2 = _mm256_setzero_si256();

        for step in block.chunks_exact(32) {
            let d = _mm256_loadu_si256(step.as_ptr() as *const __m256i);

            v_s1_sums = _mm256_add_epi32(v_s1_sums, v_s1);
            v_s1 = _mm256_add_epi32(v_s1, _mm256_sad_epu8(d, v_zero));

            // maddubs pairs stay below 255 * (32 + 31), inside i16.
            let weighted = _mm256_madd_epi16(_mm256_maddubs_epi16(d, weights), ones_i16);
            v_s2 = _mm256_add_epi32(v_s2, weighted);
        }

        v_s2 = _mm256_add_epi32(v_s2, _mm256_slli_epi32(v_s1_sums, 5));

        s1 += hsum_epi32_256(v_s1);
        s2 += hsum_epi32_256(v_s2);

        s1 %= DIVISOR;
        s2 %= DIVISOR;
    }

    accumulate(&mut s1, &mut s2, data);

    (s2 % DIVISOR) << 16 | (s1 % DIVISOR)
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn hsum_epi32(v: __m128i) -> u32 {
    let mut buf = [0u32; 4];
    _mm_storeu_si128(buf.as_mut_ptr() as *mut __m128i, v);
    buf.iter().sum()
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn hsum_epi32_256(v: __m256i) -> u32 {
    let mut buf = [0u32; 8];
    _mm256_storeu_si256(buf.as_mut_ptr() as *mut __m256i, v);
    buf.iter().sum()
}

use core::arch::aarch64::*;

use super::{DIVISOR, NMAX, accumulate};

// 64 bytes per step; column sums reach at most 5504 / 64 * 255 = 21930,
// well inside u16.
const NEON_BLOCK: usize = NMAX & !63;

static WEIGHTS: [u16; 64] = {
    let mut w = [0u16; 64];
    let mut i = 0;
    while i < 64 {
        w[i] = (64 - i) as u16;
        i += 1;
    }
    w
};

#[target_feature(enable = "neon")]
pub unsafe fn adler32_arm_neon(adler: u32, p: &[u8]) -> u32 {
    let mut s1 = adler & 0xFFFF;
    let mut s2 = adler >> 16;
    let mut data = p;

    let mut mults_v = [vdupq_n_u16(0); 8];
    for (i, m) in mults_v.iter_mut().enumerate() {
        *m = vld1q_u16(WEIGHTS.as_ptr().add(i * 8));
    }

    while data.len() >= 64 {
        let n = data.len().min(NEON_BLOCK) & !63;
        let (block, rest) = data.split_at(n);
        data = rest;

        s2 += s1 * (n as u32);

        let mut v_s1 = vdupq_n_u32(0);
        let mut v_s1_sums = vdupq_n_u32(0);
        let mut v_byte_sums = [vdupq_n_u16(0); 8];

        for step in block.chunks_exact(64) {
            let ptr = step.as_ptr();
            let data_a = vld1q_u8(ptr);
            let data_b = vld1q_u8(ptr.add(16));
            let data_c = vld1q_u8(ptr.add(32));
            let data_d = vld1q_u8(ptr.add(48));

            v_s1_sums = vaddq_u32(v_s1_sums, v_s1);

            // Two independent pairwise chains, joined before widening into v_s1.
            let tmp_ab = vpadalq_u8(vpaddlq_u8(data_a), data_b);
            let tmp_cd = vpadalq_u8(vpaddlq_u8(data_c), data_d);
            v_s1 = vpadalq_u16(v_s1, vaddq_u16(tmp_ab, tmp_cd));

            v_byte_sums[0] = vaddw_u8(v_byte_sums[0], vget_low_u8(data_a));
            v_byte_sums[1] = vaddw_u8(v_byte_sums[1], vget_high_u8(data_a));
            v_byte_sums[2] = vaddw_u8(v_byte_sums[2], vget_low_u8(data_b));
            v_byte_sums[3] = vaddw_u8(v_byte_sums[3], vget_high_u8(data_b));
            v_byte_sums[4] = vaddw_u8(v_byte_sums[4], vget_low_u8(data_c));
            v_byte_sums[5] = vaddw_u8(v_byte_sums[5], vget_high_u8(data_c));
            v_byte_sums[6] = vaddw_u8(v_byte_sums[6], vget_low_u8(data_d));
            v_byte_sums[7] = vaddw_u8(v_byte_sums[7], vget_high_u8(data_d));
        }

        let mut v_s2 = vshlq_n_u32::<6>(v_s1_sums);
        for (sums, mults) in v_byte_sums.iter().zip(mults_v.iter()) {
            v_s2 = vmlal_u16(v_s2, vget_low_u16(*sums), vget_low_u16(*mults));
            v_s2 = vmlal_high_u16(v_s2, *sums, *mults);
        }

        s1 += vaddvq_u32(v_s1);
        s2 += vaddvq_u32(v_s2);

        s1 %= DIVISOR;
        s2 %= DIVISOR;
    }

    accumulate(&mut s1, &mut s2, data);

    (s2 % DIVISOR) << 16 | (s1 % DIVISOR)
}

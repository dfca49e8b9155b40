//! Adler-32 checksum engine.
//!
//! Input is routed by size: empty input leaves the state untouched, input
//! shorter than one lane group takes the scalar path with a reduction per
//! byte, and everything else goes to the bulk kernel chosen by
//! [`crate::config`].

use std::sync::OnceLock;

use crate::config::{self, Kernel};
use crate::error::Adler32Error;

mod combine;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86;

#[cfg(target_arch = "aarch64")]
mod arm;

pub use combine::combine;

/// Largest prime below 2^16.
pub const DIVISOR: u32 = 65521;

/// Width of one lane group in the portable kernel.
pub const LANES: usize = 16;

/// Largest number of bytes that can be summed into `u32` accumulators
/// starting below [`DIVISOR`] before a reduction is required.
pub const NMAX: usize = max_block_len(DIVISOR, u32::MAX as u64);

/// Finds the largest `n` with `255 * n * (n + 1) / 2 + (n + 1) * (modulus - 1) <= limit`.
///
/// The left side is the worst case for `s2` after `n` bytes of `0xFF` fed
/// into accumulators that both start at `modulus - 1`.
pub const fn max_block_len(modulus: u32, limit: u64) -> usize {
    let m = modulus as u64 - 1;
    let mut n: u64 = 0;
    while 255 * (n + 1) * (n + 2) / 2 + (n + 2) * m <= limit {
        n += 1;
    }
    n as usize
}

const _: () = assert!(NMAX >= LANES && NMAX % LANES == 0);

/// Running Adler-32 state.
///
/// Both accumulators are always below [`DIVISOR`]. Values are only built by
/// [`Adler32::new`], [`Default`], or the validated importers, so there is no
/// uninitialized state to special-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Adler32 {
    s1: u32,
    s2: u32,
}

impl Default for Adler32 {
    fn default() -> Self {
        Self::new()
    }
}

impl Adler32 {
    /// The checksum state of the empty sequence.
    pub const fn new() -> Self {
        Self { s1: 1, s2: 0 }
    }

    /// Rebuilds a state from its two accumulators.
    ///
    /// Fails with [`Adler32Error::InvalidState`] if either word is not below
    /// [`DIVISOR`].
    pub fn from_parts(s1: u32, s2: u32) -> Result<Self, Adler32Error> {
        if s1 >= DIVISOR || s2 >= DIVISOR {
            return Err(Adler32Error::InvalidState { s1, s2 });
        }
        Ok(Self { s1, s2 })
    }

    /// Rebuilds a state from a finished checksum, e.g. one stored after the
    /// first part of a stream.
    pub fn from_checksum(adler: u32) -> Result<Self, Adler32Error> {
        Self::from_parts(adler & 0xFFFF, adler >> 16)
    }

    pub const fn s1(&self) -> u32 {
        self.s1
    }

    pub const fn s2(&self) -> u32 {
        self.s2
    }

    /// Exports `(s1, s2)` so the computation can resume elsewhere.
    pub const fn into_parts(self) -> (u32, u32) {
        (self.s1, self.s2)
    }

    /// Returns the state after feeding `data`.
    #[must_use]
    pub fn update(self, data: &[u8]) -> Self {
        let adler = adler32(self.finish(), data);
        Self {
            s1: adler & 0xFFFF,
            s2: adler >> 16,
        }
    }

    /// In-place form of [`Adler32::update`].
    pub fn write(&mut self, data: &[u8]) {
        *self = self.update(data);
    }

    /// Appends the state of a following sequence of `other_len` bytes.
    #[must_use]
    pub fn combine(self, other: Adler32, other_len: u64) -> Self {
        let adler = combine(self.finish(), other.finish(), other_len);
        Self {
            s1: adler & 0xFFFF,
            s2: adler >> 16,
        }
    }

    /// `(s2 << 16) | s1`.
    pub const fn finish(self) -> u32 {
        (self.s2 << 16) | self.s1
    }
}

/// Checksum of `data` from the initial state.
pub fn checksum(data: &[u8]) -> u32 {
    Adler32::new().update(data).finish()
}

type Adler32Fn = unsafe fn(u32, &[u8]) -> u32;

/// Updates a packed checksum (`s2` in the high half, `s1` in the low half)
/// with `data`. Words at or above [`DIVISOR`] are reduced first; empty input
/// returns `adler` as given.
pub fn adler32(adler: u32, data: &[u8]) -> u32 {
    if data.is_empty() {
        return adler;
    }
    let adler = reduce(adler);
    if data.len() < LANES {
        return adler32_scalar(adler, data);
    }

    static IMPL: OnceLock<Adler32Fn> = OnceLock::new();
    let func = IMPL.get_or_init(|| kernel_fn(config::get().effective));

    // The effective kernel is clamped to what the CPU reports.
    unsafe { func(adler, data) }
}

/// Runs `data` through one specific bulk kernel, skipping the short-input
/// path.
pub fn adler32_with(kernel: Kernel, adler: u32, data: &[u8]) -> Result<u32, Adler32Error> {
    if !kernel.is_available() {
        return Err(Adler32Error::UnsupportedKernel {
            kernel: kernel.name(),
        });
    }
    if data.is_empty() {
        return Ok(adler);
    }
    let func = kernel_fn(kernel);
    Ok(unsafe { func(reduce(adler), data) })
}

fn kernel_fn(kernel: Kernel) -> Adler32Fn {
    match kernel {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        Kernel::Sse2 => x86::adler32_x86_sse2,
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        Kernel::Avx2 => x86::adler32_x86_avx2,
        #[cfg(target_arch = "aarch64")]
        Kernel::Neon => arm::adler32_arm_neon,
        _ => adler32_generic,
    }
}

#[inline]
fn reduce(adler: u32) -> u32 {
    ((adler >> 16) % DIVISOR) << 16 | ((adler & 0xFFFF) % DIVISOR)
}

/// One reduction per byte. Used below one lane group.
pub fn adler32_scalar(adler: u32, data: &[u8]) -> u32 {
    let mut s1 = adler & 0xFFFF;
    let mut s2 = adler >> 16;
    for &b in data {
        s1 = (s1 + b as u32) % DIVISOR;
        s2 = (s2 + s1) % DIVISOR;
    }
    (s2 << 16) | s1
}

macro_rules! lane_steps {
    ($s1:ident, $s2:ident, $group:ident, $($i:literal)+) => {
        $(
            $s1 += $group[$i] as u32;
            $s2 += $s1;
        )+
    };
}

/// Adds `block` into unreduced accumulators, one 16-lane group at a time
/// and then byte by byte.
///
/// `block.len()` must not exceed [`NMAX`] and both accumulators must enter
/// below [`DIVISOR`].
#[inline]
pub(crate) fn accumulate(s1: &mut u32, s2: &mut u32, block: &[u8]) {
    debug_assert!(block.len() <= NMAX);
    let mut a = *s1;
    let mut b = *s2;

    let mut groups = block.chunks_exact(LANES);
    for group in groups.by_ref() {
        lane_steps!(a, b, group, 0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15);
    }
    for &byte in groups.remainder() {
        a += byte as u32;
        b += a;
    }

    *s1 = a;
    *s2 = b;
}

/// Portable bulk kernel: [`NMAX`]-sized blocks with one reduction each.
pub fn adler32_generic(adler: u32, data: &[u8]) -> u32 {
    let mut s1 = adler & 0xFFFF;
    let mut s2 = adler >> 16;

    for block in data.chunks(NMAX) {
        accumulate(&mut s1, &mut s2, block);
        s1 %= DIVISOR;
        s2 %= DIVISOR;
    }

    (s2 << 16) | s1
}

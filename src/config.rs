//! Bulk kernel selection.
//!
//! The kernel is picked once per process from the detected CPU features. It
//! can be pinned with `LANE_ADLER_KERNEL=auto|portable|sse2|avx2|neon`; a
//! request the CPU cannot run falls back to auto-detection.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::error::Adler32Error;

pub const KERNEL_ENV: &str = "LANE_ADLER_KERNEL";

/// Bulk checksum kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kernel {
    /// 16-lane unrolled scalar loop, available everywhere.
    Portable,
    /// x86 SSE2, 32 bytes per step.
    Sse2,
    /// x86 AVX2, 32 bytes per step with a longer block between reductions.
    Avx2,
    /// aarch64 NEON, 64 bytes per step.
    Neon,
}

impl Kernel {
    pub const ALL: [Kernel; 4] = [Kernel::Portable, Kernel::Sse2, Kernel::Avx2, Kernel::Neon];

    pub const fn name(self) -> &'static str {
        match self {
            Kernel::Portable => "portable",
            Kernel::Sse2 => "sse2",
            Kernel::Avx2 => "avx2",
            Kernel::Neon => "neon",
        }
    }

    /// Whether this kernel can run on the current CPU.
    pub fn is_available(self) -> bool {
        match self {
            Kernel::Portable => true,
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Kernel::Sse2 => is_x86_feature_detected!("sse2"),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            Kernel::Avx2 => is_x86_feature_detected!("avx2"),
            #[cfg(target_arch = "aarch64")]
            Kernel::Neon => std::arch::is_aarch64_feature_detected!("neon"),
            _ => false,
        }
    }

    /// Fastest kernel the CPU supports.
    pub fn detect() -> Kernel {
        [Kernel::Avx2, Kernel::Neon, Kernel::Sse2]
            .into_iter()
            .find(|k| k.is_available())
            .unwrap_or(Kernel::Portable)
    }

    /// Every kernel the CPU supports, portable first.
    pub fn available() -> impl Iterator<Item = Kernel> {
        Self::ALL.into_iter().filter(|k| k.is_available())
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kernel {
    type Err = Adler32Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("portable") || s.eq_ignore_ascii_case("scalar") {
            return Ok(Kernel::Portable);
        }
        Kernel::ALL
            .into_iter()
            .find(|k| s.eq_ignore_ascii_case(k.name()))
            .ok_or_else(|| Adler32Error::UnknownKernel(s.to_string()))
    }
}

/// Kernel selection after applying the override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelConfig {
    /// Kernel named by the override, `None` for auto.
    pub requested: Option<Kernel>,
    /// Kernel actually used for bulk input.
    pub effective: Kernel,
}

impl KernelConfig {
    /// Clamps `requested` to what the CPU supports.
    pub fn resolve(requested: Option<Kernel>) -> Self {
        let effective = match requested {
            Some(kernel) if kernel.is_available() => kernel,
            Some(kernel) => {
                warn!(kernel = kernel.name(), "requested adler32 kernel unavailable, detecting");
                Kernel::detect()
            }
            None => Kernel::detect(),
        };
        Self {
            requested,
            effective,
        }
    }
}

/// Parses an override value. Empty and `auto` mean auto-detection.
pub fn parse_override(value: &str) -> Result<Option<Kernel>, Adler32Error> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    value.parse().map(Some)
}

fn read_env_override() -> Option<Kernel> {
    let value = std::env::var(KERNEL_ENV).ok()?;
    match parse_override(&value) {
        Ok(kernel) => kernel,
        Err(err) => {
            warn!(%err, "ignoring {}", KERNEL_ENV);
            None
        }
    }
}

/// Effective configuration for this process.
pub fn get() -> KernelConfig {
    static CONFIG: OnceLock<KernelConfig> = OnceLock::new();
    *CONFIG.get_or_init(|| {
        let config = KernelConfig::resolve(read_env_override());
        debug!(
            requested = config.requested.map_or("auto", Kernel::name),
            effective = config.effective.name(),
            "selected adler32 kernel"
        );
        config
    })
}

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Adler32Error {
    #[error("accumulators out of range (s1={s1}, s2={s2}), both must be below 65521")]
    InvalidState { s1: u32, s2: u32 },

    #[error("unknown kernel: {0}")]
    UnknownKernel(String),

    #[error("kernel {kernel} is not supported by this CPU")]
    UnsupportedKernel { kernel: &'static str },

    #[error("failed to reserve space for {len} checksums")]
    Allocation { len: usize },
}

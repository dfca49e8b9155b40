use lane_adler::{Adler32, Adler32Error, DIVISOR, NMAX, adler32, checksum};

#[test]
fn test_adler32_empty() {
    let buf = [];
    assert_eq!(adler32(1, &buf), 1);
    assert_eq!(Adler32::new().finish(), 0x0000_0001);
    assert_eq!(Adler32::default(), Adler32::new());
    assert_eq!(checksum(&buf), 1);
}

#[test]
fn test_adler32_small() {
    assert_eq!(checksum(b"A"), 4325442);
    assert_eq!(checksum(b"AB"), 12976260);
}

#[test]
fn test_adler32_simple() {
    assert_eq!(checksum(b"adler32"), 178520686);
    assert_eq!(checksum(b"Hello, World!"), 530449514);
    assert_eq!(checksum(b"Wikipedia"), 0x11E6_0398);
    assert_eq!(
        checksum(b"The quick brown fox jumps over the lazy dog"),
        0x5BDC_0FDA
    );
}

#[test]
fn test_adler32_large() {
    assert_eq!(checksum(&[0u8; 1000]), 65536001);
    assert_eq!(checksum(&[0xFF; 1024]), 0x79A6_FC2E);
    assert_eq!(checksum(&vec![0xFF; 1024 * 1024]), 0x8E88_EF11);
    assert_eq!(checksum(&vec![0xA5; 1024 * 1024]), 0xD500_9AB1);

    let ramp: Vec<u8> = (0..25_600u32).map(|i| i as u8).collect();
    assert_eq!(checksum(&ramp), 0x747F_D0E0);
}

#[test]
fn test_block_length_bound() {
    assert_eq!(NMAX, 5552);
    assert_eq!(lane_adler::adler32::max_block_len(DIVISOR, u32::MAX as u64), 5552);
    // A narrower accumulator would need much shorter blocks.
    assert!(lane_adler::adler32::max_block_len(DIVISOR, u16::MAX as u64 * 1024) < NMAX);
}

#[test]
fn test_empty_update_keeps_state() {
    let state = Adler32::new().update(b"some prefix");
    assert_eq!(state.update(&[]), state);
    assert_eq!(adler32(0, &[]), 0);
    assert_eq!(adler32(0x1234_5678, &[]), 0x1234_5678);
}

#[test]
fn test_zero_state_is_not_reset() {
    // An all-zero state is a legitimate resume point, not an uninitialized one.
    let zero = Adler32::from_parts(0, 0).unwrap();
    let resumed = zero.update(b"abc");
    assert_eq!(resumed.s1(), 97 + 98 + 99);
    assert_ne!(resumed, Adler32::new().update(b"abc"));
}

#[test]
fn test_state_transfer() {
    let data = b"resume me after the first chunk arrives";
    let (head, tail) = data.split_at(12);

    let (s1, s2) = Adler32::new().update(head).into_parts();
    let resumed = Adler32::from_parts(s1, s2).unwrap().update(tail);
    assert_eq!(resumed.finish(), checksum(data));

    let from_sum = Adler32::from_checksum(checksum(head)).unwrap().update(tail);
    assert_eq!(from_sum, resumed);
}

#[test]
fn test_state_import_rejects_out_of_range() {
    assert_eq!(
        Adler32::from_parts(DIVISOR, 0),
        Err(Adler32Error::InvalidState { s1: DIVISOR, s2: 0 })
    );
    assert!(Adler32::from_parts(0, DIVISOR).is_err());
    assert!(Adler32::from_checksum(0xFFFF_0001).is_err());
    assert!(Adler32::from_parts(DIVISOR - 1, DIVISOR - 1).is_ok());
}

#[test]
fn test_raw_words_are_reduced() {
    // 0xFFF1 == DIVISOR, so these words are equivalent to zero accumulators.
    assert_eq!(adler32(0xFFF1_FFF1, b"x"), adler32(0, b"x"));
    assert_eq!(
        adler32(0xFFFF_FFFF, &[7u8; 100]),
        adler32(((0xFFFF % DIVISOR) << 16) | (0xFFFF % DIVISOR), &[7u8; 100])
    );
}

#[test]
fn test_write_in_place() {
    let mut state = Adler32::new();
    state.write(b"Wiki");
    state.write(b"");
    state.write(b"pedia");
    assert_eq!(state.finish(), 0x11E6_0398);
}

#[test]
fn test_combine_method() {
    let a = Adler32::new().update(b"Wiki");
    let b = Adler32::new().update(b"pedia");
    assert_eq!(a.combine(b, 5).finish(), 0x11E6_0398);
}

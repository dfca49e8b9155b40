use lane_adler::{Adler32, DIVISOR, checksum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut buf = vec![0u8; len];
    rng.fill(&mut buf[..]);
    buf
}

#[test]
fn test_split_across_short_and_bulk_paths() {
    let data = random_bytes(20, 1);
    let whole = Adler32::new().update(&data);
    let split = Adler32::new().update(&data[..15]).update(&data[15..]);
    assert_eq!(split, whole);
}

#[test]
fn test_every_split_point_matches_bulk() {
    let data = random_bytes(600, 2);
    let whole = Adler32::new().update(&data);
    for i in 0..=data.len() {
        let (a, b) = data.split_at(i);
        assert_eq!(Adler32::new().update(a).update(b), whole, "split at {}", i);
    }
}

#[test]
fn test_splits_around_block_boundary() {
    let data = random_bytes(3 * 5552 + 17, 3);
    let whole = checksum(&data);
    for i in [5535, 5536, 5551, 5552, 5553, 11103, 11104, 11105] {
        let (a, b) = data.split_at(i);
        assert_eq!(Adler32::new().update(a).update(b).finish(), whole);
    }
}

#[test]
fn test_random_partitions() {
    let mut rng = StdRng::seed_from_u64(4);
    let data = random_bytes(40_000, 5);
    let whole = checksum(&data);

    for _ in 0..50 {
        let mut state = Adler32::new();
        let mut rest = &data[..];
        while !rest.is_empty() {
            let n = rng.random_range(1..=rest.len().min(9000));
            let (chunk, tail) = rest.split_at(n);
            state = state.update(chunk);
            assert!(state.s1() < DIVISOR && state.s2() < DIVISOR);
            rest = tail;
        }
        assert_eq!(state.finish(), whole);
    }
}

#[test]
fn test_single_byte_feed() {
    let data = random_bytes(6000, 6);
    let state = data
        .chunks(1)
        .fold(Adler32::new(), |state, byte| state.update(byte));
    assert_eq!(state.finish(), checksum(&data));
}

#[test]
fn test_deterministic() {
    let data = random_bytes(100_000, 7);
    let first = checksum(&data);
    for _ in 0..5 {
        assert_eq!(checksum(&data), first);
    }
}

#[test]
fn test_independent_states_across_threads() {
    let inputs: Vec<Vec<u8>> = (0..8).map(|i| random_bytes(10_000 + i * 977, i as u64)).collect();
    let expected: Vec<u32> = inputs.iter().map(|d| checksum(d)).collect();

    let handles: Vec<_> = inputs
        .into_iter()
        .map(|data| std::thread::spawn(move || Adler32::new().update(&data).finish()))
        .collect();
    let actual: Vec<u32> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(actual, expected);
}

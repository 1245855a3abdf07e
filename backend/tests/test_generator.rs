//! Tests for the Blum-Blum-Shub generator
//!
//! CRITICAL: Same (p, q, seed) MUST produce the same bit stream.

use bbs_demo_core_rs::rng::bits_needed;
use bbs_demo_core_rs::{BbsGenerator, BbsParams, GeneratorError};
use num_bigint::BigUint;

fn generator(p: u32, q: u32, seed: u32) -> BbsGenerator {
    BbsParams::new(p, q, seed).generator().unwrap()
}

#[test]
fn test_initial_state_is_seed_squared() {
    let rng = generator(11, 19, 3);
    assert_eq!(rng.modulus(), &BigUint::from(209u32));
    assert_eq!(rng.initial_state(), &BigUint::from(9u32));
    assert_eq!(rng.current_state(), &BigUint::from(9u32));
}

#[test]
fn test_initial_state_reduced_mod_modulus() {
    // 20^2 = 400 = 209 + 191
    let rng = generator(11, 19, 20);
    assert_eq!(rng.initial_state(), &BigUint::from(191u32));
}

#[test]
fn test_first_bit_comes_from_squared_state() {
    let mut rng = generator(11, 19, 3);

    assert_eq!(rng.next_bit(), 1);
    assert_eq!(rng.current_state(), &BigUint::from(81u32));
}

#[test]
fn test_known_bit_sequence() {
    let mut rng = generator(11, 19, 3);
    let bits: Vec<u8> = (0..16).map(|_| rng.next_bit()).collect();

    assert_eq!(bits, vec![1, 0, 0, 0, 0, 0, 1, 0, 1, 1, 0, 1, 1, 0, 0, 0]);
    assert_eq!(rng.bits_drawn(), 16);
}

#[test]
fn test_first_drawn_bit_is_most_significant() {
    // Bits 1,0,0,0,0,0,1,0 → 0b1000_0010
    let mut rng = generator(11, 19, 3);
    assert_eq!(rng.next_integer(8), BigUint::from(130u32));
}

#[test]
fn test_known_byte_sequence() {
    let mut rng = generator(10007, 10039, 42);
    let bytes: Vec<u64> = (0..6).map(|_| rng.next_u64(8)).collect();
    assert_eq!(bytes, vec![32, 94, 149, 55, 75, 101]);
}

#[test]
fn test_same_params_same_sequence() {
    let mut rng1 = generator(10007, 10039, 42);
    let mut rng2 = generator(10007, 10039, 42);

    for i in 0..500 {
        assert_eq!(
            rng1.next_bit(),
            rng2.next_bit(),
            "Determinism broken at bit {}",
            i
        );
    }
}

#[test]
fn test_different_seeds_diverge() {
    let mut rng1 = generator(10007, 10039, 42);
    let mut rng2 = generator(10007, 10039, 43);

    let a: Vec<u64> = (0..4).map(|_| rng1.next_u64(16)).collect();
    let b: Vec<u64> = (0..4).map(|_| rng2.next_u64(16)).collect();
    assert_ne!(a, b, "Different seeds should produce different values");
}

#[test]
fn test_reset_replays_stream() {
    let mut rng = generator(10007, 10039, 42);
    let first: Vec<u64> = (0..10).map(|_| rng.next_u64(8)).collect();

    rng.reset();
    assert_eq!(rng.bits_drawn(), 0);
    assert_eq!(rng.current_state(), rng.initial_state());

    let replay: Vec<u64> = (0..10).map(|_| rng.next_u64(8)).collect();
    assert_eq!(first, replay);
}

#[test]
fn test_current_state_does_not_advance() {
    let rng = generator(10007, 10039, 42);
    let before = rng.current_state().clone();
    let _ = rng.current_state();
    assert_eq!(rng.current_state(), &before);
    assert_eq!(rng.bits_drawn(), 0);
}

#[test]
fn test_state_stays_below_modulus() {
    let mut rng = generator(499, 547, 7);
    for _ in 0..2000 {
        rng.next_bit();
        assert!(rng.current_state() < rng.modulus());
    }
}

#[test]
fn test_invalid_modulus() {
    for (p, q) in [(0u32, 0u32), (0, 19), (1, 1)] {
        let err = BbsParams::new(p, q, 3u32).generator().unwrap_err();
        assert_eq!(
            err,
            GeneratorError::InvalidModulus {
                modulus: BigUint::from(p * q)
            }
        );
    }
}

#[test]
fn test_non_prime_factors_still_generate() {
    // 4 * 9 is neither prime nor Blum; the generator does not care
    let mut rng = generator(4, 9, 5);
    let draw = rng.next_u64(8);
    assert!(draw < 256);
}

#[test]
fn test_arbitrary_precision_factors() {
    let p = BigUint::parse_bytes(b"170141183460469231731687303715884105727", 10).unwrap();
    let q = BigUint::parse_bytes(b"618970019642690137449562111", 10).unwrap();
    let seed = BigUint::from(123_456_789u64);

    let mut rng1 = BbsGenerator::new(&p, &q, &seed).unwrap();
    let mut rng2 = BbsGenerator::new(&p, &q, &seed).unwrap();
    assert_eq!(rng1.next_integer(200), rng2.next_integer(200));
    assert!(rng1.modulus().bits() > 64);
}

#[test]
fn test_bits_needed_matches_ceil_log2() {
    for count in 1u64..=1024 {
        let expected = (count as f64).log2().ceil() as u32;
        assert_eq!(bits_needed(count), expected, "count {}", count);
    }
}

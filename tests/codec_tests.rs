//! Frequency Codec Tests
//!
//! Tests for the frequency <-> PLL conversion and its truncation behavior.
//! Run with: cargo test --test codec_tests

use fm_tuner::config::{DEFAULT_PRESETS_MHZ, FREQ_HIGH_MHZ, FREQ_LOW_MHZ};
use fm_tuner::radio::codec::{frequency_to_pll, pll_to_frequency, quantize, PLL_STEP_HZ};
use fm_tuner::types::Pll;

fn assert_mhz(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected} MHz, got {actual} MHz"
    );
}

// =============================================================================
// Forward Conversion Tests
// =============================================================================

#[test]
fn hundred_mhz_encodes_to_12234() {
    // 4 * 100_225_000 / 32768 = 12234.49 -> truncated
    assert_eq!(frequency_to_pll(100.0).value(), 12234);
}

#[test]
fn band_edges_encode() {
    assert_eq!(frequency_to_pll(87.5).value(), 10708);
    assert_eq!(frequency_to_pll(108.0).value(), 13211);
}

#[test]
fn keypad_example_encodes() {
    assert_eq!(frequency_to_pll(103.25).value(), 12631);
}

#[test]
fn factory_presets_encode() {
    let expected = [10842, 11607, 11892, 11099];
    for (mhz, pll) in DEFAULT_PRESETS_MHZ.iter().zip(expected) {
        assert_eq!(frequency_to_pll(*mhz).value(), pll, "preset {mhz}");
    }
}

#[test]
fn zero_mhz_is_if_only() {
    // 4 * 225_000 / 32768 = 27.47
    assert_eq!(frequency_to_pll(0.0).value(), 27);
}

#[test]
fn negative_frequency_clamps_to_zero() {
    assert_eq!(frequency_to_pll(-5.0).value(), 0);
}

#[test]
fn out_of_band_is_not_rejected() {
    // The codec converts anything; validation lives elsewhere
    let pll = frequency_to_pll(120.0);
    assert!(pll > frequency_to_pll(FREQ_HIGH_MHZ));
    assert!(pll < Pll::MAX);
}

// =============================================================================
// Inverse Conversion Tests
// =============================================================================

#[test]
fn decode_12234() {
    assert_mhz(pll_to_frequency(Pll::new(12234).unwrap()), 99.995_928);
}

#[test]
fn decode_keypad_example() {
    assert_mhz(pll_to_frequency(Pll::new(12631).unwrap()), 103.248_152);
}

#[test]
fn decode_presets() {
    let expected = [88.592_664, 94.859_544, 97.194_264, 90.698_008];
    for (mhz, tuned) in DEFAULT_PRESETS_MHZ.iter().zip(expected) {
        assert_mhz(quantize(*mhz), tuned);
    }
}

#[test]
fn one_step_is_8192_hz() {
    let a = pll_to_frequency(Pll::new(12000).unwrap());
    let b = pll_to_frequency(Pll::new(12001).unwrap());
    assert_mhz(b - a, PLL_STEP_HZ as f32 / 1_000_000.0);
}

#[test]
fn max_pll_decodes() {
    // 16383 * 8192 - 225000 = 133_984_536 Hz
    assert_mhz(pll_to_frequency(Pll::MAX), 133.984_54);
}

// =============================================================================
// Round Trip Properties
// =============================================================================

#[test]
fn quantize_truncates_within_one_step() {
    let step_mhz = PLL_STEP_HZ as f32 / 1_000_000.0;
    let mut mhz = FREQ_LOW_MHZ;
    while mhz <= FREQ_HIGH_MHZ {
        let q = quantize(mhz);
        assert!(q <= mhz + 1e-5, "{q} above {mhz}");
        assert!(mhz - q < step_mhz + 1e-5, "{q} more than a step below {mhz}");
        mhz += 0.05;
    }
}

#[test]
fn encoding_is_monotonic() {
    let mut last = frequency_to_pll(FREQ_LOW_MHZ);
    let mut mhz = FREQ_LOW_MHZ;
    while mhz <= FREQ_HIGH_MHZ {
        let pll = frequency_to_pll(mhz);
        assert!(pll >= last);
        last = pll;
        mhz += 0.01;
    }
}

#[test]
fn reencoding_a_decoded_pll_stays_within_one_step() {
    for raw in 0..=Pll::MAX.value() {
        let pll = Pll::new(raw).unwrap();
        let back = frequency_to_pll(pll_to_frequency(pll)).value();
        assert!(back == raw || back + 1 == raw, "{raw} -> {back}");
    }
}

//! Configuration and Constants Tests
//!
//! Tests to verify configuration values are valid and consistent.
//! Run with: cargo test --test config_tests

use fm_tuner::config::*;
use fm_tuner::types::{Key, PresetSlot, SeekDirection};

// =============================================================================
// Hardware Constant Tests
// =============================================================================

#[test]
fn tuner_address_fixed() {
    // TEA5767 has a single hard-wired address
    assert_eq!(TEA5767_I2C_ADDR, 0x60);
}

#[test]
fn display_address_differs_from_tuner() {
    assert_ne!(DISPLAY_I2C_ADDR, TEA5767_I2C_ADDR);
}

#[test]
fn i2c_fast_mode() {
    // TEA5767 supports up to 400 kHz
    assert!(I2C_FREQUENCY_HZ <= 400_000);
}

#[test]
fn register_images_are_five_bytes() {
    assert_eq!(REGISTER_COUNT, 5);
}

#[test]
fn band_ordering() {
    assert!(FREQ_LOW_MHZ < FREQ_HIGH_MHZ);
    assert!((FREQ_LOW_MHZ..=FREQ_HIGH_MHZ).contains(&DEFAULT_FREQUENCY_MHZ));
}

#[test]
fn banner_fits_display_line() {
    // 128 px / 6 px per glyph
    assert!(BANNER.len() <= 21);
}

#[test]
fn settle_times() {
    assert_eq!(SEEK_SETTLE_MS, 100);
    assert!(INIT_SETTLE_MS > 0);
}

// =============================================================================
// Keypad Layout Tests
// =============================================================================

#[test]
fn every_key_cap_maps_to_a_key() {
    for row in KEYPAD_LAYOUT {
        for cap in row {
            assert!(Key::from_char(cap).is_some(), "unmapped cap {cap}");
        }
    }
}

#[test]
fn layout_has_each_key_once() {
    let mut caps: Vec<char> = KEYPAD_LAYOUT.iter().flatten().copied().collect();
    caps.sort_unstable();
    caps.dedup();
    assert_eq!(caps.len(), 16);
}

// =============================================================================
// Preset Tests
// =============================================================================

#[test]
fn default_presets_in_band() {
    for mhz in ChannelPresets::default().as_array() {
        assert!(RangePolicy::Strict.permits(mhz), "{mhz} out of band");
    }
}

#[test]
fn presets_indexed_by_slot() {
    let presets = ChannelPresets::new([1.0, 2.0, 3.0, 4.0]);
    for (slot, mhz) in PresetSlot::ALL.iter().zip([1.0, 2.0, 3.0, 4.0]) {
        assert_eq!(presets.get(*slot), mhz);
    }
}

// =============================================================================
// Policy Tests
// =============================================================================

#[test]
fn permissive_accepts_anything() {
    for mhz in [0.0, -1.0, 76.0, 120.0, 1000.0] {
        assert!(RangePolicy::Permissive.permits(mhz));
    }
}

#[test]
fn strict_range_is_inclusive() {
    assert!(RangePolicy::Strict.permits(FREQ_LOW_MHZ));
    assert!(RangePolicy::Strict.permits(FREQ_HIGH_MHZ));
    assert!(!RangePolicy::Strict.permits(86.9));
    assert!(!RangePolicy::Strict.permits(108.1));
    assert!(!RangePolicy::Strict.permits(f32::NAN));
}

#[test]
fn policy_defaults() {
    assert_eq!(RangePolicy::default(), RangePolicy::Permissive);
    assert_eq!(ReadPolicy::default(), ReadPolicy::Strict);
    assert_eq!(DigitOverflow::default(), DigitOverflow::Overwrite);
}

// =============================================================================
// Tuner Config Tests
// =============================================================================

#[test]
fn default_config() {
    let config = TunerConfig::default();
    assert_eq!(config, TunerConfig::new());
    assert_eq!(config.presets, ChannelPresets::default());
    assert_eq!(config.seek_direction, SeekDirection::Up);
    assert_eq!(config.seek_settle_ms, SEEK_SETTLE_MS);
    assert_eq!(config.init_settle_ms, INIT_SETTLE_MS);
}

#[test]
fn builders_change_one_field() {
    let base = TunerConfig::default();
    let config = base
        .with_seek_direction(SeekDirection::Down)
        .with_range_policy(RangePolicy::Strict)
        .with_read_policy(ReadPolicy::MergeStale)
        .with_digit_overflow(DigitOverflow::Ignore)
        .with_seek_settle_ms(250);

    assert_eq!(config.seek_direction, SeekDirection::Down);
    assert_eq!(config.range_policy, RangePolicy::Strict);
    assert_eq!(config.read_policy, ReadPolicy::MergeStale);
    assert_eq!(config.digit_overflow, DigitOverflow::Ignore);
    assert_eq!(config.seek_settle_ms, 250);
    assert_eq!(config.presets, base.presets);
    assert_eq!(config.init_settle_ms, base.init_settle_ms);
}

// Integration tests for WaveGen synthesis and channel placement

use wavegen::{ConfigError, SampleWidth, Samples, WaveConfig, WaveGen};

fn single_channel(wavelength: &str) -> WaveConfig {
    WaveConfig::new()
        .with_nchan(1)
        .with_cycles(1)
        .with_wavelength(wavelength)
        .with_wave("SINE:ALL")
}

#[test]
fn test_buffer_shape() {
    let mut engine = WaveGen::new(
        &WaveConfig::new()
            .with_nchan(4)
            .with_wavelength("100")
            .with_total_length(250)
            .with_dsize(32),
    )
    .unwrap();
    let buffer = engine.generate();

    assert_eq!(buffer.nchan(), 4);
    assert_eq!(buffer.total_length(), 250);
    assert_eq!(buffer.width(), SampleWidth::I32);
    assert_eq!(buffer.len(), 1000);
    assert!(matches!(buffer.samples(), Samples::I32(_)));
}

#[test]
fn test_sine_starts_at_zero_and_peaks_at_quarter() {
    let mut engine = WaveGen::new(&single_channel("1000")).unwrap();
    let track = engine.generate().channel(0);

    assert_eq!(track.len(), 1000);
    assert_eq!(track[0], 0);
    let peak = track[250];
    assert!(
        (peak - i16::MAX as i64).abs() <= 1,
        "sample at L/4 should be full scale, got {}",
        peak
    );
}

#[test]
fn test_constant_sequences_repeat_on_every_channel() {
    let mut engine = WaveGen::new(
        &WaveConfig::new()
            .with_nchan(4)
            .with_wavelength("64")
            .with_phase("45")
            .with_scale("0.5"),
    )
    .unwrap();
    let buffer = engine.generate();

    let first = buffer.channel(0);
    assert!(first.iter().any(|s| *s != 0));
    for chan in 1..4 {
        assert_eq!(buffer.channel(chan), first, "channel {} differs", chan);
    }
}

#[test]
fn test_unassigned_channel_stays_silent() {
    let mut engine = WaveGen::new(
        &WaveConfig::new()
            .with_nchan(2)
            .with_wavelength("4")
            .with_total_length(4)
            .with_phase("90")
            .with_wave("SINE:1"),
    )
    .unwrap();
    let buffer = engine.generate();

    for frame in 0..4 {
        assert_eq!(buffer.get(frame * 2 + 1), Some(0));
    }
    assert!(buffer.channel(0).iter().any(|s| *s != 0));

    let bytes = buffer.to_le_bytes();
    for frame in 0..4 {
        let at = (frame * 2 + 1) * 2;
        assert_eq!(&bytes[at..at + 2], &[0, 0]);
    }
}

#[test]
fn test_start_position_and_crop_window() {
    let mut engine = WaveGen::new(
        &single_channel("4")
            .with_total_length(4)
            .with_spos("2")
            .with_crop("1")
            .with_phase("90"),
    )
    .unwrap();
    let track = engine.generate().channel(0);

    // sin at -90 and 30 degrees
    assert_eq!(track, vec![0, 0, -32767, 16383]);
}

#[test]
fn test_degenerate_placement_leaves_offset_only() {
    let mut engine = WaveGen::new(
        &single_channel("8")
            .with_spos("8")
            .with_offset("5"),
    )
    .unwrap();
    let track = engine.generate().channel(0);
    assert_eq!(track, vec![16383; 8]);

    let mut engine = WaveGen::new(&single_channel("8").with_crop("8")).unwrap();
    assert_eq!(engine.generate().channel(0), vec![0; 8]);
}

#[test]
fn test_offset_shifts_whole_track() {
    let mut engine = WaveGen::new(
        &single_channel("4")
            .with_total_length(8)
            .with_offset("-2.5")
            .with_wave("NULL:ALL"),
    )
    .unwrap();
    let track = engine.generate().channel(0);
    assert_eq!(track, vec![-8191; 8]);
}

#[test]
fn test_overflow_wraps() {
    let mut engine = WaveGen::new(
        &single_channel("8")
            .with_wave("SQUARE:ALL")
            .with_offset("10"),
    )
    .unwrap();
    let track = engine.generate().channel(0);

    // 32767 + 32767 wraps to -2
    assert_eq!(track[1], -2);
    // -32767 + 32767
    assert_eq!(track[6], 0);
}

#[test]
fn test_accumulated_start_positions_stagger_channels() {
    let mut engine = WaveGen::new(
        &WaveConfig::new()
            .with_nchan(3)
            .with_wavelength("4")
            .with_total_length(12)
            .with_phase("90")
            .with_spos("+0,4"),
    )
    .unwrap();
    let buffer = engine.generate();

    for chan in 0..3 {
        let track = buffer.channel(chan);
        let start = chan * 4;
        for (index, sample) in track.iter().enumerate() {
            let inside = index >= start && index < start + 4;
            assert_eq!(*sample != 0, inside, "chan {} index {}", chan, index);
        }
    }
}

#[test]
fn test_extreme_crop_and_wavelength_still_produce_a_buffer() {
    let mut engine = WaveGen::new(&single_channel("8").with_crop("-1e19")).unwrap();
    let cropped = engine.generate().channel(0);
    let mut plain = WaveGen::new(&single_channel("8")).unwrap();
    assert_eq!(cropped, plain.generate().channel(0));

    let mut engine = WaveGen::new(&single_channel("1e19").with_total_length(16)).unwrap();
    let buffer = engine.generate();
    assert_eq!(buffer.len(), 16);
    assert_eq!(buffer.channel(0)[0], 0);

    let mut engine = WaveGen::new(
        &single_channel("8")
            .with_spos("1e19")
            .with_offset("1"),
    )
    .unwrap();
    assert_eq!(engine.generate().channel(0), vec![3276; 8]);
}

#[test]
fn test_wavelength_too_large_for_default_length_is_rejected() {
    assert!(matches!(
        WaveGen::new(&single_channel("1e19")),
        Err(ConfigError::BufferTooLarge { nchan: 1, .. })
    ));
}

#[test]
fn test_huge_channel_range_is_clamped() {
    let mut engine = WaveGen::new(
        &WaveConfig::new()
            .with_nchan(3)
            .with_wavelength("16")
            .with_wave("SINE:2-99999999999"),
    )
    .unwrap();
    let buffer = engine.generate();
    assert!(buffer.channel(0).iter().all(|s| *s == 0));
    assert!(buffer.channel(1).iter().any(|s| *s != 0));
    assert_eq!(buffer.channel(1), buffer.channel(2));
}

#[test]
fn test_waveform_selector_per_channel() {
    let mut engine = WaveGen::new(
        &WaveConfig::new()
            .with_nchan(3)
            .with_wavelength("100")
            .with_wave("SINE:1/RAMP:2/SQUARE:3"),
    )
    .unwrap();
    let buffer = engine.generate();

    let ramp = buffer.channel(1);
    assert!(ramp.iter().all(|s| *s >= 0));
    let drops = ramp.windows(2).filter(|w| w[1] < w[0]).count();
    assert!(drops <= 1, "ramp fell {} times", drops);

    let square = buffer.channel(2);
    assert!(square
        .iter()
        .all(|s| *s == 0 || *s == i16::MAX as i64 || *s == -(i16::MAX as i64)));
}

#[test]
fn test_second_run_continues_sequences() {
    let config = single_channel("32").with_scale("1,1.5");
    let mut engine = WaveGen::new(&config).unwrap();

    let first = engine.generate();
    let second = engine.generate();
    assert_ne!(first, second);
    assert_eq!(second.channel(0)[8], first.channel(0)[8] / 2);

    engine.reset();
    assert_eq!(engine.generate(), first);

    let mut fresh = WaveGen::new(&config).unwrap();
    assert_eq!(fresh.generate(), first);
}

#[test]
fn test_configuration_errors_abort() {
    assert_eq!(
        WaveGen::new(&WaveConfig::new().with_dsize(8)).err(),
        Some(ConfigError::InvalidSampleWidth(8))
    );
    assert!(matches!(
        WaveGen::new(&WaveConfig::new().with_wave("SAW:ALL")),
        Err(ConfigError::UnknownWaveform(_))
    ));
    assert!(matches!(
        WaveGen::new(&WaveConfig::new().with_wave("SINE:1:2")),
        Err(ConfigError::MalformedSelector(_))
    ));
    assert!(matches!(
        WaveGen::new(&WaveConfig::new().with_wave("SINE:one")),
        Err(ConfigError::MalformedChannels(_))
    ));
    assert!(matches!(
        WaveGen::new(&WaveConfig::new().with_offset("+0:5")),
        Err(ConfigError::MalformedSequence { .. })
    ));
}

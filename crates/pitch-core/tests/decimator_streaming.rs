//! Streaming behaviour of the allpass decimator and the front end

use pitch_core::{
    analyze_channels, decimate_by_2, AllpassState, Decimator, FrontEndConfig, PitchFrontEnd,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn noise(rng: &mut SmallRng, len: usize, amplitude: i16) -> Vec<i16> {
    (0..len).map(|_| rng.gen_range(-amplitude..=amplitude)).collect()
}

fn run(decimator: &mut Decimator, frames: &[Vec<i16>]) -> Vec<Vec<i16>> {
    frames.iter().map(|f| decimator.process(f).unwrap()).collect()
}

#[test]
fn output_is_half_length() {
    let mut decimator = Decimator::new();
    for len in [2usize, 4, 6, 10, 160, 240, 480] {
        let out = decimator.process(&vec![100; len]).unwrap();
        assert_eq!(out.len(), len / 2);
    }
}

#[test]
fn zero_frame_from_zero_state() {
    let mut state = AllpassState::new();
    let mut out = [0i16; 4];
    decimate_by_2(&[0; 8], &mut state, &mut out).unwrap();
    assert_eq!(out, [0, 0, 0, 0]);
    assert_eq!(state.upper(), [0, 0]);
    assert_eq!(state.lower(), [0, 0]);
    assert_eq!(state.carry_q16(), 0);
}

#[test]
fn upper_band_on_odd_lower_band_on_even_positions() {
    let mut decimator = Decimator::new();

    // Impulse at working position 1 (upper band), last sample carried into
    // position 0 of the next frame (lower band).
    let first = decimator.process(&[1000, 0, 0, 0, 0, 0, 0, -2000]).unwrap();
    assert_eq!(first, vec![13, 410, 827, -352]);
    assert_eq!(decimator.state().upper(), [-2274, 8891584]);
    assert_eq!(decimator.state().lower(), [0, 0]);
    assert_eq!(decimator.state().carry_q16(), -131072000);

    let second = decimator.process(&[0; 8]).unwrap();
    assert_eq!(second, vec![-95, -1644, -526, 664]);
    assert_eq!(decimator.state().upper(), [0, 200592]);
    assert_eq!(decimator.state().lower(), [475546, -35845568]);
    assert_eq!(decimator.state().carry_q16(), 0);
}

#[test]
fn frame_order_matters() {
    let mut rng = SmallRng::seed_from_u64(7);
    let a = noise(&mut rng, 64, 12000);
    let b = noise(&mut rng, 64, 12000);

    let ab = run(&mut Decimator::new(), &[a.clone(), b.clone()]);
    let ba = run(&mut Decimator::new(), &[b, a]);

    assert_ne!(ab[1], ba[0]);
    assert_ne!(ab[0], ba[1]);
}

#[test]
fn state_carries_between_frames() {
    let mut rng = SmallRng::seed_from_u64(11);
    let first = noise(&mut rng, 32, 9000);
    let second = noise(&mut rng, 32, 9000);

    let mut warm = Decimator::new();
    warm.process(&first).unwrap();
    let warm_out = warm.process(&second).unwrap();

    let cold_out = Decimator::new().process(&second).unwrap();
    assert_ne!(warm_out, cold_out);
}

#[test]
fn reset_then_replay_is_identical() {
    let mut rng = SmallRng::seed_from_u64(42);
    let frames: Vec<Vec<i16>> = (0..20).map(|_| noise(&mut rng, 240, i16::MAX)).collect();

    let mut decimator = Decimator::with_frame_len(240);
    let first = run(&mut decimator, &frames);
    let end_state = decimator.state().clone();

    decimator.reset();
    assert!(decimator.state().is_zero());

    let second = run(&mut decimator, &frames);
    assert_eq!(first, second);
    assert_eq!(decimator.state(), &end_state);
}

#[test]
fn full_scale_input_saturates_without_panicking() {
    let mut decimator = Decimator::new();
    let loud: Vec<i16> = (0..480).map(|i| if i % 2 == 0 { i16::MAX } else { i16::MIN }).collect();
    for _ in 0..10 {
        let out = decimator.process(&loud).unwrap();
        assert_eq!(out.len(), 240);
    }

    let dc = vec![i16::MAX; 480];
    let out = decimator.process(&dc).unwrap();
    // DC passes both allpass branches and sums past the 16-bit range.
    assert_eq!(*out.last().unwrap(), i16::MAX);
}

#[test]
fn frame_splitting_changes_nothing_for_the_stream() {
    // Two 16-sample frames carry the same state as one 32-sample frame.
    let mut rng = SmallRng::seed_from_u64(3);
    let signal = noise(&mut rng, 32, 20000);

    let whole = Decimator::new().process(&signal).unwrap();

    let mut split = Decimator::new();
    let mut halves = split.process(&signal[..16]).unwrap();
    halves.extend(split.process(&signal[16..]).unwrap());

    assert_eq!(whole, halves);
}

#[test]
fn parallel_channels_match_sequential() {
    let mut rng = SmallRng::seed_from_u64(99);
    let config = FrontEndConfig::new().with_frame_len(160).with_order(10);
    let channels = 4;
    let frames_per_channel = 6;

    let input: Vec<Vec<Vec<i16>>> = (0..frames_per_channel)
        .map(|_| (0..channels).map(|_| noise(&mut rng, 160, 15000)).collect())
        .collect();

    let mut parallel: Vec<PitchFrontEnd> =
        (0..channels).map(|_| PitchFrontEnd::new(config.clone()).unwrap()).collect();
    let mut sequential = parallel.clone();

    for frame_set in &input {
        let refs: Vec<&[i16]> = frame_set.iter().map(Vec::as_slice).collect();
        let par_out = analyze_channels(&mut parallel, &refs).unwrap();

        for (channel, stream) in sequential.iter_mut().enumerate() {
            let seq_out = stream.process(&frame_set[channel]).unwrap();
            assert_eq!(par_out[channel], seq_out);
        }
    }
}

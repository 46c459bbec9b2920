//! Criterion benchmarks for tmst-analysis components
//!
//! Run with: cargo bench -p tmst-analysis

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::f64::consts::PI;
use tmst_analysis::{
    AuditoryFilterbank, GammatoneFilterbank, PitchSettings, PitchTracker, Yin, ama_spectrum,
    analytic_envelope, f0m_spectrum,
};
use tmst_config::{AmConfig, AuditoryRange, F0mConfig, ModulationRange};
use tmst_core::{lombscargle, periodogram};

const SAMPLE_RATE: f64 = 16000.0;

/// Amplitude-modulated 1 kHz tone
fn generate_am_tone(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE;
            (1.0 + 0.8 * (2.0 * PI * 4.0 * t).cos()) * (2.0 * PI * 1000.0 * t).sin()
        })
        .collect()
}

/// Harmonic tone with 5 Hz vibrato
fn generate_vibrato(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE;
            let phase = 2.0 * PI * 180.0 * t - 2.0 * (2.0 * PI * 5.0 * t).cos();
            phase.sin() + 0.5 * (2.0 * phase).sin()
        })
        .collect()
}

// ============================================================================
// Building blocks
// ============================================================================

fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("Hilbert_Envelope");
    for size in [4096, 16000, 48000] {
        let signal = generate_am_tone(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &signal, |b, signal| {
            b.iter(|| analytic_envelope(black_box(signal)));
        });
    }
    group.finish();
}

fn bench_periodogram(c: &mut Criterion) {
    let signal = generate_am_tone(16000);
    let freqs: Vec<f64> = (1..=200).map(|i| i as f64).collect();
    c.bench_function("Periodogram_200_freqs", |b| {
        b.iter(|| periodogram(black_box(&signal), SAMPLE_RATE, black_box(&freqs)));
    });
}

fn bench_lombscargle(c: &mut Criterion) {
    // Irregular grid: every third sample dropped.
    let (t, y): (Vec<f64>, Vec<f64>) = (0..2000)
        .filter(|i| i % 3 != 0)
        .map(|i| {
            let t = i as f64 / 400.0;
            (t, 200.0 + 5.0 * (2.0 * PI * 5.0 * t).sin())
        })
        .unzip();
    let freqs: Vec<f64> = (1..=100).map(|i| i as f64 * 0.2).collect();
    c.bench_function("LombScargle_100_freqs", |b| {
        b.iter(|| lombscargle(black_box(&t), black_box(&y), black_box(&freqs)));
    });
}

fn bench_gammatone(c: &mut Criterion) {
    let signal = generate_am_tone(16000);
    let fb = GammatoneFilterbank::new();
    c.bench_function("Gammatone_1s_70_6700", |b| {
        b.iter(|| fb.decompose(black_box(&signal), SAMPLE_RATE, 70.0, 6700.0));
    });
}

fn bench_yin(c: &mut Criterion) {
    let signal = generate_vibrato(16000);
    let settings = PitchSettings::from(&F0mConfig::default());
    c.bench_function("Yin_1s", |b| {
        b.iter(|| Yin::new().track(black_box(&signal), SAMPLE_RATE, &settings));
    });
}

// ============================================================================
// Entry points
// ============================================================================

fn bench_ama_spectrum(c: &mut Criterion) {
    let signal = generate_am_tone(16000);
    let config = AmConfig {
        modulation: ModulationRange::new(0.5, 64.0, 64),
        auditory: AuditoryRange::default(),
    };
    c.bench_function("AMa_spectrum_1s", |b| {
        b.iter(|| ama_spectrum(black_box(&signal), SAMPLE_RATE, &config));
    });
}

fn bench_f0m_spectrum(c: &mut Criterion) {
    let signal = generate_vibrato(32000);
    let config = F0mConfig {
        modulation: ModulationRange::new(0.5, 32.0, 64),
        ..F0mConfig::default()
    };
    c.bench_function("f0M_spectrum_2s", |b| {
        b.iter(|| f0m_spectrum(black_box(&signal), SAMPLE_RATE, &config));
    });
}

criterion_group!(
    benches,
    bench_envelope,
    bench_periodogram,
    bench_lombscargle,
    bench_gammatone,
    bench_yin,
    bench_ama_spectrum,
    bench_f0m_spectrum,
);
criterion_main!(benches);

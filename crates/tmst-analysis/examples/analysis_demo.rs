//! Analysis demo: AM and f0M spectra of synthetic signals.
//!
//! Run with: RUST_LOG=debug cargo run -p tmst-analysis --example analysis_demo

use std::f64::consts::PI;

use tmst_analysis::{ama_scalogram, ama_spectrum, ami_spectrum, f0m_spectrum};
use tmst_config::AnalysisProfile;
use tracing_subscriber::EnvFilter;

const PROFILE: &str = r#"
name = "demo"
description = "Syllable-rate modulations at 16 kHz"
sample_rate = 16000.0

[am.modulation]
mfmin = 1.0
mfmax = 32.0
n_mod = 16

[am.auditory]
fmin = 100.0
fmax = 4000.0

[ami.modulation]
mfmin = 1.0
mfmax = 32.0
n_mod = 6

[ami.auditory]
fmin = 100.0
fmax = 4000.0

[f0m.modulation]
mfmin = 1.0
mfmax = 16.0
n_mod = 9
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let profile = AnalysisProfile::from_toml(PROFILE)?;
    let fs = profile.sample_rate.unwrap_or(16000.0);
    tracing::info!(name = %profile.name, fs, "loaded profile");

    // --- AM tone: 1 kHz carrier, 4 Hz modulation ---
    println!("=== AM spectrum of a 4 Hz modulated 1 kHz tone ===\n");

    let am: Vec<f64> = (0..(2.0 * fs) as usize)
        .map(|i| {
            let t = i as f64 / fs;
            (1.0 + 0.8 * (2.0 * PI * 4.0 * t).cos()) * (2.0 * PI * 1000.0 * t).sin()
        })
        .collect();

    let spectrum = ama_spectrum(&am, fs, &profile.am)?;
    let ch = spectrum
        .fc
        .iter()
        .enumerate()
        .min_by(|a, b| (a.1 - 1000.0).abs().total_cmp(&(b.1 - 1000.0).abs()))
        .map_or(0, |(i, _)| i);
    println!("{} channels, channel {} at {:.1} Hz", spectrum.fc.len(), ch, spectrum.fc[ch]);
    println!("{:>10} {:>14}", "mf (Hz)", "power");
    println!("{:->10} {:->14}", "", "");
    for (f, p) in spectrum.f_spectra.iter().zip(spectrum.channel(ch)) {
        println!("{:>10.2} {:>14.6e}", f, p);
    }

    let intensity = ami_spectrum(&am, fs, &profile.ami)?;
    println!("\n=== AM intensity (modulation index) ===\n");
    for (k, f) in intensity.mf.iter().enumerate() {
        match intensity.spectrum[k][ch] {
            Some(m) => println!("{:>10.2} Hz  m = {:.3}", f, m),
            None => println!("{:>10.2} Hz  m = -", f),
        }
    }

    let scalogram = ama_scalogram(&am, fs, 4.0, &profile.am)?;
    let grid = &scalogram.scalogram;
    println!(
        "\nAM scalogram: {} rows x {} cols, {} cells filled",
        grid.rows(),
        grid.cols(),
        grid.filled_count()
    );
    if let Some((row, col, value)) = grid.peak() {
        println!(
            "peak {:.3e} at t = {:.1} s, mf = {:.2} Hz",
            value, scalogram.params.t[row], scalogram.f_spectra[col]
        );
    }

    // --- Vibrato: 180 Hz, +-8 Hz at 5 Hz ---
    println!("\n=== f0M spectrum of a 5 Hz vibrato ===\n");

    let vibrato: Vec<f64> = (0..(3.0 * fs) as usize)
        .map(|i| {
            let t = i as f64 / fs;
            let phase = 2.0 * PI * 180.0 * t - 8.0 / 5.0 * (2.0 * PI * 5.0 * t).cos();
            phase.sin() + 0.5 * (2.0 * phase).sin()
        })
        .collect();

    let f0m = f0m_spectrum(&vibrato, fs, &profile.f0m)?;
    let voiced = f0m.params.f0.iter().filter(|v| v.is_some()).count();
    println!("{} of {} frames voiced", voiced, f0m.params.f0.len());
    for (f, p) in f0m.f_spectra.iter().zip(&f0m.spectrum) {
        match p {
            Some(p) => println!("{:>10.2} Hz  {:.4e}", f, p),
            None => println!("{:>10.2} Hz  -", f),
        }
    }

    Ok(())
}

//! Integration tests for tmst-analysis.
//!
//! Every entry point is exercised end to end on synthetic signals whose
//! modulation content is known: AM tones for the envelope analyses and
//! vibrato (real or replayed through an injected tracker) for the f0 ones.

use std::f64::consts::PI;

use tmst_analysis::{
    F0mAnalyzer, PitchSettings, PitchTrack, PitchTracker, ama_scalogram, ama_scalogram_channel,
    ama_spectrum, ami_spectrum, f0m_scalogram, f0m_spectrum,
};
use tmst_config::{AmConfig, AmiConfig, AuditoryRange, F0mConfig, ModulationRange};
use tmst_core::{Result, Scalogram, TmstError, scalogram_rows, window_count};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sinusoidally amplitude-modulated tone.
fn am_tone(fs: f64, secs: f64, carrier: f64, fm: f64, depth: f64) -> Vec<f64> {
    (0..(fs * secs) as usize)
        .map(|i| {
            let t = i as f64 / fs;
            (1.0 + depth * (2.0 * PI * fm * t).cos()) * (2.0 * PI * carrier * t).sin()
        })
        .collect()
}

/// Harmonic tone whose f0 swings `depth_hz` around `f0` at `rate` Hz.
fn vibrato_tone(fs: f64, secs: f64, f0: f64, depth_hz: f64, rate: f64) -> Vec<f64> {
    (0..(fs * secs) as usize)
        .map(|i| {
            let t = i as f64 / fs;
            let phase = 2.0 * PI * f0 * t - depth_hz / rate * (2.0 * PI * rate * t).cos();
            phase.sin() + 0.5 * (2.0 * phase).sin()
        })
        .collect()
}

fn argmax(values: impl IntoIterator<Item = f64>) -> usize {
    values
        .into_iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
        .unwrap()
}

fn nearest(fc: &[f64], target: f64) -> usize {
    argmax(fc.iter().map(|&f| -(f - target).abs()))
}

/// Tracker that ignores the signal and replays a fixed f0 contour.
struct Replay(Vec<f64>);

impl PitchTracker for Replay {
    fn track(&self, _signal: &[f64], _fs: f64, _settings: &PitchSettings) -> Result<PitchTrack> {
        Ok(PitchTrack {
            log_f0: self.0.iter().map(|f| (f / 440.0).log2()).collect(),
            aperiodicity: vec![0.05; self.0.len()],
        })
    }
}

/// Tracker that always fails.
struct Broken;

impl PitchTracker for Broken {
    fn track(&self, _signal: &[f64], _fs: f64, _settings: &PitchSettings) -> Result<PitchTrack> {
        Err(TmstError::collaborator("pitch tracker", "device lost"))
    }
}

// ===========================================================================
// 1. AM spectrum
// ===========================================================================

#[test]
fn ama_spectrum_peaks_at_modulation_rate() {
    let fs = 8000.0;
    let signal = am_tone(fs, 2.0, 1000.0, 8.0, 1.0);
    let config = AmConfig {
        modulation: ModulationRange::new(4.0, 16.0, 9),
        auditory: AuditoryRange::new(500.0, 2000.0),
    };

    let result = ama_spectrum(&signal, fs, &config).unwrap();
    assert!((result.f_spectra[4] - 8.0).abs() < 1e-9);
    assert_eq!(result.spectrum.len(), 9);
    assert!(result.spectrum.iter().all(|row| row.len() == result.fc.len()));

    let ch = nearest(&result.fc, 1000.0);
    let peak = argmax(result.channel(ch));
    assert!((3..=5).contains(&peak), "peak at bin {peak}");
    assert!(result.spectrum.iter().flatten().all(|&p| p >= 0.0));
}

#[test]
fn ama_spectrum_diagnostics() {
    let fs = 8000.0;
    let signal = am_tone(fs, 0.5, 1000.0, 8.0, 1.0);
    let config = AmConfig {
        modulation: ModulationRange::new(1.0, 10.0, 5),
        auditory: AuditoryRange::new(500.0, 2000.0),
    };
    let result = ama_spectrum(&signal, fs, &config).unwrap();
    let p = &result.params;

    assert_eq!(p.t.len(), signal.len());
    assert!((p.t[0] - 1.0 / fs).abs() < 1e-15);
    assert_eq!(p.aud_bw.len(), result.fc.len());
    assert!((p.aud_bw[0] - (24.7 + result.fc[0] / 9.265)).abs() < 1e-12);
    assert_eq!(p.gamma_responses.len(), result.fc.len());
    assert_eq!(p.envelope.len(), result.fc.len());
    assert!(p.envelope.iter().flatten().all(|&e| e >= 0.0));
    assert_eq!(p.f_spectra, result.f_spectra);
    assert_eq!(p.f_spectra_intervals.len(), 6);
    assert_eq!(p.f_spectra_intervals[0], 1.0);
    assert_eq!(p.f_spectra_intervals[5], 10.0);
}

#[test]
fn ama_spectrum_input_errors() {
    let config = AmConfig {
        auditory: AuditoryRange::new(100.0, 1000.0),
        ..AmConfig::default()
    };
    let signal = vec![0.1; 1000];

    assert!(ama_spectrum(&signal, f64::NAN, &config).unwrap_err().is_invalid_input());
    assert!(ama_spectrum(&signal, f64::INFINITY, &config).unwrap_err().is_invalid_input());
    assert!(ama_spectrum(&signal, 0.0, &config).unwrap_err().is_invalid_range());
    assert!(ama_spectrum(&signal, -8000.0, &config).unwrap_err().is_invalid_range());
    assert!(ama_spectrum(&[], 8000.0, &config).unwrap_err().is_invalid_input());

    let mut bad = signal.clone();
    bad[10] = f64::NAN;
    assert!(ama_spectrum(&bad, 8000.0, &config).unwrap_err().is_invalid_input());
}

#[test]
fn auditory_range_above_nyquist_is_range_error() {
    // Defaults reach 6700 Hz, above Nyquist at 8 kHz.
    let err = ama_spectrum(&vec![0.1; 800], 8000.0, &AmConfig::default()).unwrap_err();
    assert!(err.is_invalid_range());
}

// ===========================================================================
// 2. AM scalogram
// ===========================================================================

#[test]
fn ama_scalogram_is_sum_of_channels() {
    let fs = 4000.0;
    let signal = am_tone(fs, 1.0, 700.0, 6.0, 0.8);
    let config = AmConfig {
        modulation: ModulationRange::new(2.0, 16.0, 4),
        auditory: AuditoryRange::new(300.0, 1200.0),
    };
    let window_nt = 2.0;

    let result = ama_scalogram(&signal, fs, window_nt, &config).unwrap();
    let grid = &result.scalogram;
    assert_eq!(grid.cols(), 4);
    assert_eq!(
        grid.rows(),
        scalogram_rows(signal.len(), fs, &result.f_spectra, window_nt, 0.1, true)
    );

    let mut expected = Scalogram::new(grid.rows(), grid.cols());
    for env in &result.params.envelope {
        expected.merge_sum(&ama_scalogram_channel(env, fs, &result.f_spectra, window_nt, grid.rows()));
    }
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            match (grid.get(row, col), expected.get(row, col)) {
                (None, None) => {}
                (Some(a), Some(b)) => assert!((a - b).abs() <= 1e-12 * b.abs().max(1.0)),
                other => panic!("cell ({row}, {col}) differs: {other:?}"),
            }
        }
    }

    // Windows are centred, so the first row is never written.
    assert!(grid.row(0).iter().all(Option::is_none));
    assert!(grid.filled_count() > 0);
    assert!(grid.filled_count() < grid.rows() * grid.cols());
}

#[test]
fn ama_scalogram_time_axis() {
    let fs = 4000.0;
    let signal = am_tone(fs, 1.0, 700.0, 6.0, 0.8);
    let config = AmConfig {
        modulation: ModulationRange::new(2.0, 16.0, 4),
        auditory: AuditoryRange::new(300.0, 1200.0),
    };
    let result = ama_scalogram(&signal, fs, 3.0, &config).unwrap();
    let t = &result.params.t;
    assert_eq!(t.len(), result.scalogram.rows());
    for (k, &tk) in t.iter().enumerate() {
        assert!((tk - (k + 1) as f64 * 0.1).abs() < 1e-12);
    }
    assert_eq!(result.params.scale, result.f_spectra);
    assert_eq!(result.params.fc.len(), result.params.envelope.len());
}

#[test]
fn ama_scalogram_with_windows_shorter_than_shift() {
    let fs = 4000.0;
    let signal = am_tone(fs, 4250.0 / fs, 700.0, 6.0, 0.8);
    assert_eq!(signal.len(), 4250);
    let config = AmConfig {
        modulation: ModulationRange::new(2.0, 200.0, 10),
        auditory: AuditoryRange::new(300.0, 1200.0),
    };
    let window_nt = 4.0;
    assert!(window_nt / 200.0 < 0.1);

    let result = ama_scalogram(&signal, fs, window_nt, &config).unwrap();
    let grid = &result.scalogram;
    for (col, &f) in result.f_spectra.iter().enumerate() {
        let expected = window_count(signal.len(), fs, window_nt / f, 0.1, true);
        let filled: Vec<usize> = (0..grid.rows()).filter(|&r| grid.get(r, col).is_some()).collect();
        assert_eq!(filled.len(), expected, "column {col} at {f} Hz");
        assert!(filled.iter().all(|&r| r < grid.rows()));
    }
    // 20 ms windows every 100 ms: starts 0.0 .. 1.0 s, none past the end
    assert_eq!(window_count(signal.len(), fs, window_nt / 200.0, 0.1, true), 11);
}

// ===========================================================================
// 3. AM intensity
// ===========================================================================

#[test]
fn ami_spectrum_is_modulation_index() {
    let fs = 8000.0;
    let mut signal = am_tone(fs, 2.0, 1000.0, 8.0, 0.5);
    let ramp = (0.05 * fs) as usize;
    for (i, s) in signal.iter_mut().take(ramp).enumerate() {
        *s *= 0.5 * (1.0 - (PI * i as f64 / ramp as f64).cos());
    }
    let config = AmiConfig {
        modulation: ModulationRange::new(2.0, 32.0, 5),
        auditory: AuditoryRange::new(500.0, 2000.0),
        q_factor: 1.0,
    };

    let result = ami_spectrum(&signal, fs, &config).unwrap();
    assert_eq!(result.mf.len(), 5);
    assert_eq!(result.mf[0], 2.0);
    assert_eq!(result.mf[4], 32.0);
    assert_eq!(result.spectrum.len(), 5);

    for value in result.spectrum.iter().flatten() {
        let v = value.expect("every channel has envelope energy");
        assert!((0.0..=1.2).contains(&v), "index {v}");
    }

    let ch = nearest(&result.fc, 1000.0);
    let column: Vec<f64> = result.spectrum.iter().map(|row| row[ch].unwrap()).collect();
    assert_eq!(argmax(column.iter().copied()), 2);
    assert!((column[2] - 0.5).abs() < 0.15, "8 Hz index {}", column[2]);

    assert_eq!(result.params.am_rms.len(), result.fc.len());
    assert_eq!(result.params.dc.len(), result.fc.len());
}

#[test]
fn ami_rejects_modulation_above_nyquist() {
    let config = AmiConfig {
        modulation: ModulationRange::new(2.0, 600.0, 5),
        auditory: AuditoryRange::new(100.0, 400.0),
        q_factor: 1.0,
    };
    let err = ami_spectrum(&vec![0.1; 1000], 1000.0, &config).unwrap_err();
    assert!(err.is_invalid_range());
}

// ===========================================================================
// 4. f0M spectrum and scalogram
// ===========================================================================

fn f0m_config() -> F0mConfig {
    F0mConfig {
        modulation: ModulationRange::new(1.0, 16.0, 9),
        ..F0mConfig::default()
    }
}

#[test]
fn f0m_spectrum_peaks_at_vibrato_rate_with_replayed_track() {
    let fs = 8000.0;
    let frames = 1600;
    let contour: Vec<f64> = (0..frames)
        .map(|k| 220.0 * (1.0 + 0.04 * (2.0 * PI * 4.0 * k as f64 / 400.0).sin()))
        .collect();
    let analyzer = F0mAnalyzer::with_tracker(f0m_config(), Replay(contour));

    let result = analyzer.spectrum(&vec![0.0; frames * 20], fs).unwrap();
    assert!((result.f_spectra[4] - 4.0).abs() < 1e-9);
    let spectrum: Vec<f64> = result.spectrum.iter().map(|v| v.unwrap()).collect();
    assert_eq!(argmax(spectrum), 4);
    assert!(result.params.f0.iter().all(Option::is_some));
}

#[test]
fn f0m_spectrum_tracks_real_vibrato() {
    let fs = 8000.0;
    let signal = vibrato_tone(fs, 3.0, 200.0, 10.0, 4.0);

    let result = f0m_spectrum(&signal, fs, &f0m_config()).unwrap();
    assert_eq!(result.params.f0.len(), signal.len().div_ceil(20));
    // Frames whose analysis span lies fully inside the signal.
    let interior = &result.params.f0[..1150];
    let voiced: Vec<f64> = interior.iter().flatten().copied().collect();
    assert!(voiced.len() > interior.len() * 9 / 10);
    assert!(voiced.iter().all(|&f| (185.0..=215.0).contains(&f)));

    let spectrum: Vec<f64> = result.spectrum.iter().map(|v| v.unwrap()).collect();
    let peak = argmax(spectrum);
    assert!((3..=5).contains(&peak), "peak at bin {peak}");
}

#[test]
fn f0m_spectrum_of_silence_is_missing() {
    let result = f0m_spectrum(&vec![0.0; 4000], 8000.0, &f0m_config()).unwrap();
    assert!(result.spectrum.iter().all(Option::is_none));
    assert!(result.params.f0.iter().all(Option::is_none));
}

#[test]
fn f0m_scalogram_shapes() {
    let fs = 8000.0;
    let signal = vibrato_tone(fs, 3.0, 200.0, 10.0, 4.0);

    let result = f0m_scalogram(&signal, fs, 2.0, &f0m_config()).unwrap();
    let grid = &result.scalogram;
    assert_eq!(grid.cols(), 9);
    assert_eq!(result.params.t.len(), grid.rows());
    assert_eq!(result.params.t_track.len(), result.params.f0.len());
    assert!((result.params.t_track[0] - 20.0 / fs).abs() < 1e-15);
    assert!(grid.filled_count() > 0);
    assert!(grid.row(0).iter().all(Option::is_none));
    for col in 0..grid.cols() {
        assert!(grid.column(col).iter().flatten().all(|&v| v >= 0.0));
    }
}

#[test]
fn f0m_scalogram_with_windows_shorter_than_shift() {
    let fs = 8000.0;
    let frames = 1600;
    let contour: Vec<f64> = (0..frames)
        .map(|k| 220.0 * (1.0 + 0.04 * (2.0 * PI * 4.0 * k as f64 / 400.0).sin()))
        .collect();
    let config = F0mConfig {
        modulation: ModulationRange::new(1.0, 150.0, 12),
        ..F0mConfig::default()
    };
    let analyzer = F0mAnalyzer::with_tracker(config, Replay(contour));
    let window_nt = 4.0;

    let result = analyzer.scalogram(&vec![0.0; frames * 20], fs, window_nt).unwrap();
    let grid = &result.scalogram;
    let fs_track = fs / 20.0;
    assert_eq!(
        grid.rows(),
        scalogram_rows(frames, fs_track, &result.f_spectra, window_nt, 0.1, false)
    );
    for (col, &f) in result.f_spectra.iter().enumerate() {
        let expected = window_count(frames, fs_track, window_nt / f, 0.1, false);
        let filled: Vec<usize> = (0..grid.rows()).filter(|&r| grid.get(r, col).is_some()).collect();
        assert_eq!(filled.len(), expected, "column {col} at {f} Hz");
        assert!(filled.iter().all(|&r| r < grid.rows()));
    }
}

#[test]
fn tracker_failure_propagates() {
    let analyzer = F0mAnalyzer::with_tracker(f0m_config(), Broken);
    let err = analyzer.spectrum(&vec![0.0; 800], 8000.0).unwrap_err();
    assert!(matches!(err, TmstError::Collaborator { stage: "pitch tracker", .. }));
    assert!(err.to_string().contains("device lost"));

    let err = analyzer.scalogram(&vec![0.0; 800], 8000.0, 2.0).unwrap_err();
    assert!(matches!(err, TmstError::Collaborator { .. }));
}

#[test]
fn f0m_input_errors() {
    let config = f0m_config();
    assert!(f0m_spectrum(&[0.0; 100], f64::NAN, &config).unwrap_err().is_invalid_input());
    assert!(f0m_spectrum(&[0.0; 100], -1.0, &config).unwrap_err().is_invalid_range());
    assert!(f0m_scalogram(&[0.0; 100], 8000.0, -2.0, &config).unwrap_err().is_invalid_range());

    let inverted = F0mConfig {
        fmin: 600.0,
        fmax: 100.0,
        ..config
    };
    assert!(f0m_spectrum(&[0.0; 100], 8000.0, &inverted).unwrap_err().is_invalid_range());
}

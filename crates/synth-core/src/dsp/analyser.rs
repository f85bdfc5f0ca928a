use crate::config::AnalyserSettings;
use crate::error::Result;
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::TAU;
use std::sync::Arc;

/// Byte magnitudes, one per bin (half the analysis window).
pub type SpectrumFrame = Vec<u8>;

pub struct Analyser {
    settings: AnalyserSettings,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    history: Vec<f32>, // ring buffer of the last fft_size samples
    write_pos: usize,
    scratch: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
}

impl Analyser {
    pub fn new(settings: AnalyserSettings) -> Result<Self> {
        settings.validate()?;
        let n = settings.fft_size;
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(n);
        Ok(Self {
            settings,
            fft,
            window: (0..n).map(|i| blackman_window(i, n)).collect(),
            history: vec![0.0; n],
            write_pos: 0,
            scratch: vec![Complex::new(0.0, 0.0); n],
            smoothed: vec![0.0; settings.bin_count()],
        })
    }

    pub fn bin_count(&self) -> usize {
        self.settings.bin_count()
    }

    /// Feed rendered samples; only the newest `fft_size` are kept.
    pub fn push(&mut self, samples: &[f32]) {
        let n = self.history.len();
        for &s in samples {
            self.history[self.write_pos] = s;
            self.write_pos = (self.write_pos + 1) % n;
        }
    }

    /// Analyse the current window and return smoothed byte magnitudes.
    ///
    /// Each call folds the latest magnitudes into the running smoothing state,
    /// so the caller should query once per display frame.
    pub fn byte_frequency_data(&mut self) -> SpectrumFrame {
        let n = self.history.len();
        for i in 0..n {
            let s = self.history[(self.write_pos + i) % n];
            self.scratch[i] = Complex::new(s * self.window[i], 0.0);
        }
        self.fft.process(&mut self.scratch);

        let tau = self.settings.smoothing;
        let scale = 1.0 / n as f32;
        let AnalyserSettings {
            min_decibels,
            max_decibels,
            ..
        } = self.settings;
        let range = max_decibels - min_decibels;

        self.smoothed
            .iter_mut()
            .zip(self.scratch.iter())
            .map(|(smoothed, bin)| {
                let magnitude = bin.norm() * scale;
                *smoothed = tau * *smoothed + (1.0 - tau) * magnitude;
                magnitude_to_byte(*smoothed, min_decibels, range)
            })
            .collect()
    }

    pub fn reset(&mut self) {
        self.history.fill(0.0);
        self.smoothed.fill(0.0);
        self.write_pos = 0;
    }
}

#[inline]
fn magnitude_to_byte(magnitude: f32, min_decibels: f32, range: f32) -> u8 {
    if magnitude <= 0.0 {
        return 0;
    }
    let db = 20.0 * magnitude.log10();
    let scaled = 255.0 * (db - min_decibels) / range;
    scaled.floor().clamp(0.0, 255.0) as u8
}

/// Classic Blackman window (alpha = 0.16).
pub fn blackman_window(index: usize, size: usize) -> f32 {
    let x = index as f32 / size as f32;
    0.42 - 0.5 * (TAU * x).cos() + 0.08 * (2.0 * TAU * x).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    // quiet enough that neighbouring bins stay below the 255 ceiling
    fn tone(freq: f32, sr: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| 0.01 * (TAU * freq * i as f32 / sr).sin())
            .collect()
    }

    #[test]
    fn silence_reads_as_zero() {
        let mut a = Analyser::new(AnalyserSettings::default()).expect("valid settings");
        let frame = a.byte_frequency_data();
        assert_eq!(frame.len(), 256);
        assert!(frame.iter().all(|&b| b == 0));
    }

    #[test]
    fn tone_peaks_in_matching_bin() {
        let settings = AnalyserSettings {
            smoothing: 0.0,
            ..AnalyserSettings::default()
        };
        let sr = 512.0 * 100.0; // 100 Hz per bin
        let mut a = Analyser::new(settings).expect("valid settings");
        a.push(&tone(2000.0, sr, 2048));
        let frame = a.byte_frequency_data();
        let max = frame.iter().copied().max();
        assert_eq!(max, Some(frame[20]));
        assert!(frame[20] > frame[19] && frame[20] > frame[21]);
        assert!(frame[20] > 150);
    }

    #[test]
    fn smoothing_lags_behind_sudden_silence() {
        let sr = 51_200.0;
        let mut a = Analyser::new(AnalyserSettings::default()).expect("valid settings");
        a.push(&tone(2000.0, sr, 512));
        for _ in 0..30 {
            a.byte_frequency_data();
        }
        let loud = a.byte_frequency_data()[20];
        a.push(&vec![0.0; 512]);
        let decaying = a.byte_frequency_data()[20];
        assert!(decaying > 0 && decaying < loud);
    }

    #[test]
    fn blackman_is_zero_at_edge_and_one_at_center() {
        assert!(blackman_window(0, 512).abs() < 1e-6);
        assert!((blackman_window(256, 512) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_zero_sized_window() {
        let settings = AnalyserSettings {
            fft_size: 0,
            ..AnalyserSettings::default()
        };
        assert!(Analyser::new(settings).is_err());
    }
}

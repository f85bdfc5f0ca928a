use crate::state::Waveform;
use std::f32::consts::TAU;

#[derive(Clone, Debug)]
pub struct Oscillator {
    waveform: Waveform,
    frequency_hz: f32,
    detune_cents: f32,
    sample_rate: f32,
    phase: f32, // 0..1
    inc: f32,   // cycles per sample, negative runs backwards
}

impl Oscillator {
    pub fn new(sample_rate: f32) -> Self {
        let mut osc = Self {
            waveform: Waveform::Sine,
            frequency_hz: 440.0,
            detune_cents: 0.0,
            sample_rate,
            phase: 0.0,
            inc: 0.0,
        };
        osc.update_increment();
        osc
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    /// Retune immediately; the next sample uses the new pitch.
    pub fn set_pitch(&mut self, frequency_hz: f32, detune_cents: f32) {
        self.frequency_hz = frequency_hz;
        self.detune_cents = detune_cents;
        self.update_increment();
    }

    /// Frequency after detune, limited to +/- Nyquist.
    pub fn effective_frequency(&self) -> f32 {
        let nyquist = self.sample_rate * 0.5;
        let f = self.frequency_hz * 2.0_f32.powf(self.detune_cents / 1200.0);
        if f.is_finite() {
            f.clamp(-nyquist, nyquist)
        } else {
            0.0
        }
    }

    fn update_increment(&mut self) {
        self.inc = self.effective_frequency() / self.sample_rate;
    }

    pub fn next_sample(&mut self) -> f32 {
        let dt = self.inc.abs();
        let p = self.phase;
        let sample = match self.waveform {
            Waveform::Sine => (TAU * p).sin(),
            Waveform::Saw => (2.0 * p - 1.0) - poly_blep(p, dt),
            Waveform::Square => {
                let naive = if p < 0.5 { 1.0 } else { -1.0 };
                naive + poly_blep(p, dt) - poly_blep((p + 0.5).fract(), dt)
            }
            Waveform::Triangle => 1.0 - 4.0 * (p - 0.5).abs(),
        };
        let next = (self.phase + self.inc).rem_euclid(1.0);
        // rem_euclid of a tiny negative value rounds up to exactly 1.0
        self.phase = if next >= 1.0 { 0.0 } else { next };
        sample
    }

    pub fn fill(&mut self, out: &mut [f32]) {
        for s in out.iter_mut() {
            *s = self.next_sample();
        }
    }
}

/// Polynomial band-limited step correction around the phase wrap.
#[inline]
fn poly_blep(t: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        0.0
    } else if t < dt {
        let t = t / dt;
        2.0 * t - t * t - 1.0
    } else if t > 1.0 - dt {
        let t = (t - 1.0) / dt;
        t * t + 2.0 * t + 1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detune_shifts_by_octaves() {
        let mut osc = Oscillator::new(48_000.0);
        osc.set_pitch(500.0, 1200.0);
        assert!((osc.effective_frequency() - 1000.0).abs() < 1e-2);
        osc.set_pitch(500.0, -2400.0);
        assert!((osc.effective_frequency() - 125.0).abs() < 1e-3);
    }

    #[test]
    fn effective_frequency_is_limited_to_nyquist() {
        let mut osc = Oscillator::new(48_000.0);
        osc.set_pitch(1000.0, 4800.0); // 16 kHz, fine
        assert!((osc.effective_frequency() - 16_000.0).abs() < 1.0);
        osc.set_pitch(5000.0, 4800.0); // 80 kHz, limited
        assert_eq!(osc.effective_frequency(), 24_000.0);
        osc.set_pitch(-5000.0, 4800.0);
        assert_eq!(osc.effective_frequency(), -24_000.0);
    }

    #[test]
    fn output_stays_bounded_for_every_waveform() {
        for w in Waveform::CYCLE {
            let mut osc = Oscillator::new(44_100.0);
            osc.set_waveform(w);
            osc.set_pitch(440.0, 0.0);
            for _ in 0..4096 {
                let s = osc.next_sample();
                assert!(s.abs() <= 1.01, "{w:?} produced {s}");
            }
        }
    }

    #[test]
    fn negative_frequency_keeps_phase_in_range() {
        let mut osc = Oscillator::new(44_100.0);
        osc.set_pitch(-300.0, 0.0);
        for _ in 0..1000 {
            osc.next_sample();
            assert!((0.0..1.0).contains(&osc.phase));
        }
    }
}

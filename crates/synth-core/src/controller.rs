use crate::config::SynthConfig;
use crate::constants::{SURFACE_FILL_ALPHA, SURFACE_FILL_RGB};
use crate::engine::{lock_engine, SharedEngine, SynthEngine};
use crate::error::Result;
use crate::input::{InputCapability, PointerEvent, PointerPhase, Region};
use crate::layout::{Layout, LayoutInput, Rect};
use crate::lifecycle::{PlaybackLifecycle, PlaybackState};
use crate::mapping::map_pointer;
use crate::spectrum::{SpectrumVisualizer, TracePath};
use crate::state::{ControlState, SynthParameters, Waveform};
use crate::waves::{DecorativeWaveGenerator, WavePath};
use glam::Vec2;
use std::time::Duration;

/// Which waveform icon is lit, and where the icon strip sits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveformIndicator {
    pub active: Waveform,
    pub placement: Rect,
}

impl WaveformIndicator {
    pub fn class_name(&self) -> &'static str {
        self.active.class_name()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

/// Everything the renderer needs for one frame, borrowed from the controller.
pub struct SceneView<'a> {
    pub surface: Circle,
    pub surface_fill: [f32; 4],
    pub traces: &'a [TracePath],
    pub waves: &'a [WavePath],
    pub indicator: WaveformIndicator,
}

pub struct SynthController {
    control: ControlState,
    engine: SharedEngine,
    spectrum: SpectrumVisualizer,
    waves: DecorativeWaveGenerator,
    lifecycle: PlaybackLifecycle,
    capability: InputCapability,
    layout_input: LayoutInput,
    layout: Layout,
    focused: bool,
    pad_active: bool,
    elapsed: f64, // seconds
}

impl SynthController {
    pub fn new(config: &SynthConfig, capability: InputCapability) -> Result<Self> {
        let engine = SynthEngine::new(config)?.shared();
        Ok(Self::with_engine(engine, capability))
    }

    /// Drive an existing engine; the control state starts from its parameters.
    pub fn with_engine(engine: SharedEngine, capability: InputCapability) -> Self {
        let params = lock_engine(&engine).params();
        log::info!(
            "[synth] init {:?} {:.0} Hz {:+.0} ct, input via {}/{}",
            params.waveform,
            params.frequency_hz,
            params.detune_cents,
            capability.start,
            capability.end
        );
        Self {
            control: ControlState {
                params,
                ..ControlState::default()
            },
            engine,
            spectrum: SpectrumVisualizer::new(),
            waves: DecorativeWaveGenerator::new(),
            lifecycle: PlaybackLifecycle::new(),
            capability,
            layout_input: LayoutInput::default(),
            layout: Layout::default(),
            focused: false,
            pad_active: false,
            elapsed: 0.0,
        }
    }

    pub fn engine(&self) -> SharedEngine {
        SharedEngine::clone(&self.engine)
    }

    pub fn control(&self) -> ControlState {
        self.control
    }

    pub fn params(&self) -> SynthParameters {
        self.control.params
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.lifecycle.state()
    }

    pub fn capability(&self) -> InputCapability {
        self.capability
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_pad_active(&self) -> bool {
        self.pad_active
    }

    pub fn elapsed_sec(&self) -> f32 {
        self.elapsed as f32
    }

    pub fn spectrum(&self) -> &SpectrumVisualizer {
        &self.spectrum
    }

    pub fn waves(&self) -> &DecorativeWaveGenerator {
        &self.waves
    }

    pub fn indicator(&self) -> WaveformIndicator {
        WaveformIndicator {
            active: self.control.params.waveform,
            placement: self.layout.indicator,
        }
    }

    pub fn resize(&mut self, input: LayoutInput) {
        self.layout_input = input;
        self.relayout();
        self.waves.invalidate();
    }

    fn relayout(&mut self) {
        self.layout = Layout::compute(&self.layout_input);
        if self.spectrum.is_built() {
            self.spectrum.relayout(&self.layout);
        }
    }

    /// Become the active mode: build paths on first use and start playing.
    pub fn focus(&mut self) {
        self.relayout();
        if !self.spectrum.is_built() {
            self.spectrum.build(&self.layout);
            self.elapsed = 0.0;
        }
        self.focused = true;
        let mut engine = lock_engine(&self.engine);
        self.lifecycle.focus(&mut *engine);
    }

    /// Leave the mode. The engine is disconnected before this returns.
    pub fn unfocus(&mut self) {
        self.focused = false;
        self.pad_active = false;
        let mut engine = lock_engine(&self.engine);
        self.lifecycle.unfocus(&mut *engine);
    }

    pub fn toggle_power(&mut self) -> PlaybackState {
        let mut engine = lock_engine(&self.engine);
        self.lifecycle.toggle(&mut *engine)
    }

    pub fn cycle_waveform(&mut self) -> Waveform {
        self.control = self.control.with_next_waveform();
        lock_engine(&self.engine).configure(&self.control.params);
        log::info!(
            "[synth] waveform -> {}",
            self.control.params.waveform.class_name()
        );
        self.control.params.waveform
    }

    pub fn handle_named(&mut self, event_name: &str, region: Region, position: Vec2) -> bool {
        match self.capability.phase_for(event_name) {
            Some(phase) => self.handle_pointer(PointerEvent {
                phase,
                region,
                position,
            }),
            None => false,
        }
    }

    /// Apply one pointer event. Returns whether it changed anything.
    ///
    /// Any release lets go of the pad, wherever it lands.
    pub fn handle_pointer(&mut self, ev: PointerEvent) -> bool {
        if !self.focused {
            return false;
        }
        match (ev.region, ev.phase) {
            (Region::Activation, PointerPhase::End) => {
                self.pad_active = false;
                self.cycle_waveform();
                true
            }
            (Region::FrequencyPad, PointerPhase::Start) => {
                self.pad_active = true;
                self.apply_pointer(ev.position)
            }
            (Region::FrequencyPad, PointerPhase::Move) if self.pad_active => {
                self.apply_pointer(ev.position)
            }
            (_, PointerPhase::End) => std::mem::replace(&mut self.pad_active, false),
            _ => false,
        }
    }

    fn apply_pointer(&mut self, position: Vec2) -> bool {
        let Some(sample) = self.layout.surface.pointer_sample(position) else {
            log::trace!("[synth] pointer ignored, surface has no size");
            return false;
        };
        let mapped = map_pointer(sample);
        self.control = self.control.with_mapped(&mapped);
        lock_engine(&self.engine).configure(&self.control.params);
        true
    }

    /// Advance one display frame. Returns `true` when geometry changed.
    pub fn frame(&mut self, delta: Duration) -> bool {
        if !self.lifecycle.state().is_playing() {
            return false;
        }
        if !self.layout.is_ready() {
            log::trace!("[synth] frame skipped, no layout yet");
            return false;
        }
        self.elapsed += delta.as_secs_f64();

        let frame = lock_engine(&self.engine).spectrum();
        if let Some(frame) = frame {
            self.spectrum.update(&frame);
        }
        self.waves
            .update(&self.control, self.layout.viewport, self.elapsed_sec());
        true
    }

    pub fn scene(&self) -> SceneView<'_> {
        let [r, g, b] = SURFACE_FILL_RGB;
        SceneView {
            surface: Circle {
                center: self.layout.surface.center(),
                radius: self.layout.surface.radius(),
            },
            surface_fill: [r, g, b, SURFACE_FILL_ALPHA],
            traces: self.spectrum.traces(),
            waves: self.waves.layers(),
            indicator: self.indicator(),
        }
    }
}

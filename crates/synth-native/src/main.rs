use clap::Parser;
use glam::Vec2;
use std::time::Instant;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, MouseButton, TouchPhase, WindowEvent};
use winit::event_loop::{EventLoop, EventLoopWindowTarget};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use synth_core::constants::DEFAULT_SAMPLE_RATE_HZ;
use synth_core::{InputCapability, LayoutInput, SynthController};

mod anchors;
mod audio;
mod cli;
mod render;
mod tessellate;

use audio::{AudioOutput, OutputDevice};
use render::GpuState;

/// Raw pointer event names as the host produces them; the controller keeps
/// only those that belong to the capability picked at startup.
const MOUSE: InputCapability = InputCapability::MOUSE;
const TOUCH: InputCapability = InputCapability::TOUCH;

struct App<'w> {
    controller: SynthController,
    gpu: GpuState<'w>,
    audio: AudioOutput,
    anchors: LayoutInput,
    cursor: Vec2,
    last_frame: Instant,
}

impl<'w> App<'w> {
    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.gpu.resize(size);
        self.anchors = anchors::layout_for(size.width as f32, size.height as f32);
        self.controller.resize(self.anchors);
    }

    fn pointer(&mut self, event_name: &str, position: Vec2) {
        let Some(phase) = self.controller.capability().phase_for(event_name) else {
            return;
        };
        let pad_active = self.controller.is_pad_active();
        if let Some(region) = anchors::route(&self.anchors, phase, position, pad_active) {
            self.controller.handle_named(event_name, region, position);
        }
    }

    fn key(&mut self, key: &Key) {
        match key {
            Key::Named(NamedKey::Space) => {
                let state = self.controller.toggle_power();
                log::info!("[synth] power {:?}", state);
            }
            Key::Character(c) if c.eq_ignore_ascii_case("w") => {
                self.controller.cycle_waveform();
            }
            _ => {}
        }
    }

    fn window_event(&mut self, event: WindowEvent, elwt: &EventLoopWindowTarget<()>) {
        match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::Focused(true) => self.controller.focus(),
            WindowEvent::Focused(false) => self.controller.unfocus(),
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                self.pointer(MOUSE.motion, self.cursor);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let name = match state {
                    ElementState::Pressed => MOUSE.start,
                    ElementState::Released => MOUSE.end,
                };
                self.pointer(name, self.cursor);
            }
            WindowEvent::Touch(touch) => {
                let name = match touch.phase {
                    TouchPhase::Started => TOUCH.start,
                    TouchPhase::Moved => TOUCH.motion,
                    TouchPhase::Ended | TouchPhase::Cancelled => TOUCH.end,
                };
                let at = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                self.pointer(name, at);
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                if event.logical_key == Key::Named(NamedKey::Escape) {
                    elwt.exit();
                } else {
                    self.key(&event.logical_key);
                }
            }
            _ => {}
        }
    }

    fn frame(&mut self, elwt: &EventLoopWindowTarget<()>) {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;

        self.audio.advance(dt);
        self.controller.frame(dt);
        match self.gpu.render(&self.controller.scene()) {
            Ok(()) => self.gpu.window.request_redraw(),
            Err(wgpu::SurfaceError::Lost) => self.resize(self.gpu.window.inner_size()),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[gpu] out of memory");
                elwt.exit();
            }
            Err(e) => log::trace!("[gpu] frame dropped: {e}"),
        }
    }
}

fn init_logging(args: &cli::Args) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = args.log_level {
        builder.filter_level(level);
    }
    builder.init();
}

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    init_logging(&args);

    let device = match OutputDevice::open_default() {
        Ok(device) => Some(device),
        Err(e) => {
            log::warn!("[audio] {e}");
            None
        }
    };
    let sample_rate = device
        .as_ref()
        .map_or(DEFAULT_SAMPLE_RATE_HZ, OutputDevice::sample_rate);
    let config = args.synth_config(sample_rate)?;
    let controller = SynthController::new(&config, args.capability())?;
    let audio = AudioOutput::start(device, controller.engine(), args.output_gain());

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Synth")
        .with_inner_size(PhysicalSize::new(args.width, args.height))
        .build(&event_loop)?;
    let gpu = pollster::block_on(GpuState::new(&window))?;

    let mut app = App {
        controller,
        gpu,
        audio,
        anchors: LayoutInput::default(),
        cursor: Vec2::ZERO,
        last_frame: Instant::now(),
    };
    app.resize(window.inner_size());
    app.controller.focus();
    log::info!("[synth] space toggles power, W cycles the waveform");

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => app.window_event(event, elwt),
        Event::AboutToWait => app.frame(elwt),
        _ => {}
    })?;
    Ok(())
}

use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputDevice {
    Mouse,
    Touch,
}

/// Event names for the pointer device picked at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputCapability {
    pub device: InputDevice,
    pub start: &'static str,
    pub end: &'static str,
    pub motion: &'static str,
}

impl InputCapability {
    pub const MOUSE: Self = Self {
        device: InputDevice::Mouse,
        start: "mousedown",
        end: "mouseup",
        motion: "mousemove",
    };

    pub const TOUCH: Self = Self {
        device: InputDevice::Touch,
        start: "touchstart",
        end: "touchend",
        motion: "touchmove",
    };

    /// Resolve once from the host's touch support.
    pub fn detect(has_touch: bool) -> Self {
        if has_touch {
            Self::TOUCH
        } else {
            Self::MOUSE
        }
    }

    /// Phase for a raw event name, if it belongs to this device.
    pub fn phase_for(&self, event_name: &str) -> Option<PointerPhase> {
        match event_name {
            n if n == self.start => Some(PointerPhase::Start),
            n if n == self.end => Some(PointerPhase::End),
            n if n == self.motion => Some(PointerPhase::Move),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Start,
    Move,
    End,
}

/// The two interactive areas of the control surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    /// Waveform button; a release cycles the waveform.
    Activation,
    /// Frequency pad; tracks the pointer while pressed.
    FrequencyPad,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub region: Region,
    /// Page coordinates in pixels.
    pub position: Vec2,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, region: Region, x: f32, y: f32) -> Self {
        Self {
            phase,
            region,
            position: Vec2::new(x, y),
        }
    }
}

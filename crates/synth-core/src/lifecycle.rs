#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
}

impl PlaybackState {
    pub fn is_playing(self) -> bool {
        self == PlaybackState::Playing
    }

    fn toggled(self) -> Self {
        match self {
            PlaybackState::Stopped => PlaybackState::Playing,
            PlaybackState::Playing => PlaybackState::Stopped,
        }
    }
}

/// Whatever connects the synth to the audible destination.
pub trait PlaybackSink {
    fn set_playing(&mut self, playing: bool);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PlaybackLifecycle {
    state: PlaybackState,
}

impl PlaybackLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Power button: flip between stopped and playing.
    pub fn toggle(&mut self, sink: &mut dyn PlaybackSink) -> PlaybackState {
        self.apply(self.state.toggled(), sink)
    }

    /// Gaining focus always starts playback.
    pub fn focus(&mut self, sink: &mut dyn PlaybackSink) -> PlaybackState {
        self.apply(PlaybackState::Playing, sink)
    }

    /// Losing focus always stops playback, whatever was toggled before.
    pub fn unfocus(&mut self, sink: &mut dyn PlaybackSink) -> PlaybackState {
        self.apply(PlaybackState::Stopped, sink)
    }

    fn apply(&mut self, next: PlaybackState, sink: &mut dyn PlaybackSink) -> PlaybackState {
        sink.set_playing(next.is_playing());
        if next != self.state {
            log::info!("[lifecycle] {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        next
    }
}

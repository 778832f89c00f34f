//! Audible start/stop cues
//!
//! Cues are fire-and-forget: the UI loop pushes them into a channel and
//! never waits. The player task plays each cue on its own short-lived
//! thread so overlapping cues do not delay each other.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info};

/// Which transition a cue announces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Start,
    Stop,
}

impl Cue {
    /// Tone pitch, higher for start
    pub fn frequency_hz(self) -> f32 {
        match self {
            Cue::Start => 600.0,
            Cue::Stop => 300.0,
        }
    }

    /// Tone length, longer for stop
    pub fn duration(self) -> Duration {
        match self {
            Cue::Start => Duration::from_millis(150),
            Cue::Stop => Duration::from_millis(300),
        }
    }
}

/// Sender handle for queueing cues
pub type CueSender = mpsc::UnboundedSender<Cue>;

/// Create a new cue channel
pub fn cue_channel() -> (CueSender, mpsc::UnboundedReceiver<Cue>) {
    mpsc::unbounded_channel()
}

/// Background task that turns cues into tones
pub struct CuePlayer {
    cue_rx: mpsc::UnboundedReceiver<Cue>,
    muted: bool,
}

impl CuePlayer {
    pub fn new(cue_rx: mpsc::UnboundedReceiver<Cue>, muted: bool) -> Self {
        Self { cue_rx, muted }
    }

    /// Play cues until every sender is dropped
    pub async fn run(mut self) {
        if self.muted {
            info!("Audible cues muted");
        } else if !cfg!(feature = "audio") {
            info!("Built without the audio feature, cues are silent");
        }

        while let Some(cue) = self.cue_rx.recv().await {
            if self.muted {
                debug!("Skipping {:?} cue", cue);
                continue;
            }
            play(cue);
        }
    }
}

#[cfg(feature = "audio")]
fn play(cue: Cue) {
    std::thread::spawn(move || {
        use rodio::{
            source::{SineWave, Source},
            OutputStream, Sink,
        };

        let Ok((_stream, stream_handle)) = OutputStream::try_default() else {
            debug!("No audio output device for {:?} cue", cue);
            return;
        };
        let Ok(sink) = Sink::try_new(&stream_handle) else {
            return;
        };

        sink.append(
            SineWave::new(cue.frequency_hz())
                .take_duration(cue.duration())
                .amplify(0.25),
        );
        sink.sleep_until_end();
    });
}

#[cfg(not(feature = "audio"))]
fn play(cue: Cue) {
    debug!("{:?} cue ({} Hz, {:?})", cue, cue.frequency_hz(), cue.duration());
}

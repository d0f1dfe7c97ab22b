//! Terminal bell as the sound-effect backend.

use std::io::{self, Write};

use crate::core::AudioSink;
use crate::types::SoundCue;

const BEL: u8 = 0x07;

/// Number of bells for a cue.
pub fn bell_count(cue: SoundCue) -> usize {
    match cue {
        SoundCue::ButtonClick => 0,
        SoundCue::LineClear | SoundCue::GameOver => 1,
        SoundCue::TetrisClear => 2,
        SoundCue::NewHighScore => 3,
    }
}

pub struct BellAudio<W: Write = io::Stdout> {
    out: W,
    muted: bool,
}

impl BellAudio<io::Stdout> {
    pub fn new(muted: bool) -> Self {
        Self::with_writer(io::stdout(), muted)
    }
}

impl<W: Write> BellAudio<W> {
    pub fn with_writer(out: W, muted: bool) -> Self {
        Self { out, muted }
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn writer(&self) -> &W {
        &self.out
    }
}

impl<W: Write> AudioSink for BellAudio<W> {
    fn play(&mut self, cue: SoundCue) {
        if self.muted {
            return;
        }
        let n = bell_count(cue);
        if n == 0 {
            return;
        }
        // Fire and forget: a failed bell is not worth surfacing.
        let bells = [BEL; 3];
        let _ = self.out.write_all(&bells[..n]);
        let _ = self.out.flush();
    }
}

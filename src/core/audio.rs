//! # Audio
//!
//! Speech and answer cues go through the [`AudioSink`] port. Playback is
//! fire-and-forget: nothing waits on it and failures only reach the log.
//!
//! [`CommandAudio`] shells out to whatever is installed (`espeak-ng`, `say`,
//! `paplay ...`). The word to pronounce is appended as the last argument.

use std::process::{Command, Stdio};
use std::thread;

use log::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sound {
    /// Pronounce a vocabulary word.
    Word(String),
    Correct,
    Incorrect,
}

pub trait AudioSink: Send + Sync {
    fn play(&self, sound: Sound);
}

/// Silence. Used for `--mute` and batch commands.
pub struct NoopAudio;

impl AudioSink for NoopAudio {
    fn play(&self, _sound: Sound) {}
}

/// A program plus its fixed leading arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Splits a command line on whitespace. Returns `None` for blank input.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    fn spawn(&self, extra_arg: Option<&str>) {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if let Some(arg) = extra_arg {
            command.arg(arg);
        }

        match command.spawn() {
            Ok(mut child) => {
                debug!("Spawned audio command {} (pid {})", self.program, child.id());
                // Reap in the background so finished players don't linger as zombies.
                thread::spawn(move || {
                    let _ = child.wait();
                });
            }
            Err(e) => warn!("Failed to run audio command {}: {}", self.program, e),
        }
    }
}

pub struct CommandAudio {
    speech: Option<CommandSpec>,
    correct: Option<CommandSpec>,
    incorrect: Option<CommandSpec>,
}

impl CommandAudio {
    pub fn new(
        speech: Option<CommandSpec>,
        correct: Option<CommandSpec>,
        incorrect: Option<CommandSpec>,
    ) -> Self {
        Self {
            speech,
            correct,
            incorrect,
        }
    }
}

impl AudioSink for CommandAudio {
    fn play(&self, sound: Sound) {
        match sound {
            Sound::Word(word) => {
                if let Some(spec) = &self.speech {
                    spec.spawn(Some(&word));
                }
            }
            Sound::Correct => {
                if let Some(spec) = &self.correct {
                    spec.spawn(None);
                }
            }
            Sound::Incorrect => {
                if let Some(spec) = &self.incorrect {
                    spec.spawn(None);
                }
            }
        }
    }
}

use super::types::*;
use crate::config;
use crate::error::{Result, TsError};
use log::debug;
use parking_lot::Mutex;
use std::sync::Arc;

/// A track shared between threads. Hold the lock for a whole packetize call.
pub type SharedTrack = Arc<Mutex<Track>>;

/// One elementary stream: its PID, stream type and running continuity counter.
///
/// The stored counter is the one carried by the last emitted packet. A new
/// track starts at 15 so its first packet carries 0.
#[derive(Debug, Clone)]
pub struct Track {
    pid: Pid,
    stream_type: StreamType,
    continuity_counter: ContinuityCounter,
}

impl Track {
    pub fn new(pid: Pid, stream_type: StreamType) -> Self {
        Self {
            pid,
            stream_type,
            continuity_counter: ContinuityCounter::default().prev(),
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn stream_type(&self) -> StreamType {
        self.stream_type
    }

    pub fn continuity_counter(&self) -> ContinuityCounter {
        self.continuity_counter
    }

    /// Stores `value % 16`.
    pub fn set_continuity_counter(&mut self, value: u8) {
        self.continuity_counter = ContinuityCounter::new(value);
    }

    /// Advances the counter and returns the new value.
    pub(crate) fn next_continuity_counter(&mut self) -> ContinuityCounter {
        self.continuity_counter = self.continuity_counter.next();
        self.continuity_counter
    }
}

/// Assigns PIDs to new tracks and owns them.
#[derive(Debug)]
pub struct TrackRegistry {
    next_pid: u16,
    tracks: Vec<SharedTrack>,
}

impl TrackRegistry {
    pub fn new(first_pid: Pid) -> Self {
        Self {
            next_pid: first_pid.value(),
            tracks: Vec::new(),
        }
    }

    /// Registry starting at the configured `first_elementary_pid`
    pub fn from_config() -> Self {
        Self::new(config::current().first_elementary_pid)
    }

    /// Creates a track on the next free PID.
    ///
    /// Fails with `InvalidPid` once the PIDs below the null PID run out.
    pub fn add_track(&mut self, stream_type: StreamType) -> Result<SharedTrack> {
        let pid = Pid::new(self.next_pid)?;
        if pid.is_null() {
            return Err(TsError::InvalidPid(pid.value()));
        }
        self.next_pid += 1;

        debug!("registered track pid={} stream_type={:?}", pid, stream_type);
        let track = Arc::new(Mutex::new(Track::new(pid, stream_type)));
        self.tracks.push(Arc::clone(&track));
        Ok(track)
    }

    pub fn get(&self, pid: Pid) -> Option<SharedTrack> {
        self.tracks.iter().find(|t| t.lock().pid() == pid).cloned()
    }

    pub fn tracks(&self) -> &[SharedTrack] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

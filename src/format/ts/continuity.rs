use super::header::TSHeader;
use super::types::*;
use std::collections::HashMap;

/// Outcome of checking one packet's continuity counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinuityCheckResult {
    /// In sequence
    Ok,
    /// Same counter as the previous payload packet (retransmission)
    Duplicate,
    /// Packets were lost or reordered
    Gap {
        expected: ContinuityCounter,
        found: ContinuityCounter,
    },
}

/// Validates continuity counters for a single PID (H.222.0 2.4.3.3).
///
/// The counter only advances on packets carrying payload. One repeat of a
/// payload packet is a duplicate; a second repeat is a gap.
#[derive(Debug, Default)]
pub struct ContinuityChecker {
    last: Option<ContinuityCounter>,
    duplicate_seen: bool,
}

impl ContinuityChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, header: &TSHeader) -> ContinuityCheckResult {
        let found = header.continuity_counter;
        let last = match self.last {
            Some(last) => last,
            None => {
                if header.adaptation_mode.has_payload() {
                    self.last = Some(found);
                }
                return ContinuityCheckResult::Ok;
            }
        };

        if !header.adaptation_mode.has_payload() {
            return if found == last {
                ContinuityCheckResult::Ok
            } else {
                ContinuityCheckResult::Gap {
                    expected: last,
                    found,
                }
            };
        }

        if found == last && !self.duplicate_seen {
            self.duplicate_seen = true;
            return ContinuityCheckResult::Duplicate;
        }

        let expected = last.next();
        self.last = Some(found);
        self.duplicate_seen = false;

        if found == expected {
            ContinuityCheckResult::Ok
        } else {
            ContinuityCheckResult::Gap { expected, found }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// One [`ContinuityChecker`] per PID
#[derive(Debug, Default)]
pub struct ContinuityTracker {
    checkers: HashMap<Pid, ContinuityChecker>,
}

impl ContinuityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, header: &TSHeader) -> ContinuityCheckResult {
        self.checkers.entry(header.pid).or_default().check(header)
    }

    pub fn reset(&mut self) {
        self.checkers.clear();
    }
}

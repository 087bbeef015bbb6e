//! Logical clock types.

use indexmap::IndexMap;
use rand::Rng;
use std::cmp::Ordering;
use std::fmt;

/// Sessions below this one are reserved; authoring clocks start here.
pub const MIN_SESSION_ID: u64 = 1 << 16;

/// A random authoring session in `MIN_SESSION_ID..=i64::MAX`.
pub fn random_session_id() -> u64 {
    rand::thread_rng().gen_range(MIN_SESSION_ID..=i64::MAX as u64)
}

/// An immutable logical timestamp: `(session_id, logical_time)`.
///
/// Every node of a [`Model`](crate::Model) is identified by the timestamp of
/// the operation that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ts {
    pub sid: u64,
    pub time: u64,
}

impl Ts {
    pub const fn new(sid: u64, time: u64) -> Self {
        Self { sid, time }
    }
}

impl Ord for Ts {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.sid.cmp(&other.sid))
    }
}

impl PartialOrd for Ts {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Ts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.sid, self.time)
    }
}

/// Compare two timestamps (time first, then session ID).
/// Returns `1`, `0`, or `-1`.
#[inline]
pub fn compare(a: Ts, b: Ts) -> i8 {
    match a.cmp(&b) {
        Ordering::Greater => 1,
        Ordering::Equal => 0,
        Ordering::Less => -1,
    }
}

/// Local logical clock plus the highest time observed for every peer session.
///
/// `time` is the next time the local session will hand out; time `0` is
/// never handed out so that it can serve as the "unset" sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockVector {
    pub sid: u64,
    pub time: u64,
    pub peers: IndexMap<u64, u64>,
}

impl ClockVector {
    pub fn new(sid: u64, time: u64) -> Self {
        Self {
            sid,
            time,
            peers: IndexMap::new(),
        }
    }

    /// Hands out the next local timestamp.
    pub fn tick(&mut self) -> Ts {
        let id = Ts::new(self.sid, self.time);
        self.time += 1;
        id
    }

    /// Advances the clock past `id`.
    pub fn observe(&mut self, id: Ts) {
        if id.sid == self.sid {
            if id.time >= self.time {
                self.time = id.time + 1;
            }
            return;
        }
        let peer = self.peers.entry(id.sid).or_insert(id.time);
        if *peer < id.time {
            *peer = id.time;
        }
    }

    /// Highest known time of `sid`, if the session is known at all.
    pub fn time_of(&self, sid: u64) -> Option<u64> {
        if sid == self.sid {
            return Some(self.time);
        }
        self.peers.get(&sid).copied()
    }
}

//! Animatable scalar parameters
//!
//! An [`AnimatedParameter`] holds one or more keyframes on a normalized
//! timeline (0.0 = start of the clip, 1.0 = end) together with the range its
//! values must stay in. Every write is clamped to that range.
//!
//! Evaluation does not interpolate between keyframes. A parameter with a single
//! keyframe has that value everywhere; a parameter with more keyframes uses its
//! earliest keyframe before the timeline midpoint and its latest keyframe from
//! the midpoint on. The same choice decides which keyframe a drag edits, see
//! [`AnimatedParameter::select`].

/// Timeline position from which the last keyframe is active instead of the first
pub const ENDPOINT_SWITCH_TIME: f64 = 0.5;

/// Identifier of a keyframe, unique within its parameter
///
/// Ids are handed out in insertion order and never reused, so a held id keeps
/// pointing at the same keyframe when others are added or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyframeId(u32);

impl std::fmt::Display for KeyframeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "k{}", self.0)
    }
}

/// A (time, value) pair of an animated parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    id: KeyframeId,
    time: f64,
    value: f64,
}

impl Keyframe {
    pub fn id(&self) -> KeyframeId {
        self.id
    }

    /// Normalized timeline position (0.0 - 1.0)
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Which end of the timeline an endpoint selection refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Earliest keyframe (ties: first inserted)
    First,
    /// Latest keyframe (ties: last inserted)
    Last,
}

/// The keyframe that is active at a given playback position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyframeSelection {
    /// The parameter only has one keyframe
    Single(KeyframeId),
    /// The parameter has several keyframes; one end was picked by time threshold
    Endpoint { id: KeyframeId, endpoint: Endpoint },
}

impl KeyframeSelection {
    pub fn id(&self) -> KeyframeId {
        match *self {
            Self::Single(id) | Self::Endpoint { id, .. } => id,
        }
    }
}

/// A scalar value that may change over the playback timeline
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedParameter {
    /// Keyframes in insertion order, never empty
    keyframes: Vec<Keyframe>,
    min: f64,
    max: f64,
    next_id: u32,
}

impl AnimatedParameter {
    /// Create a parameter with a single keyframe at time 0
    ///
    /// `value` is clamped to `[min, max]`. Swapped bounds are reordered and a
    /// NaN bound leaves that side unbounded.
    pub fn new(value: f64, min: f64, max: f64) -> Self {
        let min = if min.is_nan() { f64::NEG_INFINITY } else { min };
        let max = if max.is_nan() { f64::INFINITY } else { max };
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            keyframes: vec![Keyframe {
                id: KeyframeId(0),
                time: 0.0,
                value: value.clamp(min, max),
            }],
            min,
            max,
            next_id: 1,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Clamp a value into this parameter's range
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Keyframes in insertion order
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }

    pub fn keyframe(&self, id: KeyframeId) -> Option<&Keyframe> {
        self.keyframes.iter().find(|kf| kf.id == id)
    }

    /// Keyframes ordered by time, ties kept in insertion order
    pub fn keyframes_by_time(&self) -> Vec<&Keyframe> {
        let mut sorted: Vec<&Keyframe> = self.keyframes.iter().collect();
        sorted.sort_by(|a, b| a.time.total_cmp(&b.time));
        sorted
    }

    /// Earliest keyframe on the timeline
    pub fn first_keyframe(&self) -> &Keyframe {
        &self.keyframes[self.earliest_index()]
    }

    /// Latest keyframe on the timeline
    pub fn last_keyframe(&self) -> &Keyframe {
        &self.keyframes[self.latest_index()]
    }

    /// Add a keyframe, returning its id
    ///
    /// `time` is clamped to `[0, 1]` and `value` to the parameter range.
    pub fn add_keyframe(&mut self, time: f64, value: f64) -> KeyframeId {
        let id = KeyframeId(self.next_id);
        self.next_id += 1;
        self.keyframes.push(Keyframe {
            id,
            time: time.clamp(0.0, 1.0),
            value: self.clamp(value),
        });
        id
    }

    /// Remove a keyframe
    ///
    /// Returns false if the id is unknown or if it is the only keyframe left.
    pub fn remove_keyframe(&mut self, id: KeyframeId) -> bool {
        if self.keyframes.len() <= 1 {
            return false;
        }
        let before = self.keyframes.len();
        self.keyframes.retain(|kf| kf.id != id);
        self.keyframes.len() != before
    }

    /// Overwrite the value of an existing keyframe (clamped)
    ///
    /// Returns false if the id is unknown.
    pub fn set_keyframe_value(&mut self, id: KeyframeId, value: f64) -> bool {
        let clamped = self.clamp(value);
        match self.keyframes.iter_mut().find(|kf| kf.id == id) {
            Some(kf) => {
                kf.value = clamped;
                true
            }
            None => false,
        }
    }

    /// Move an existing keyframe on the timeline (clamped to `[0, 1]`)
    pub fn set_keyframe_time(&mut self, id: KeyframeId, time: f64) -> bool {
        match self.keyframes.iter_mut().find(|kf| kf.id == id) {
            Some(kf) => {
                kf.time = time.clamp(0.0, 1.0);
                true
            }
            None => false,
        }
    }

    /// Choose the keyframe that is active at a normalized playback position
    pub fn select(&self, time: f64) -> KeyframeSelection {
        if self.keyframes.len() <= 1 {
            return KeyframeSelection::Single(self.keyframes[0].id);
        }
        if time < ENDPOINT_SWITCH_TIME {
            KeyframeSelection::Endpoint {
                id: self.keyframes[self.earliest_index()].id,
                endpoint: Endpoint::First,
            }
        } else {
            KeyframeSelection::Endpoint {
                id: self.keyframes[self.latest_index()].id,
                endpoint: Endpoint::Last,
            }
        }
    }

    /// Value at a normalized playback position
    pub fn value_at_time(&self, time: f64) -> f64 {
        let id = self.select(time).id();
        self.keyframe(id).map(|kf| kf.value).unwrap_or(self.min)
    }

    /// Value at `frame` of a timeline that is `total_frames` long
    ///
    /// A zero-length timeline evaluates at time 0.
    pub fn value_at(&self, frame: u32, total_frames: u32) -> f64 {
        let time = if total_frames == 0 {
            0.0
        } else {
            f64::from(frame) / f64::from(total_frames)
        };
        self.value_at_time(time)
    }

    fn earliest_index(&self) -> usize {
        let mut best = 0;
        for (i, kf) in self.keyframes.iter().enumerate().skip(1) {
            if kf.time < self.keyframes[best].time {
                best = i;
            }
        }
        best
    }

    fn latest_index(&self) -> usize {
        let mut best = 0;
        for (i, kf) in self.keyframes.iter().enumerate().skip(1) {
            if kf.time >= self.keyframes[best].time {
                best = i;
            }
        }
        best
    }
}

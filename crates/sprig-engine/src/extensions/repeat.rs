// extensions/repeat.rs
//
// Repeat policies: fold an unbounded elapsed ratio back into [0, 1]
// and decide whether the animation is over.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What happens once elapsed time passes the duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Repeat {
    /// Play once and hold the end value.
    #[default]
    Once,
    /// Restart from the beginning, forever.
    Loop,
    /// Ping-pong forever: forward on even passes, backward on odd ones.
    LoopWithReverse,
}

impl Repeat {
    pub const ALL: [Repeat; 3] = [Repeat::Once, Repeat::Loop, Repeat::LoopWithReverse];

    /// Whether an animation at `ratio = elapsed / duration` has finished.
    /// Only `Once` ever finishes.
    #[inline]
    pub fn is_finished(self, ratio: f64) -> bool {
        match self {
            Repeat::Once => ratio >= 1.0,
            Repeat::Loop | Repeat::LoopWithReverse => false,
        }
    }

    /// Fold `ratio` into [0, 1].
    ///
    /// `LoopWithReverse` is a triangle wave with period 2. At integer ratios
    /// it is continuous: even integers map to 0, odd integers map to 1.
    /// `Loop` maps every integer ratio to 0.
    #[inline]
    pub fn apply(self, ratio: f64) -> f64 {
        let ratio = ratio.max(0.0);
        match self {
            Repeat::Once => ratio.min(1.0),
            Repeat::Loop => ratio.fract(),
            Repeat::LoopWithReverse => {
                let pass = ratio.floor();
                let f = ratio - pass;
                if pass % 2.0 == 0.0 {
                    f
                } else {
                    1.0 - f
                }
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Repeat::Once => "Once",
            Repeat::Loop => "Loop",
            Repeat::LoopWithReverse => "LoopWithReverse",
        }
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Repeat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Repeat::ALL
            .into_iter()
            .find(|r| r.name() == s)
            .ok_or_else(|| format!("unknown repeat mode \"{s}\""))
    }
}

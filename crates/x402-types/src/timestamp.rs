//! Unix timestamps for authorization validity windows.
//!
//! An EIP-3009 authorization is only executable between `validAfter` and
//! `validBefore`, both expressed as seconds since the Unix epoch.

use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt::{Display, Formatter};
use std::num::ParseIntError;
use std::ops::{Add, Sub};
use std::str::FromStr;
use std::time::SystemTime;

/// Seconds since the Unix epoch (1970-01-01T00:00:00Z).
///
/// Serialized as a stringified integer, the way `validAfter`/`validBefore`
/// travel on the wire:
///
/// ```json
/// "1699999999"
/// ```
///
/// ```
/// use x402_types::timestamp::UnixTimestamp;
///
/// let valid_after = UnixTimestamp::from_secs(1_700_000_000);
/// let valid_before = valid_after + 300;
/// assert_eq!(valid_before - valid_after, 300);
/// assert_eq!(serde_json::to_string(&valid_before).unwrap(), "\"1700000300\"");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, PartialOrd, Ord, Eq, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct UnixTimestamp(u64);

impl FromStr for UnixTimestamp {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl Display for UnixTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Add<u64> for UnixTimestamp {
    type Output = Self;

    fn add(self, rhs: u64) -> Self::Output {
        UnixTimestamp(self.0.saturating_add(rhs))
    }
}

impl Sub for UnixTimestamp {
    type Output = u64;

    /// Seconds between two timestamps, saturating at zero.
    fn sub(self, rhs: Self) -> Self::Output {
        self.0.saturating_sub(rhs.0)
    }
}

impl UnixTimestamp {
    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Returns the current system time as a [`UnixTimestamp`].
    ///
    /// # Panics
    ///
    /// Panics if the system clock is set to a time before the Unix epoch.
    pub fn now() -> Self {
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|elapsed| Self(elapsed.as_secs()))
            .expect("system clock is set before the Unix epoch")
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }
}

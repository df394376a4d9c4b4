//! Snowflake identifiers.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::{Duration, SystemTime};

use regex::Regex;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Up to 20 decimal digits, the widest `u64`.
static SNOWFLAKE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,20}$").expect("snowflake pattern is valid"));

/// A time-ordered, non-zero 64-bit identifier, transmitted as a decimal string.
///
/// # Example
///
/// ```
/// use hookpost::entity::Snowflake;
///
/// let id: Snowflake = "175928847299117063".parse().unwrap();
/// assert_eq!(id.get(), 175_928_847_299_117_063);
/// assert_eq!(id.to_string(), "175928847299117063");
/// assert!("@original".parse::<Snowflake>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Snowflake(u64);

/// Error returned when a string is not a valid snowflake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a valid snowflake")]
pub struct InvalidSnowflake {
    /// The rejected input.
    pub value: String,
}

impl Snowflake {
    /// Milliseconds between the Unix epoch and the first second of 2015,
    /// the epoch snowflake timestamps count from.
    pub const EPOCH_MILLIS: u64 = 1_420_070_400_000;

    /// Creates a snowflake, rejecting zero.
    #[must_use]
    pub const fn new(value: u64) -> Option<Self> {
        if value == 0 { None } else { Some(Self(value)) }
    }

    /// Returns the raw integer value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the creation time encoded in the upper 42 bits.
    #[must_use]
    pub fn created_at(self) -> SystemTime {
        let millis = (self.0 >> 22) + Self::EPOCH_MILLIS;
        SystemTime::UNIX_EPOCH + Duration::from_millis(millis)
    }
}

impl FromStr for Snowflake {
    type Err = InvalidSnowflake;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidSnowflake {
            value: s.to_string(),
        };

        if !SNOWFLAKE_PATTERN.is_match(s) {
            return Err(invalid());
        }

        // 20 digits can still overflow u64
        s.parse::<u64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SnowflakeVisitor)
    }
}

struct SnowflakeVisitor;

impl Visitor<'_> for SnowflakeVisitor {
    type Value = Snowflake;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a snowflake as a decimal string or positive integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Snowflake::new(v).ok_or_else(|| E::custom("snowflake must not be zero"))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .ok()
            .and_then(Snowflake::new)
            .ok_or_else(|| E::custom("snowflake must be positive"))
    }
}

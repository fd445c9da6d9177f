use std::fmt;
use std::time::SystemTime;

use time::macros::{datetime, format_description};
use time::{OffsetDateTime, UtcOffset};

/// The absolute point in time carried by a cookie's `Expires` attribute.
///
/// An `Expires` is always normalized to UTC. It can be built from an
/// [`OffsetDateTime`], a [`SystemTime`], or a numeric Unix timestamp in
/// milliseconds:
///
/// ```rust
/// use cookie_guard::Expires;
/// use time::macros::datetime;
///
/// let a = Expires::from(datetime!(2015-10-21 07:28:00 UTC));
/// let b = Expires::from_unix_millis(1_445_412_480_000);
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "Wed, 21 Oct 2015 07:28:00 GMT");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Expires(OffsetDateTime);

macro_rules! clamp {
    ($datetime:expr, $negative:expr) => {
        match $datetime {
            Ok(datetime) => datetime.clamp(Expires::MIN.0, Expires::MAX.0),
            Err(_) if $negative => Expires::MIN.0,
            Err(_) => Expires::MAX.0,
        }
    };
}

impl Expires {
    /// The Unix epoch, `Thu, 01 Jan 1970 00:00:00 GMT`.
    pub const EPOCH: Expires = Expires(OffsetDateTime::UNIX_EPOCH);

    /// The earliest date-time an `Expires` holds.
    pub const MIN: Expires = Expires(datetime!(0000-01-01 00:00:00 UTC));

    /// The latest date-time an `Expires` holds.
    pub const MAX: Expires = Expires(datetime!(9999-12-31 23:59:59 UTC));

    /// Creates an `Expires` from a Unix timestamp in milliseconds. Timestamps
    /// outside of [`Expires::MIN`]..=[`Expires::MAX`] are clamped.
    pub fn from_unix_millis(millis: i64) -> Self {
        let nanos = i128::from(millis) * 1_000_000;
        Expires(clamp!(OffsetDateTime::from_unix_timestamp_nanos(nanos), millis < 0))
    }

    /// Returns the wrapped date-time, in UTC.
    pub fn datetime(&self) -> OffsetDateTime {
        self.0
    }

    /// Formats `self` as an RFC 7231 IMF-fixdate, for example
    /// `Sun, 06 Nov 1994 08:49:37 GMT`.
    pub fn http_date(&self) -> Option<String> {
        let fmt = format_description!(
            "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
        );

        self.0.format(fmt).ok()
    }
}

impl From<OffsetDateTime> for Expires {
    fn from(datetime: OffsetDateTime) -> Self {
        let utc = datetime.to_offset(UtcOffset::UTC);
        Expires(utc.clamp(Expires::MIN.0, Expires::MAX.0))
    }
}

impl From<SystemTime> for Expires {
    fn from(time: SystemTime) -> Self {
        Expires::from(OffsetDateTime::from(time))
    }
}

impl From<i64> for Expires {
    /// Interprets `millis` as a Unix timestamp in milliseconds.
    fn from(millis: i64) -> Self {
        Expires::from_unix_millis(millis)
    }
}

impl fmt::Display for Expires {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.http_date() {
            Some(date) => f.write_str(&date),
            None => Err(fmt::Error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::offset;

    #[test]
    fn epoch_http_date() {
        assert_eq!(
            Expires::EPOCH.http_date().as_deref(),
            Some("Thu, 01 Jan 1970 00:00:00 GMT")
        );
        assert_eq!(Expires::from(0_i64), Expires::EPOCH);
    }

    #[test]
    fn normalizes_to_utc() {
        let local = datetime!(2015-10-21 09:28:00).assume_offset(offset!(+2));
        let expires = Expires::from(local);
        assert_eq!(expires.datetime().offset(), UtcOffset::UTC);
        assert_eq!(expires.to_string(), "Wed, 21 Oct 2015 07:28:00 GMT");
    }

    #[test]
    fn millisecond_timestamps() {
        let expires = Expires::from_unix_millis(1_445_412_480_999);
        assert_eq!(expires.to_string(), "Wed, 21 Oct 2015 07:28:00 GMT");

        let before_epoch = Expires::from_unix_millis(-86_400_000);
        assert_eq!(before_epoch.to_string(), "Wed, 31 Dec 1969 00:00:00 GMT");
    }

    #[test]
    fn out_of_range_timestamps_clamp() {
        assert_eq!(Expires::from_unix_millis(i64::MAX), Expires::MAX);
        assert_eq!(Expires::from_unix_millis(i64::MIN), Expires::MIN);
        assert_eq!(
            Expires::MAX.http_date().as_deref(),
            Some("Fri, 31 Dec 9999 23:59:59 GMT")
        );
    }

    #[test]
    fn from_system_time() {
        let expires = Expires::from(SystemTime::UNIX_EPOCH);
        assert_eq!(expires, Expires::EPOCH);
    }
}

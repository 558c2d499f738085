use error_stack::Report;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::marker::PhantomData;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct CreatedAt<T>(OffsetDateTime, PhantomData<T>);

impl<T> CreatedAt<T> {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into(), PhantomData)
    }
}

impl<T> Serialize for CreatedAt<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for CreatedAt<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <OffsetDateTime>::deserialize(deserializer).map(|time| Self(time, PhantomData))
    }
}

/// Whole days elapsed from `start` to `end`, floored.
///
/// A negative span floors away from zero, so half a day before `start` is `-1`.
pub fn elapsed_days(start: &OffsetDateTime, end: &OffsetDateTime) -> i64 {
    let elapsed = (*end - *start).whole_nanoseconds();
    elapsed.div_euclid(Duration::DAY.whole_nanoseconds()) as i64
}

/// Parses `YYYY-MM-DDTHH:MM` (taken as UTC) or an RFC 3339 timestamp.
pub fn parse_instant(raw: &str) -> error_stack::Result<OffsetDateTime, KernelError> {
    let minutes = format_description!("[year]-[month]-[day]T[hour]:[minute]");
    if let Ok(time) = PrimitiveDateTime::parse(raw, &minutes) {
        return Ok(time.assume_utc());
    }
    OffsetDateTime::parse(raw, &Rfc3339).map_err(|error| {
        Report::new(error)
            .change_context(KernelError::InvalidInput)
            .attach_printable(format!("cannot parse instant `{raw}`"))
    })
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use super::{elapsed_days, parse_instant};

    #[test]
    fn elapsed_days_truncates_partial_days() {
        let start = datetime!(2024-03-01 10:00 UTC);
        assert_eq!(elapsed_days(&start, &datetime!(2024-03-01 23:59 UTC)), 0);
        assert_eq!(elapsed_days(&start, &datetime!(2024-03-04 09:59 UTC)), 2);
        assert_eq!(elapsed_days(&start, &datetime!(2024-03-04 10:00 UTC)), 3);
    }

    #[test]
    fn elapsed_days_floors_negative_spans() {
        let start = datetime!(2024-03-04 10:00 UTC);
        assert_eq!(elapsed_days(&start, &datetime!(2024-03-04 09:00 UTC)), -1);
        assert_eq!(elapsed_days(&start, &datetime!(2024-03-02 10:00 UTC)), -2);
    }

    #[test]
    fn parses_minute_precision_and_rfc3339() {
        assert_eq!(
            parse_instant("2024-03-01T10:30").unwrap(),
            datetime!(2024-03-01 10:30 UTC)
        );
        assert_eq!(
            parse_instant("2024-03-01T10:30:00+02:00").unwrap(),
            datetime!(2024-03-01 08:30 UTC)
        );
        assert!(parse_instant("yesterday").is_err());
    }
}

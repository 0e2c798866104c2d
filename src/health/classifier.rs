//! Severity classification of per-instance health records.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::compute::HealthRecord;

/// Overall state of a backend service.
///
/// The numeric codes are consumed by monitoring triggers and must not change:
/// `0 = Ok`, `1 = Critical`, `2 = MultiDegraded`, `3 = SingleDegraded`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Every instance is healthy.
    Ok = 0,
    /// No instance is healthy, including when none report at all.
    Critical = 1,
    /// More than one instance is unhealthy, but not all of them.
    MultiDegraded = 2,
    /// Exactly one instance is unhealthy.
    SingleDegraded = 3,
}

impl Severity {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Reduce instance health records to a single severity.
///
/// An empty record set is `Critical`: zero unhealthy out of zero total counts
/// as "all unhealthy".
pub fn classify(records: &[HealthRecord]) -> Severity {
    let total = records.len();
    let unhealthy = records.iter().filter(|r| !r.is_healthy()).count();

    if unhealthy == total {
        Severity::Critical
    } else if unhealthy > 1 {
        Severity::MultiDegraded
    } else if unhealthy == 1 {
        Severity::SingleDegraded
    } else {
        Severity::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::HealthState::{self, *};

    fn records(states: &[HealthState]) -> Vec<HealthRecord> {
        states.iter().copied().map(HealthRecord::with_state).collect()
    }

    #[test]
    fn test_empty_is_critical() {
        assert_eq!(classify(&[]), Severity::Critical);
    }

    #[test]
    fn test_all_unhealthy_is_critical() {
        assert_eq!(classify(&records(&[Unhealthy])), Severity::Critical);
        assert_eq!(
            classify(&records(&[Unhealthy, Draining, Timeout, Unknown])),
            Severity::Critical
        );
    }

    #[test]
    fn test_single_unhealthy() {
        assert_eq!(
            classify(&records(&[Healthy, Unhealthy])),
            Severity::SingleDegraded
        );
        assert_eq!(
            classify(&records(&[Healthy, Healthy, Healthy, Draining])),
            Severity::SingleDegraded
        );
    }

    #[test]
    fn test_multiple_unhealthy() {
        assert_eq!(
            classify(&records(&[Healthy, Unhealthy, Unknown])),
            Severity::MultiDegraded
        );
        assert_eq!(
            classify(&records(&[Unhealthy, Healthy, Timeout, Healthy, Unhealthy])),
            Severity::MultiDegraded
        );
    }

    #[test]
    fn test_all_healthy_is_ok() {
        assert_eq!(classify(&records(&[Healthy])), Severity::Ok);
        assert_eq!(classify(&records(&[Healthy; 8])), Severity::Ok);
    }

    #[test]
    fn test_exhaustive_small_sets() {
        for total in 1..=6usize {
            for unhealthy in 0..=total {
                let mut states = vec![Healthy; total - unhealthy];
                states.extend(std::iter::repeat(Unhealthy).take(unhealthy));
                let expected = match unhealthy {
                    u if u == total => Severity::Critical,
                    0 => Severity::Ok,
                    1 => Severity::SingleDegraded,
                    _ => Severity::MultiDegraded,
                };
                assert_eq!(
                    classify(&records(&states)),
                    expected,
                    "total={total} unhealthy={unhealthy}"
                );
            }
        }
    }

    #[test]
    fn test_codes() {
        assert_eq!(Severity::Ok.code(), 0);
        assert_eq!(Severity::Critical.code(), 1);
        assert_eq!(Severity::MultiDegraded.code(), 2);
        assert_eq!(Severity::SingleDegraded.code(), 3);
        assert_eq!(Severity::SingleDegraded.to_string(), "3");
        assert_eq!(serde_json::to_string(&Severity::Critical).unwrap(), "1");
    }
}

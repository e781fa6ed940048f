use crate::types::HealthRes;
use case_core::Clock;

/// Simple health service used by the REST API.
///
/// Reports liveness only; it does not inspect the case store.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Builds the health response, stamped with the current time from `clock`.
    pub fn check_health(clock: &dyn Clock) -> HealthRes {
        HealthRes {
            status: "ok".into(),
            time: clock.now_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    struct FixedClock;

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap()
        }
    }

    #[test]
    fn reports_ok_with_time() {
        let res = HealthService::check_health(&FixedClock);
        assert_eq!(res.status, "ok");
        assert_eq!(res.time, "2024-05-06T07:08:09.000000+00:00");
    }
}

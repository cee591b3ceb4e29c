//! Error severity classification shared by every view.
//!
//! Table badges, timeline bars, graph edge strokes and detail panels all read
//! their emphasis from here so the thresholds cannot drift apart.

/// Error rate (percent) at which a path/node/edge is flagged as failing
pub const ERROR_RATE_ERROR: f64 = 30.0;
/// Error rate (percent) at which a path/node/edge is flagged as degraded
pub const ERROR_RATE_WARN: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Ok,
    Warn,
    Error,
}

/// Lower bounds are inclusive: 30 is `Error`, 10 is `Warn`. NaN is `Ok`.
pub fn classify(rate: f64) -> Severity {
    if rate >= ERROR_RATE_ERROR {
        Severity::Error
    } else if rate >= ERROR_RATE_WARN {
        Severity::Warn
    } else {
        Severity::Ok
    }
}

/// HTTP status variant: 5xx is `Error`, 4xx is `Warn`, anything else `Ok`.
pub fn classify_status(status: i32) -> Severity {
    if status >= 500 {
        Severity::Error
    } else if status >= 400 {
        Severity::Warn
    } else {
        Severity::Ok
    }
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Ok => "#28a745",
            Self::Warn => "#ffc107",
            Self::Error => "#dc3545",
        }
    }

    pub fn text_class(self) -> &'static str {
        match self {
            Self::Ok => "text-ok",
            Self::Warn => "text-warn",
            Self::Error => "text-error",
        }
    }

    pub fn badge_class(self) -> &'static str {
        match self {
            Self::Ok => "badge badge-success",
            Self::Warn => "badge badge-warn",
            Self::Error => "badge badge-error",
        }
    }

    pub fn bar_class(self) -> &'static str {
        match self {
            Self::Ok => "timeline-bar status-2xx",
            Self::Warn => "timeline-bar status-4xx",
            Self::Error => "timeline-bar status-5xx",
        }
    }

    pub fn legend(self) -> &'static str {
        match self {
            Self::Ok => "ok (<10%)",
            Self::Warn => "warn (10-30%)",
            Self::Error => "error (>=30%)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_boundaries_are_inclusive() {
        assert_eq!(classify(30.0), Severity::Error);
        assert_eq!(classify(29.999), Severity::Warn);
        assert_eq!(classify(10.0), Severity::Warn);
        assert_eq!(classify(9.999), Severity::Ok);
        assert_eq!(classify(0.0), Severity::Ok);
        assert_eq!(classify(100.0), Severity::Error);
    }

    #[test]
    fn test_nan_rate_is_ok() {
        assert_eq!(classify(f64::NAN), Severity::Ok);
    }

    #[test]
    fn test_status_boundaries() {
        assert_eq!(classify_status(200), Severity::Ok);
        assert_eq!(classify_status(399), Severity::Ok);
        assert_eq!(classify_status(400), Severity::Warn);
        assert_eq!(classify_status(499), Severity::Warn);
        assert_eq!(classify_status(500), Severity::Error);
        assert_eq!(classify_status(504), Severity::Error);
    }

    #[test]
    fn test_labels_line_up() {
        assert_eq!(Severity::Error.as_str(), "error");
        assert_eq!(Severity::Warn.text_class(), "text-warn");
        assert_eq!(Severity::Ok.color(), "#28a745");
        assert_eq!(Severity::Error.bar_class(), "timeline-bar status-5xx");
    }
}

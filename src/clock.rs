use chrono::{DateTime, FixedOffset, Utc};

/// Wall-clock source in the reference timezone.
///
/// The submission window is defined in one timezone for the whole
/// organization, so everything that looks at the time of day goes through
/// this trait instead of calling `Utc::now` directly.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// System clock shifted to the configured reference offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Clock pinned to a fixed instant.
    pub struct FixedClock(pub DateTime<FixedOffset>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<FixedOffset> {
            self.0
        }
    }
}

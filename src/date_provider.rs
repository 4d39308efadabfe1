use chrono::{Local, NaiveDate};

/// Trait for providing the current calendar date to the analytics
/// This allows for flexible date handling (system clock, overrides, tests)
pub trait DateProvider: Send + Sync {
    /// Get the caller's current date
    fn today(&self) -> NaiveDate;
}

/// Default date provider that uses the local system clock
pub struct SystemDateProvider;

impl DateProvider for SystemDateProvider {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Date provider that pins "today" to a fixed date instead of the system clock
pub struct OverrideDateProvider {
    override_date: NaiveDate,
}

impl OverrideDateProvider {
    /// Create a new override date provider with a specific date
    pub fn new(override_date: NaiveDate) -> Self {
        Self { override_date }
    }
}

impl DateProvider for OverrideDateProvider {
    fn today(&self) -> NaiveDate {
        self.override_date
    }
}

impl<F> DateProvider for F
where
    F: Fn() -> NaiveDate + Send + Sync,
{
    fn today(&self) -> NaiveDate {
        self()
    }
}

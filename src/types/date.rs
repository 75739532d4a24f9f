// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use chrono::Datelike;
use chrono::Local;
use chrono::NaiveDate;

use crate::error::ErrorReport;

/// A Gregorian calendar date, without a timezone.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Date(NaiveDate);

impl Date {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today's date in the local timezone.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Days since the most recent Saturday: Saturday is 0, Friday is 6.
    pub fn days_since_saturday(self) -> i64 {
        let from_sunday = self.0.weekday().num_days_from_sunday() as i64;
        (from_sunday + 1) % 7
    }

    /// Number of days from `other` to `self`. Negative if `self` is earlier.
    pub fn days_after(self, other: Date) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")?;
        Ok(Self(date))
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_days_since_saturday() -> Fallible<()> {
        let saturday: Date = "2024-03-23".parse()?;
        let wednesday: Date = "2024-03-20".parse()?;
        let friday: Date = "2024-03-22".parse()?;
        assert_eq!(saturday.days_since_saturday(), 0);
        assert_eq!(wednesday.days_since_saturday(), 4);
        assert_eq!(friday.days_since_saturday(), 6);
        Ok(())
    }

    #[test]
    fn test_days_after() -> Fallible<()> {
        let a: Date = "2024-03-20".parse()?;
        let b: Date = "2024-03-30".parse()?;
        assert_eq!(b.days_after(a), 10);
        assert_eq!(a.days_after(b), -10);
        Ok(())
    }

    #[test]
    fn test_parse_invalid() {
        assert!("2024-13-01".parse::<Date>().is_err());
        assert!("yesterday".parse::<Date>().is_err());
    }

    #[test]
    fn test_display() -> Fallible<()> {
        let date: Date = "2024-03-05".parse()?;
        assert_eq!(date.to_string(), "2024-03-05");
        Ok(())
    }
}

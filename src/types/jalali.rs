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

//! Conversion between the Gregorian and Jalali (Persian solar) calendars.
//!
//! Leap years follow the 33-year cycle with the break years of Borkowski's
//! algorithm, which is valid for Jalali years -61 through 3177.

use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use chrono::Datelike;
use chrono::Days;
use chrono::NaiveDate;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::date::Date;

/// Jalali years at which the leap cycle shifts.
const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

pub const MIN_YEAR: i32 = BREAKS[0];
pub const MAX_YEAR: i32 = BREAKS[BREAKS.len() - 1] - 1;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct JalaliDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// What the leap cycle says about one Jalali year.
struct YearInfo {
    /// Years since the last leap year; zero means this year is a leap year.
    since_leap: i32,
    /// The Gregorian year in which this Jalali year begins.
    gregorian_year: i32,
    /// Day of March on which this Jalali year begins.
    march_day: i32,
}

fn year_info(jy: i32) -> Fallible<YearInfo> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&jy) {
        return fail(format!("Jalali year {jy} is out of range."));
    }
    let gregorian_year = jy + 621;
    let mut leap_j = -14;
    let mut jp = BREAKS[0];
    let mut jump = 0;
    for &jm in &BREAKS[1..] {
        jump = jm - jp;
        if jy < jm {
            break;
        }
        leap_j += (jump / 33) * 8 + (jump % 33) / 4;
        jp = jm;
    }
    let mut n = jy - jp;

    // Leap days in the Jalali calendar up to the start of this year.
    leap_j += (n / 33) * 8 + ((n % 33) + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }

    // And in the Gregorian calendar up to the same point.
    let leap_g = gregorian_year / 4 - ((gregorian_year / 100 + 1) * 3) / 4 - 150;
    let march_day = 20 + leap_j - leap_g;

    if jump - n < 6 {
        n = n - jump + ((jump + 4) / 33) * 33;
    }
    let mut since_leap = (((n + 1) % 33) - 1) % 4;
    if since_leap == -1 {
        since_leap = 4;
    }
    Ok(YearInfo {
        since_leap,
        gregorian_year,
        march_day,
    })
}

/// The Gregorian date of 1 Farvardin of the given Jalali year.
pub fn first_day_of_year(jy: i32) -> Fallible<Date> {
    let info = year_info(jy)?;
    match NaiveDate::from_ymd_opt(info.gregorian_year, 3, info.march_day as u32) {
        Some(date) => Ok(Date::new(date)),
        None => fail(format!("Jalali year {jy} is out of range.")),
    }
}

pub fn is_leap_year(jy: i32) -> Fallible<bool> {
    Ok(year_info(jy)?.since_leap == 0)
}

pub fn month_length(jy: i32, jm: u32) -> Fallible<u32> {
    match jm {
        1..=6 => Ok(31),
        7..=11 => Ok(30),
        12 => {
            if is_leap_year(jy)? {
                Ok(30)
            } else {
                Ok(29)
            }
        }
        _ => fail(format!("invalid Jalali month: {jm}")),
    }
}

impl JalaliDate {
    /// Construct a Jalali date, checking that it exists.
    pub fn new(year: i32, month: u32, day: u32) -> Fallible<Self> {
        let length = month_length(year, month)?;
        if day < 1 || day > length {
            return fail(format!("invalid Jalali date: {year}/{month}/{day}"));
        }
        Ok(Self { year, month, day })
    }

    pub fn from_gregorian(date: Date) -> Fallible<Self> {
        let jy = date.into_inner().year() - 621;
        let info = year_info(jy)?;
        let nowruz = first_day_of_year(jy)?;
        let mut k = date.days_after(nowruz) as i32;
        let mut year = jy;
        if k >= 0 {
            if k <= 185 {
                return Ok(Self {
                    year,
                    month: (1 + k / 31) as u32,
                    day: (k % 31 + 1) as u32,
                });
            }
            k -= 186;
        } else {
            // The date falls in the last months of the previous year.
            year -= 1;
            k += 179;
            if info.since_leap == 1 {
                k += 1;
            }
        }
        Ok(Self {
            year,
            month: (7 + k / 30) as u32,
            day: (k % 30 + 1) as u32,
        })
    }

    pub fn to_gregorian(self) -> Fallible<Date> {
        let nowruz = first_day_of_year(self.year)?;
        let month = self.month as i64;
        let offset = (month - 1) * 31 - (month / 7) * (month - 7) + self.day as i64 - 1;
        match nowruz.into_inner().checked_add_days(Days::new(offset as u64)) {
            Some(date) => Ok(Date::new(date)),
            None => fail(format!("Jalali date {self} is out of range.")),
        }
    }
}

impl Display for JalaliDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for JalaliDate {
    type Err = ErrorReport;

    /// Parses `yyyy/mm/dd`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        let [year, month, day] = parts.as_slice() else {
            return fail(format!("invalid Jalali date: {s:?}"));
        };
        match (year.parse(), month.parse(), day.parse()) {
            (Ok(year), Ok(month), Ok(day)) => JalaliDate::new(year, month, day),
            _ => fail(format!("invalid Jalali date: {s:?}")),
        }
    }
}

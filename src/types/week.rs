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

use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::date::Date;
use crate::types::jalali::JalaliDate;
use crate::types::jalali::first_day_of_year;

/// A 1-based week of the Jalali year. Weeks start on Saturday, so the first
/// week runs from 1 Farvardin to the following Friday.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize)]
#[serde(transparent)]
pub struct WeekNumber(u32);

impl WeekNumber {
    pub fn of(date: Date) -> Fallible<Self> {
        let jalali = JalaliDate::from_gregorian(date)?;
        let nowruz = first_day_of_year(jalali.year)?;
        let days = date.days_after(nowruz) + nowruz.days_since_saturday();
        Ok(Self((days / 7) as u32 + 1))
    }
}

impl Display for WeekNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WeekNumber {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u32>() {
            Ok(n) if n > 0 => Ok(Self(n)),
            _ => Err(ErrorReport::new(format!("invalid week number: {s:?}"))),
        }
    }
}

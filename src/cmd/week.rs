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

use crate::error::Fallible;
use crate::types::date::Date;
use crate::types::jalali::JalaliDate;
use crate::types::week::WeekNumber;

pub fn print_week(date: Option<String>) -> Fallible<()> {
    let date: Date = match date {
        Some(s) if s.contains('/') => s.parse::<JalaliDate>()?.to_gregorian()?,
        Some(s) => s.parse()?,
        None => Date::today(),
    };
    println!("{}", describe_week(date)?);
    Ok(())
}

fn describe_week(date: Date) -> Fallible<String> {
    let jalali = JalaliDate::from_gregorian(date)?;
    let week = WeekNumber::of(date)?;
    Ok(format!("{date} = {jalali}, week {week} of {}", jalali.year))
}

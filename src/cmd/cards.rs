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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::store::MarkOutcome;
use crate::types::card::Card;
use crate::types::date::Date;
use crate::types::week::WeekNumber;

pub fn use_card(directory: Option<String>, card: Card) -> Fallible<MarkOutcome> {
    let mut coll = Collection::new(directory)?;
    coll.store.load(Date::today())?;
    let outcome = coll.store.mark_used(card)?;
    match outcome {
        MarkOutcome::Marked => println!("{card}: used."),
        MarkOutcome::AlreadyUsed => println!("{card}: already used this week."),
    }
    Ok(outcome)
}

pub fn reset_cards(directory: Option<String>) -> Fallible<()> {
    let mut coll = Collection::new(directory)?;
    let today = Date::today();
    coll.store.load(today)?;
    coll.store.reset_all(today)?;
    println!("All cards reset (week {}).", WeekNumber::of(today)?);
    Ok(())
}

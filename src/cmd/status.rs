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

use clap::ValueEnum;
use serde::Serialize;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::store::CardStates;
use crate::types::card::Card;
use crate::types::date::Date;
use crate::types::jalali::JalaliDate;
use crate::types::week::WeekNumber;

#[derive(ValueEnum, Clone)]
pub enum StatusFormat {
    /// Human-readable output.
    Text,
    /// JSON output.
    Json,
}

impl Display for StatusFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFormat::Text => write!(f, "text"),
            StatusFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_status(directory: Option<String>, format: StatusFormat) -> Fallible<()> {
    let mut coll = Collection::new(directory)?;
    let today = Date::today();
    let cards = coll.store.load(today)?;
    let status = Status::new(today, cards)?;
    match format {
        StatusFormat::Text => print!("{}", status.to_text()),
        StatusFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    date: String,
    jalali_date: String,
    week: WeekNumber,
    cards: Vec<CardStatus>,
}

#[derive(Serialize)]
pub struct CardStatus {
    card: Card,
    label: &'static str,
    used: bool,
}

impl Status {
    pub fn new(today: Date, cards: &CardStates) -> Fallible<Self> {
        let cards = Card::ALL
            .into_iter()
            .map(|card| CardStatus {
                card,
                label: card.label(),
                used: cards.get(&card).copied().unwrap_or(false),
            })
            .collect();
        Ok(Self {
            date: today.to_string(),
            jalali_date: JalaliDate::from_gregorian(today)?.to_string(),
            week: WeekNumber::of(today)?,
            cards,
        })
    }

    pub fn to_text(&self) -> String {
        let mut out = format!("{} ({}), week {}\n", self.jalali_date, self.date, self.week);
        for card in &self.cards {
            let mark = if card.used { "x" } else { " " };
            out.push_str(&format!("  [{mark}] {} ({})\n", card.label, card.card.slug()));
        }
        out
    }
}

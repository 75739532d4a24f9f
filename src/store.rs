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

use std::collections::BTreeMap;

use crate::db::Database;
use crate::error::Fallible;
use crate::types::card::Card;
use crate::types::date::Date;
use crate::types::week::WeekNumber;

/// Key under which the week of the last reset is stored.
pub const LAST_RESET_WEEK: &str = "lastResetWeek";

/// Value stored under a card's label once it has been used.
const USED: &str = "used";

/// The used/unused state of every card.
pub type CardStates = BTreeMap<Card, bool>;

#[derive(Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    Marked,
    AlreadyUsed,
}

/// Tracks which cards have been used this week.
pub struct CardStore {
    db: Database,
    cards: CardStates,
}

impl CardStore {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            cards: all_unused(),
        }
    }

    /// Read the card states from storage. If the stored week is missing or
    /// is not the week of `today`, every card is cleared first.
    pub fn load(&mut self, today: Date) -> Fallible<&CardStates> {
        let current = WeekNumber::of(today)?;
        let last: Option<WeekNumber> = match self.db.get_item(LAST_RESET_WEEK)? {
            Some(value) => value.parse().ok(),
            None => None,
        };
        if last != Some(current) {
            log::debug!("Week changed ({last:?} -> {current}), clearing cards.");
            let mut cards = CardStates::new();
            for card in Card::ALL {
                self.db.remove_item(card.label())?;
                cards.insert(card, false);
            }
            self.db.set_item(LAST_RESET_WEEK, &current.to_string())?;
            self.cards = cards;
        } else {
            let mut cards = CardStates::new();
            for card in Card::ALL {
                let value = self.db.get_item(card.label())?;
                cards.insert(card, value.as_deref() == Some(USED));
            }
            self.cards = cards;
        }
        Ok(&self.cards)
    }

    /// Mark a card as used. Using a card twice in the same week does nothing.
    pub fn mark_used(&mut self, card: Card) -> Fallible<MarkOutcome> {
        if self.is_used(card) {
            return Ok(MarkOutcome::AlreadyUsed);
        }
        log::debug!("Marking {} as used.", card.slug());
        self.cards.insert(card, true);
        self.db.set_item(card.label(), USED)?;
        Ok(MarkOutcome::Marked)
    }

    /// Clear every card and record `today`'s week as the last reset.
    pub fn reset_all(&mut self, today: Date) -> Fallible<()> {
        let current = WeekNumber::of(today)?;
        log::debug!("Resetting all cards in week {current}.");
        let mut cards = CardStates::new();
        for card in Card::ALL {
            cards.insert(card, false);
            self.db.remove_item(card.label())?;
        }
        self.db.set_item(LAST_RESET_WEEK, &current.to_string())?;
        self.cards = cards;
        Ok(())
    }

    pub fn is_used(&self, card: Card) -> bool {
        self.cards.get(&card).copied().unwrap_or(false)
    }

    #[cfg(test)]
    pub fn db(&self) -> &Database {
        &self.db
    }
}

fn all_unused() -> CardStates {
    Card::ALL.into_iter().map(|card| (card, false)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn store() -> Fallible<CardStore> {
        Ok(CardStore::new(Database::in_memory()?))
    }

    #[test]
    fn test_load_without_marker_clears_cards() -> Fallible<()> {
        let mut store = store()?;
        // Leftover flags without a marker must not survive.
        store.db().set_item(Card::Baba.label(), USED)?;
        let cards = store.load(date("2024-03-23"))?;
        assert!(cards.values().all(|used| !used));
        assert_eq!(store.db().get_item(Card::Baba.label())?, None);
        assert_eq!(store.db().get_item(LAST_RESET_WEEK)?, Some("2".to_string()));
        Ok(())
    }

    #[test]
    fn test_load_with_stale_marker_clears_cards() -> Fallible<()> {
        let mut store = store()?;
        store.load(date("2024-03-23"))?;
        store.mark_used(Card::Maman)?;
        store.mark_used(Card::Dadash)?;
        // The following Saturday starts week 3.
        let cards = store.load(date("2024-03-30"))?;
        assert!(cards.values().all(|used| !used));
        assert_eq!(store.db().get_item(Card::Maman.label())?, None);
        assert_eq!(store.db().get_item(LAST_RESET_WEEK)?, Some("3".to_string()));
        Ok(())
    }

    #[test]
    fn test_load_with_garbage_marker_clears_cards() -> Fallible<()> {
        let mut store = store()?;
        store.db().set_item(LAST_RESET_WEEK, "soon")?;
        store.db().set_item(Card::Khodam.label(), USED)?;
        let cards = store.load(date("2024-03-23"))?;
        assert_eq!(cards.get(&Card::Khodam), Some(&false));
        assert_eq!(store.db().get_item(LAST_RESET_WEEK)?, Some("2".to_string()));
        Ok(())
    }

    #[test]
    fn test_load_within_same_week_keeps_flags() -> Fallible<()> {
        let mut store = store()?;
        store.load(date("2024-03-23"))?;
        store.mark_used(Card::Khodam)?;
        // Friday of the same week, through a fresh store over the same db.
        let mut store = CardStore::new(store.db);
        let cards = store.load(date("2024-03-29"))?;
        assert_eq!(cards.get(&Card::Khodam), Some(&true));
        assert_eq!(cards.get(&Card::Baba), Some(&false));
        assert_eq!(cards.len(), 4);
        Ok(())
    }

    #[test]
    fn test_only_used_counts_as_used() -> Fallible<()> {
        let mut store = store()?;
        store.load(date("2024-03-23"))?;
        store.db().set_item(Card::Baba.label(), "true")?;
        let cards = store.load(date("2024-03-24"))?;
        assert_eq!(cards.get(&Card::Baba), Some(&false));
        Ok(())
    }

    #[test]
    fn test_mark_used_persists_and_disables() -> Fallible<()> {
        let mut store = store()?;
        store.load(date("2024-03-23"))?;
        assert_eq!(store.mark_used(Card::Baba)?, MarkOutcome::Marked);
        assert!(store.is_used(Card::Baba));
        assert_eq!(store.db().get_item(Card::Baba.label())?, Some(USED.to_string()));
        assert_eq!(store.mark_used(Card::Baba)?, MarkOutcome::AlreadyUsed);
        assert!(store.is_used(Card::Baba));
        Ok(())
    }

    #[test]
    fn test_reset_all() -> Fallible<()> {
        let mut store = store()?;
        store.load(date("2024-03-23"))?;
        for card in Card::ALL {
            store.mark_used(card)?;
        }
        store.reset_all(date("2024-04-06"))?;
        assert!(Card::ALL.iter().all(|card| !store.is_used(*card)));
        for card in Card::ALL {
            assert_eq!(store.db().get_item(card.label())?, None);
        }
        assert_eq!(store.db().get_item(LAST_RESET_WEEK)?, Some("4".to_string()));
        // A card can be used again after a reset.
        assert_eq!(store.mark_used(Card::Dadash)?, MarkOutcome::Marked);
        Ok(())
    }
}

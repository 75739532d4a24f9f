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
use serde::Deserialize;
use serde::Serialize;

/// One of the four pool entry cards.
#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Card {
    /// Dad's card.
    Baba,
    /// Mom's card.
    Maman,
    /// My own card.
    Khodam,
    /// Brother's card.
    Dadash,
}

impl Card {
    /// All cards, in display order.
    pub const ALL: [Card; 4] = [Card::Baba, Card::Maman, Card::Khodam, Card::Dadash];

    /// The display label. This is also the card's storage key.
    pub fn label(self) -> &'static str {
        match self {
            Card::Baba => "کارت بابا",
            Card::Maman => "کارت مامان",
            Card::Khodam => "کارت خودم",
            Card::Dadash => "کارت داداش",
        }
    }

    /// The ASCII name used on the command line and in forms.
    pub fn slug(self) -> &'static str {
        match self {
            Card::Baba => "baba",
            Card::Maman => "maman",
            Card::Khodam => "khodam",
            Card::Dadash => "dadash",
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_labels_are_distinct() {
        let labels: HashSet<&str> = Card::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels.len(), 4);
    }

    #[test]
    fn test_slug_matches_value_enum() {
        for card in Card::ALL {
            assert_eq!(Card::from_str(card.slug(), false), Ok(card));
        }
    }

    #[test]
    fn test_serde_uses_slug() -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(&Card::Khodam)?;
        assert_eq!(json, "\"khodam\"");
        let card: Card = serde_json::from_str("\"dadash\"")?;
        assert_eq!(card, Card::Dadash);
        Ok(())
    }
}

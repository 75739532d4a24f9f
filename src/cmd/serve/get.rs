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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;

use crate::cmd::serve::state::ServerState;
use crate::cmd::serve::template::page_template;
use crate::error::Fallible;
use crate::store::CardStates;
use crate::types::card::Card;
use crate::types::date::Date;
use crate::types::jalali::JalaliDate;
use crate::types::week::WeekNumber;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let today = Date::today();
    let mut mutable = state.mutable.lock().unwrap();
    let highlight = mutable.highlight.take();
    let body = match mutable.store.load(today) {
        Ok(cards) => render_screen(&state, today, cards, highlight),
        Err(e) => {
            log::error!("{e}");
            Err(e)
        }
    };
    match body {
        Ok(body) => {
            let html = page_template(&state.config.title, body);
            (StatusCode::OK, Html(html.into_string()))
        }
        Err(e) => {
            let html = page_template(&state.config.title, html! { p.error { (e) } });
            (StatusCode::INTERNAL_SERVER_ERROR, Html(html.into_string()))
        }
    }
}

fn render_screen(
    state: &ServerState,
    today: Date,
    cards: &CardStates,
    highlight: Option<Card>,
) -> Fallible<Markup> {
    let jalali = JalaliDate::from_gregorian(today)?;
    let week = WeekNumber::of(today)?;
    Ok(html! {
        div.screen {
            h1.greeting {
                (state.config.greeting)
            }
            h2.title {
                (state.config.title)
            }
            div.week {
                (jalali) " · هفته " (week)
            }
            form.cards action="/" method="post" {
                input type="hidden" name="action" value="Use";
                @for card in Card::ALL {
                    @let used = cards.get(&card).copied().unwrap_or(false);
                    @let glow = highlight == Some(card);
                    button.card.used[used].glow[glow] id=(card.slug()) type="submit" name="card" value=(card.slug()) disabled[used] {
                        (card.label())
                    }
                }
            }
            form.controls action="/" method="post" {
                button.reset id="reset" type="submit" name="action" value="Reset" {
                    "ریست هفته"
                }
            }
        }
    })
}

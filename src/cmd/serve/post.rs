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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::cmd::serve::state::ServerState;
use crate::error::Fallible;
use crate::error::fail;
use crate::store::MarkOutcome;
use crate::types::card::Card;
use crate::types::date::Date;

#[derive(Debug, Deserialize)]
enum Action {
    Use,
    Reset,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    card: Option<Card>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    match action_handler(&state, form.action, form.card) {
        Ok(_) => {}
        Err(e) => {
            log::error!("{e}");
        }
    }
    Redirect::to("/")
}

fn action_handler(state: &ServerState, action: Action, card: Option<Card>) -> Fallible<()> {
    let today = Date::today();
    let mut mutable = state.mutable.lock().unwrap();
    // The week may have turned since the page was rendered.
    mutable.store.load(today)?;
    match action {
        Action::Use => {
            let Some(card) = card else {
                return fail("no card given.");
            };
            match mutable.store.mark_used(card)? {
                MarkOutcome::Marked => {
                    mutable.highlight = Some(card);
                }
                MarkOutcome::AlreadyUsed => {
                    log::debug!("{} is already used.", card.slug());
                }
            }
        }
        Action::Reset => {
            mutable.store.reset_all(today)?;
            mutable.highlight = None;
        }
    }
    Ok(())
}

//! Panel page: logout, create-game form, game cards.

use leptos::prelude::*;

use super::game::GameCard;
use crate::services::fetch::GameCardData;

#[component]
pub fn PanelPage(cards: Vec<GameCardData>, notice: Option<String>) -> impl IntoView {
    view! {
        <main class="panel">
            <form method="post" action="/logout">
                <button type="submit" class="logout-button">"Log out"</button>
            </form>
            {notice.map(|message| view! { <p class="notice">{message}</p> })}
            <form method="post" action="/panel/games" class="create-game">
                <p class="label">"Game title"</p>
                <div class="input-frame input-title">
                    <input type="text" name="title" class="form-input"/>
                </div>
                <p class="label">"Description"</p>
                <div class="input-frame input-description">
                    <input type="text" name="description" class="form-input"/>
                    <button type="reset" class="clear" title="Clear">"✕"</button>
                </div>
                <button type="submit" class="submit-button">"Add"</button>
            </form>
            <section class="games">
                {cards.into_iter().map(|card| view! { <GameCard card=card/> }).collect_view()}
            </section>
        </main>
    }
}

//! One game card: details, score buttons, comment form, comment list.

use leptos::prelude::*;

use crate::api::Score;
use crate::services::fetch::GameCardData;

/// Render an average with at most two decimals and no trailing zeros.
pub(crate) fn format_average(average: f64) -> String {
    let fixed = format!("{average:.2}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// Element id used as the redirect anchor after a mutation on this game.
pub(crate) fn anchor_id(game_id: &str) -> String {
    format!("game-{game_id}")
}

#[component]
pub fn GameCard(card: GameCardData) -> impl IntoView {
    let GameCardData { game, comments, score } = card;

    let score_line = format!("Score: {} Count: {}", format_average(score.average), score.count);
    let score_action = format!("/panel/games/{}/scores", game.id);
    let comment_action = format!("/panel/games/{}/comments", game.id);

    let score_buttons = Score::all()
        .map(|score| {
            let value = score.value().to_string();
            let label = value.clone();
            view! {
                <button type="submit" name="score" value=value class="score-button">
                    {label}
                </button>
            }
        })
        .collect_view();

    let comment_list = (!comments.is_empty()).then(move || {
        view! {
            <div class="comments">
                <p class="comments-header">"COMMENTS:"</p>
                {comments
                    .into_iter()
                    .map(|comment| {
                        view! {
                            <div class="comment">
                                <p>{format!("Author: {}", comment.author)}</p>
                                <p>{comment.text}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        }
    });

    view! {
        <article class="game" id=anchor_id(&game.id)>
            <p>{format!("Title: {}", game.title)}</p>
            <p>{format!("Description: {}", game.description)}</p>
            <p class="score">{score_line}</p>
            <p>{format!("Added by: {}", game.author_id)}</p>
            <form method="post" action=score_action class="scores">
                {score_buttons}
            </form>
            <form method="post" action=comment_action class="comment-form">
                <p class="label">"Comment"</p>
                <div class="input-frame">
                    <input type="text" name="comment" class="form-input"/>
                    <button type="reset" class="clear" title="Clear">"✕"</button>
                </div>
                <button type="submit" class="submit-button">"Post comment"</button>
            </form>
            {comment_list}
        </article>
    }
}

//! Login / registration form.

use leptos::prelude::*;

use crate::services::auth::AuthMode;

#[component]
pub fn AuthPage(mode: AuthMode, error: Option<String>) -> impl IntoView {
    let other = mode.other();

    view! {
        <main class="auth">
            <h1>{mode.title()}</h1>
            {error.map(|message| view! { <p class="error">{message}</p> })}
            <form method="post" action=mode.path() class="auth-form">
                <p class="label">"Username"</p>
                <div class="input-frame input-username">
                    <input type="text" name="username" class="form-input" autocomplete="username"/>
                </div>
                <p class="label">"Password"</p>
                <div class="input-frame input-password">
                    <input type="password" name="password" class="form-input"/>
                    <button type="reset" class="clear" title="Clear">"✕"</button>
                </div>
                <button type="submit" class="submit-button">{mode.title()}</button>
            </form>
            <p class="switch">
                <a href=other.path()>{other.title()}</a>
            </p>
        </main>
    }
}

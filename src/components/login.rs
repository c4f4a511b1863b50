//! Login / Register Screens

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::auth;
use crate::context::use_app_context;
use crate::draft::required;
use crate::liveness::Liveness;
use crate::routes::Route;

#[component]
pub fn Login() -> impl IntoView {
    let ctx = use_app_context();
    let alive = Liveness::for_current_owner();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let email_value = email.get_untracked();
        let password_value = password.get_untracked();
        let email_value = match required(&email_value, "Email") {
            Ok(value) => value.to_string(),
            Err(msg) => {
                set_error.set(Some(msg));
                return;
            }
        };
        if password_value.is_empty() {
            set_error.set(Some("Password is required".to_string()));
            return;
        }

        set_error.set(None);
        set_submitting.set(true);
        let ctx = ctx.clone();
        let alive = alive.clone();
        spawn_local(async move {
            let result = auth::login(&ctx.api(), &email_value, &password_value).await;
            if !alive.is_alive() {
                return;
            }
            set_submitting.set(false);
            match result {
                Ok(()) => {
                    log::info!("[AUTH] logged in as {}", email_value);
                    ctx.navigate(Route::Projects);
                }
                Err(err) => set_error.set(Some(err.user_message("Login failed"))),
            }
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-form" on:submit=on_submit>
                <h2>"Login"</h2>
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
                <button type="submit" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Logging in..." } else { "Login" }}
                </button>
                <p class="auth-switch">
                    "No account? "
                    <a href=Route::Register.to_hash()>"Register"</a>
                </p>
            </form>
        </div>
    }
}

#[component]
pub fn Register() -> impl IntoView {
    let ctx = use_app_context();
    let alive = Liveness::for_current_owner();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let email_value = email.get_untracked();
        let password_value = password.get_untracked();
        let email_value = match required(&email_value, "Email") {
            Ok(value) => value.to_string(),
            Err(msg) => {
                set_error.set(Some(msg));
                return;
            }
        };
        if password_value.is_empty() {
            set_error.set(Some("Password is required".to_string()));
            return;
        }

        set_error.set(None);
        set_submitting.set(true);
        let ctx = ctx.clone();
        let alive = alive.clone();
        spawn_local(async move {
            let result = auth::register(&ctx.api(), &email_value, &password_value).await;
            if !alive.is_alive() {
                return;
            }
            set_submitting.set(false);
            match result {
                Ok(_) => {
                    log::info!("[AUTH] registered {}", email_value);
                    ctx.navigate(Route::Login);
                }
                Err(err) => set_error.set(Some(err.user_message("Registration failed"))),
            }
        });
    };

    view! {
        <div class="auth-page">
            <form class="auth-form" on:submit=on_submit>
                <h2>"Register"</h2>
                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                {move || error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
                <button type="submit" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Registering..." } else { "Register" }}
                </button>
                <p class="auth-switch">
                    "Already registered? "
                    <a href=Route::Login.to_hash()>"Login"</a>
                </p>
            </form>
        </div>
    }
}

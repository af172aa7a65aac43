//! Login/register modal plus the signed-in account controls.
//!
//! SYSTEM CONTEXT
//! ==============
//! Lives in the nav bar. Logged out, it offers Login and Register buttons
//! that open a modal form; logged in, it shows the user's name and a Logout
//! button. All session changes go through the `ClientSession` context, and
//! the rendered state follows the `RwSignal<AuthState>` it publishes to.

#[cfg(test)]
#[path = "auth_modal_test.rs"]
mod auth_modal_test;

use leptos::prelude::*;
use session::{AuthError, Credentials, Registration};

use crate::app::ClientSession;
use crate::state::auth::AuthState;

/// How long a success message stays up before the modal moves on.
#[cfg(feature = "csr")]
const SUCCESS_DELAY_MS: u32 = 1500;

const LOGIN_SUCCESS: &str = "Login successful!";
const REGISTER_SUCCESS: &str = "Registration successful! Please log in.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
        }
    }

    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Login => "Need an account? Register",
            Self::Register => "Already have an account? Login",
        }
    }

    /// Text shown after a successful submit in this mode.
    pub fn success_message(self) -> &'static str {
        match self {
            Self::Login => LOGIN_SUCCESS,
            Self::Register => REGISTER_SUCCESS,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }
}

/// Feedback line under the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthMessage {
    Success(String),
    Error(String),
}

impl AuthMessage {
    pub fn class(&self) -> &'static str {
        match self {
            Self::Success(_) => "alert alert--success",
            Self::Error(_) => "alert alert--error",
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Error(text) => text,
        }
    }
}

/// Raw form fields as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

pub(crate) fn validate_login_input(form: &AuthForm) -> Result<Credentials, &'static str> {
    let email = form.email.trim();
    if email.is_empty() || form.password.is_empty() {
        return Err("Enter your email and password.");
    }
    Ok(Credentials::new(email, form.password.clone()))
}

pub(crate) fn validate_register_input(form: &AuthForm) -> Result<Registration, &'static str> {
    let name = form.name.trim();
    let email = form.email.trim();
    if name.is_empty() || email.is_empty() || form.password.is_empty() || form.confirm_password.is_empty() {
        return Err("Fill in every field.");
    }
    if form.password != form.confirm_password {
        return Err("Passwords do not match");
    }
    Ok(Registration {
        name: name.to_owned(),
        email: email.to_owned(),
        password: form.password.clone(),
        confirm_password: form.confirm_password.clone(),
    })
}

/// User-facing text for a failed login or registration.
pub(crate) fn auth_error_message(err: &AuthError) -> String {
    match err {
        AuthError::Rejected(text) if text.trim().is_empty() => "Authentication failed".to_owned(),
        other => other.to_string(),
    }
}

/// Account controls for the nav bar.
#[component]
pub fn AuthModal() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = expect_context::<ClientSession>();

    let mode = RwSignal::new(AuthMode::Login);
    let open = RwSignal::new(false);
    let busy = RwSignal::new(false);
    let message = RwSignal::new(None::<AuthMessage>);
    let form = RwSignal::new(AuthForm::default());
    let logged_in = Memo::new(move |_| auth.with(|s| s.user.is_some()));

    let open_with = Callback::new(move |next: AuthMode| {
        mode.set(next);
        message.set(None);
        form.set(AuthForm::default());
        open.set(true);
    });

    let toggle = Callback::new(move |()| {
        mode.update(|m| *m = m.toggled());
        message.set(None);
        form.set(AuthForm::default());
    });

    let logout_session = session.clone();
    let logout = Callback::new(move |()| {
        logout_session.logout();
        open.set(false);
    });

    let submit = Callback::new(move |()| {
        if busy.get_untracked() {
            return;
        }
        message.set(None);
        let fields = form.get_untracked();

        match mode.get_untracked() {
            AuthMode::Login => {
                let credentials = match validate_login_input(&fields) {
                    Ok(credentials) => credentials,
                    Err(text) => {
                        message.set(Some(AuthMessage::Error(text.to_owned())));
                        return;
                    }
                };
                busy.set(true);

                #[cfg(feature = "csr")]
                {
                    let session = session.clone();
                    leptos::task::spawn_local(async move {
                        match session.sign_in(&credentials).await {
                            Ok(_) => {
                                message.set(Some(AuthMessage::Success(AuthMode::Login.success_message().to_owned())));
                                busy.set(false);
                                gloo_timers::future::TimeoutFuture::new(SUCCESS_DELAY_MS).await;
                                form.set(AuthForm::default());
                                message.set(None);
                                open.set(false);
                            }
                            Err(e) => {
                                message.set(Some(AuthMessage::Error(auth_error_message(&e))));
                                busy.set(false);
                            }
                        }
                    });
                }
                #[cfg(not(feature = "csr"))]
                {
                    let _ = (&session, credentials);
                    busy.set(false);
                }
            }
            AuthMode::Register => {
                let registration = match validate_register_input(&fields) {
                    Ok(registration) => registration,
                    Err(text) => {
                        message.set(Some(AuthMessage::Error(text.to_owned())));
                        return;
                    }
                };
                busy.set(true);

                #[cfg(feature = "csr")]
                {
                    let session = session.clone();
                    leptos::task::spawn_local(async move {
                        match session.register(&registration).await {
                            Ok(()) => {
                                message.set(Some(AuthMessage::Success(AuthMode::Register.success_message().to_owned())));
                                busy.set(false);
                                gloo_timers::future::TimeoutFuture::new(SUCCESS_DELAY_MS).await;
                                mode.set(AuthMode::Login);
                                form.update(|f| {
                                    f.name.clear();
                                    f.confirm_password.clear();
                                });
                            }
                            Err(e) => {
                                message.set(Some(AuthMessage::Error(auth_error_message(&e))));
                                busy.set(false);
                            }
                        }
                    });
                }
                #[cfg(not(feature = "csr"))]
                {
                    let _ = (&session, registration);
                    busy.set(false);
                }
            }
        }
    });

    let feedback = move || {
        message.get().map(|m| {
            let class = m.class();
            let text = m.text().to_owned();
            view! {
                <div class=class>
                    <span>{text}</span>
                </div>
            }
        })
    };

    let controls = move || {
        if logged_in.get() {
            view! {
                <div class="navbar__account">
                    <span class="navbar__user">
                        {move || auth.with(|s| s.display_name().unwrap_or_default().to_owned())}
                    </span>
                    <button class="btn btn--ghost" on:click=move |_| logout.run(())>"Logout"</button>
                </div>
            }
            .into_any()
        } else {
            view! {
                <button class="btn btn--ghost" on:click=move |_| open_with.run(AuthMode::Login)>"Login"</button>
                <button class="btn btn--ghost" on:click=move |_| open_with.run(AuthMode::Register)>"Register"</button>
            }
            .into_any()
        }
    };

    view! {
        {controls}
        <Show when=move || open.get()>
            <div class="dialog-backdrop" on:click=move |_| open.set(false)>
                <div class="dialog dialog--auth" on:click=move |ev| ev.stop_propagation()>
                    <div class="dialog__header">
                        <h3>{move || mode.get().title()}</h3>
                        <button class="btn btn--circle" on:click=move |_| open.set(false)>"✕"</button>
                    </div>
                    <form
                        class="auth-form"
                        on:submit=move |ev: leptos::ev::SubmitEvent| {
                            ev.prevent_default();
                            submit.run(());
                        }
                    >
                        <Show when=move || mode.get() == AuthMode::Register>
                            <label class="label">"Name"</label>
                            <input
                                class="input"
                                type="text"
                                required=true
                                prop:value=move || form.with(|f| f.name.clone())
                                on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                            />
                        </Show>
                        <label class="label">"Email"</label>
                        <input
                            class="input"
                            type="email"
                            required=true
                            prop:value=move || form.with(|f| f.email.clone())
                            on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                        />
                        <label class="label">"Password"</label>
                        <input
                            class="input"
                            type="password"
                            required=true
                            prop:value=move || form.with(|f| f.password.clone())
                            on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                        />
                        <Show when=move || mode.get() == AuthMode::Register>
                            <label class="label">"Confirm Password"</label>
                            <input
                                class="input"
                                type="password"
                                required=true
                                prop:value=move || form.with(|f| f.confirm_password.clone())
                                on:input=move |ev| form.update(|f| f.confirm_password = event_target_value(&ev))
                            />
                        </Show>
                        {feedback}
                        <div class="auth-form__actions">
                            <button type="submit" class="btn btn--primary" disabled=move || busy.get()>
                                {move || mode.get().title()}
                            </button>
                            <button type="button" class="btn btn--link" on:click=move |_| toggle.run(())>
                                {move || mode.get().toggle_label()}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}

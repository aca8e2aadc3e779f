//! Signed-in user's profile.

use leptos::prelude::*;

use crate::auth::{AuthGuard, use_auth};

#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <AuthGuard require_auth=true>
            <ProfileDetails/>
        </AuthGuard>
    }
}

#[component]
fn ProfileDetails() -> impl IntoView {
    let auth = use_auth();

    view! {
        <div class="profile">
            <h1>{move || auth.user().map(|u| u.display_name()).unwrap_or_default()}</h1>
            <dl>
                <dt>"Username"</dt>
                <dd>{move || auth.user().map(|u| u.username).unwrap_or_default()}</dd>
                <dt>"Email"</dt>
                <dd>{move || auth.user().map(|u| u.email).unwrap_or_default()}</dd>
                <dt>"Role"</dt>
                <dd>{move || if auth.state.with(|s| s.is_admin()) { "Staff" } else { "Supporter" }}</dd>
            </dl>
            <button class="profile__logout" on:click=move |_| auth.logout()>"Log out"</button>
        </div>
    }
}

//! Public landing page.

use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <main class="home">
            <h1>"Vanya Foundation"</h1>
            <p>"Empowering communities through education, health and environmental initiatives."</p>
            <nav class="home__nav">
                <a href="/login">"Sign in"</a>
                <a href="/profile">"My profile"</a>
                <a href="/admin/dashboard">"Admin"</a>
            </nav>
        </main>
    }
}

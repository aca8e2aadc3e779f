//! Root application component with routing and the auth provider.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::auth::AuthProvider;
use crate::pages::{
    admin_dashboard::AdminDashboardPage, home::HomePage, login::LoginPage, profile::ProfilePage,
};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Mounts `AuthProvider` once above the router so every route shares the
/// same session.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/vanya.css"/>
        <Title text="Vanya Foundation"/>

        <AuthProvider>
            <Router>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("admin") view=LoginPage/>
                    <Route path=(StaticSegment("admin"), StaticSegment("dashboard")) view=AdminDashboardPage/>
                    <Route path=StaticSegment("profile") view=ProfilePage/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

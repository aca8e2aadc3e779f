//! Admin dashboard listing donations and volunteer applications.
//!
//! SYSTEM CONTEXT
//! ==============
//! Staff-only route behind `AdminAuthGuard`. Listings are read-only views of
//! backend records fetched with the session token; a 401 triggers one
//! refresh-and-retry through the auth context.

#[cfg(test)]
#[path = "admin_dashboard_test.rs"]
mod admin_dashboard_test;

use leptos::prelude::*;

use crate::auth::{AdminAuthGuard, use_auth};
use crate::net::types::{Donation, Volunteer};

/// Headline numbers shown above the listings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardStats {
    pub donation_count: usize,
    /// Sum of parseable donation amounts.
    pub total_amount: f64,
    pub volunteer_count: usize,
    pub pending_volunteers: usize,
}

impl DashboardStats {
    #[must_use]
    pub fn summarize(donations: &[Donation], volunteers: &[Volunteer]) -> Self {
        let total_amount = donations
            .iter()
            .filter_map(|d| d.amount.trim().parse::<f64>().ok())
            .sum();
        let pending_volunteers = volunteers
            .iter()
            .filter(|v| v.status.eq_ignore_ascii_case("pending"))
            .count();
        Self {
            donation_count: donations.len(),
            total_amount,
            volunteer_count: volunteers.len(),
            pending_volunteers,
        }
    }
}

#[component]
pub fn AdminDashboardPage() -> impl IntoView {
    view! {
        <AdminAuthGuard>
            <DashboardContent/>
        </AdminAuthGuard>
    }
}

#[component]
fn DashboardContent() -> impl IntoView {
    let auth = use_auth();
    let donations = RwSignal::new(Vec::<Donation>::new());
    let volunteers = RwSignal::new(Vec::<Volunteer>::new());
    let error = RwSignal::new(None::<String>);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        use crate::net::api::{AdminApi, ApiError, HttpApi};

        let api = HttpApi::default();
        let loaded = auth
            .authorized(|token| {
                let api = api.clone();
                async move {
                    let d = api.list_donations(&token).await?;
                    let v = api.list_volunteers(&token).await?;
                    Ok::<_, ApiError>((d, v))
                }
            })
            .await;
        match loaded {
            Ok((d, v)) => {
                let _ = donations.try_set(d);
                let _ = volunteers.try_set(v);
            }
            Err(e) => {
                log::error!("dashboard load failed: {e}");
                let _ = error.try_set(Some(e.to_string()));
            }
        }
    });

    let stats = move || DashboardStats::summarize(&donations.get(), &volunteers.get());
    let greeting = move || auth.user().map(|u| u.display_name()).unwrap_or_default();

    view! {
        <div class="dashboard">
            <header class="dashboard__header">
                <h1>"Admin Dashboard"</h1>
                <span class="dashboard__user">{greeting}</span>
                <button class="dashboard__logout" on:click=move |_| auth.logout()>"Log out"</button>
            </header>
            <Show when=move || error.get().is_some()>
                <p class="dashboard__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <section class="dashboard__stats">
                <p>"Donations: " {move || stats().donation_count}</p>
                <p>"Total raised: " {move || format!("{:.2}", stats().total_amount)}</p>
                <p>"Volunteers: " {move || stats().volunteer_count}</p>
                <p>"Pending applications: " {move || stats().pending_volunteers}</p>
            </section>
            <section class="dashboard__donations">
                <h2>"Donations"</h2>
                <table>
                    <thead>
                        <tr><th>"Donor"</th><th>"Amount"</th><th>"Purpose"</th><th>"Date"</th><th>"Status"</th></tr>
                    </thead>
                    <tbody>
                        <For each=move || donations.get() key=|d| d.id let:d>
                            <tr>
                                <td>{d.donor}</td>
                                <td>{d.amount}</td>
                                <td>{d.purpose}</td>
                                <td>{d.date}</td>
                                <td>{d.status}</td>
                            </tr>
                        </For>
                    </tbody>
                </table>
            </section>
            <section class="dashboard__volunteers">
                <h2>"Volunteers"</h2>
                <table>
                    <thead>
                        <tr><th>"Name"</th><th>"Email"</th><th>"Phone"</th><th>"Area"</th><th>"Status"</th><th>"Joined"</th></tr>
                    </thead>
                    <tbody>
                        <For each=move || volunteers.get() key=|v| v.id let:v>
                            <tr>
                                <td>{v.name}</td>
                                <td>{v.email}</td>
                                <td>{v.phone}</td>
                                <td>{v.area}</td>
                                <td>{v.status}</td>
                                <td>{v.join_date}</td>
                            </tr>
                        </For>
                    </tbody>
                </table>
            </section>
        </div>
    }
}

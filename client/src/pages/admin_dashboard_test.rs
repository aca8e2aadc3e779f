use super::*;

fn donation(id: i64, amount: &str) -> Donation {
    Donation {
        id,
        donor: format!("donor-{id}"),
        amount: amount.to_owned(),
        purpose: "Education".to_owned(),
        date: "2025-03-01".to_owned(),
        status: "Completed".to_owned(),
    }
}

fn volunteer(id: i64, status: &str) -> Volunteer {
    Volunteer {
        id,
        name: format!("v-{id}"),
        email: String::new(),
        phone: String::new(),
        area: "Health".to_owned(),
        status: status.to_owned(),
        join_date: String::new(),
    }
}

#[test]
fn summarize_empty_lists() {
    assert_eq!(DashboardStats::summarize(&[], &[]), DashboardStats::default());
}

#[test]
fn summarize_totals_amounts_and_counts_pending() {
    let donations = [donation(1, "100.50"), donation(2, " 49.50 ")];
    let volunteers = [volunteer(1, "Pending"), volunteer(2, "Active"), volunteer(3, "pending")];
    let stats = DashboardStats::summarize(&donations, &volunteers);
    assert_eq!(stats.donation_count, 2);
    assert!((stats.total_amount - 150.0).abs() < f64::EPSILON);
    assert_eq!(stats.volunteer_count, 3);
    assert_eq!(stats.pending_volunteers, 2);
}

#[test]
fn summarize_skips_unparseable_amounts() {
    let stats = DashboardStats::summarize(&[donation(1, "n/a"), donation(2, "10")], &[]);
    assert_eq!(stats.donation_count, 2);
    assert!((stats.total_amount - 10.0).abs() < f64::EPSILON);
}

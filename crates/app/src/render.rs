//! Plain-text rendering of page state

use std::fmt::Write;

use bookfair_core::{Dashboard, Profile, ReservationStatus, User, Vendor};

use crate::viewmodel::{BusinessesPage, ReservationsPage, StallMapPage};

pub fn user(user: &User) -> String {
    format!(
        "{} <{}> ({}, id {})",
        user.name, user.email, user.role, user.user_id
    )
}

pub fn dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    for card in &dashboard.stats {
        let _ = writeln!(out, "{:<16} {:>4}", card.title, card.value);
    }
    if !dashboard.recent_activity.is_empty() {
        out.push_str("\nRecent activity\n");
        for activity in &dashboard.recent_activity {
            let _ = writeln!(
                out,
                "  {:<24} {:<16} {:<12} {}",
                activity.publisher, activity.stalls, activity.time, activity.status
            );
        }
    }
    out
}

pub fn stall_map(page: &StallMapPage) -> String {
    if page.stalls().is_empty() {
        return "No stalls\n".to_string();
    }
    let counts = page.counts();
    let mut out = format!(
        "{} stalls: {} reserved, {} available\n",
        counts.total, counts.reserved, counts.available
    );
    for (size, stalls) in page.sections() {
        let _ = writeln!(out, "\n[{}]", size);
        for stall in stalls {
            let _ = writeln!(
                out,
                "  {:<6} {:<10} {}",
                stall.id,
                stall.status,
                stall.publisher.as_deref().unwrap_or("")
            );
        }
    }
    out
}

pub fn reservations(
    page: &ReservationsPage,
    term: &str,
    status: Option<ReservationStatus>,
) -> String {
    let reservations = page.search(term, status);
    if reservations.is_empty() {
        return "No reservations\n".to_string();
    }
    let mut out = String::new();
    for r in reservations {
        let _ = writeln!(
            out,
            "{:<6} {:<24} {:<16} {:<10} email {}",
            r.id,
            r.publisher,
            r.stalls.join(", "),
            r.status,
            if r.email_sent { "sent" } else { "pending" }
        );
    }
    let _ = writeln!(out, "\n{} awaiting confirmation email", page.pending_email());
    out
}

pub fn vendors(vendors: &[&Vendor]) -> String {
    if vendors.is_empty() {
        return "No vendors found\n".to_string();
    }
    let mut out = String::new();
    for v in vendors {
        let _ = writeln!(
            out,
            "{:<6} {:<24} {:<28} {}",
            v.id,
            v.name,
            v.email,
            v.stalls.join(", ")
        );
    }
    out
}

pub fn businesses(page: &BusinessesPage) -> String {
    let mut out = format!(
        "{} businesses, {} verified\n",
        page.businesses().len(),
        page.verified()
    );
    for b in page.businesses() {
        let _ = writeln!(
            out,
            "#{:<4} {:<24} {:<10} {:<12} {}",
            b.business_id,
            b.name,
            b.registration_number,
            b.contact_number,
            if b.verified { "verified" } else { "unverified" }
        );
    }
    out
}

pub fn profile(profile: &Profile) -> String {
    let rows = [
        ("Employee ID", &profile.employee_id),
        ("First name", &profile.first_name),
        ("Last name", &profile.last_name),
        ("Email", &profile.email),
        ("Phone", &profile.phone),
        ("Address", &profile.address),
        ("Role", &profile.role),
        ("Date of birth", &profile.dob),
        ("NIC", &profile.nic),
        ("Joined", &profile.joined),
        ("Last login", &profile.last_login),
    ];
    let mut out = String::new();
    for (label, value) in rows {
        let _ = writeln!(out, "{:<14} {}", label, value);
    }
    out
}

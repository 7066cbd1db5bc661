//! Seed data loaded into a fresh mock store

use crate::models::{
    Activity, Business, Dashboard, Profile, Reservation, ReservationStatus, StatCard, Stall,
    StallSize, StallStatus, Vendor,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn profile() -> Profile {
    Profile {
        employee_id: "CMBF001".to_string(),
        first_name: "Nuwan".to_string(),
        last_name: "Perera".to_string(),
        email: "admin@bookfair.lk".to_string(),
        phone: "+94 77 123 4567".to_string(),
        address: "No. 123, Main Street, Colombo, Sri Lanka".to_string(),
        role: "Administrator".to_string(),
        dob: "1990-07-15".to_string(),
        nic: "901234567V".to_string(),
        joined: "Jan 10, 2023".to_string(),
        last_login: "Nov 2, 2025, 09:15 AM".to_string(),
        avatar: "https://ui-avatars.com/api/?name=Nuwan+Perera&background=0D8ABC&color=fff"
            .to_string(),
        source_user_id: None,
        source_genres: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn reservation(
    id: &str,
    publisher: &str,
    contact: &str,
    email: &str,
    stalls: &[&str],
    genre: &str,
    email_sent: bool,
    status: ReservationStatus,
    qr_code: &str,
) -> Reservation {
    Reservation {
        id: id.to_string(),
        publisher: publisher.to_string(),
        contact: contact.to_string(),
        email: email.to_string(),
        stalls: strings(stalls),
        genre: genre.to_string(),
        email_sent,
        status,
        qr_code: qr_code.to_string(),
    }
}

pub fn reservations() -> Vec<Reservation> {
    vec![
        reservation(
            "R001",
            "Sarasavi Bookshop",
            "+94 77 123 4567",
            "info@sarasavi.lk",
            &["A12", "A13"],
            "General Books",
            true,
            ReservationStatus::Confirmed,
            "QR001",
        ),
        reservation(
            "R002",
            "Vijitha Yapa",
            "+94 77 234 5678",
            "contact@vijithayapa.com",
            &["B05"],
            "Academic",
            false,
            ReservationStatus::Pending,
            "QR002",
        ),
        reservation(
            "R003",
            "Godage Publishers",
            "+94 77 345 6789",
            "info@godagepublishers.lk",
            &["C20", "C21", "C22"],
            "Literature",
            true,
            ReservationStatus::Confirmed,
            "QR003",
        ),
    ]
}

pub fn stalls() -> Vec<Stall> {
    vec![
        Stall {
            id: "A01".to_string(),
            size: StallSize::Small,
            status: StallStatus::Reserved,
            publisher: Some("Sarasavi Bookshop".to_string()),
        },
        Stall::available("A02", StallSize::Small),
        Stall {
            id: "B01".to_string(),
            size: StallSize::Medium,
            status: StallStatus::Reserved,
            publisher: Some("Vijitha Yapa".to_string()),
        },
        Stall::available("C01", StallSize::Large),
    ]
}

pub fn vendors() -> Vec<Vendor> {
    vec![
        Vendor {
            id: "V001".to_string(),
            name: "Sarasavi Bookshop".to_string(),
            contact: "+94 77 123 4567".to_string(),
            email: "info@sarasavi.lk".to_string(),
            stalls: strings(&["A12", "A13"]),
            category: "General Books".to_string(),
        },
        Vendor {
            id: "V002".to_string(),
            name: "Vijitha Yapa".to_string(),
            contact: "+94 77 234 5678".to_string(),
            email: "contact@vijithayapa.com".to_string(),
            stalls: strings(&["B05"]),
            category: "Academic".to_string(),
        },
    ]
}

pub fn businesses() -> Vec<Business> {
    vec![
        Business {
            business_id: 1,
            name: "Sarasavi Publishers".to_string(),
            registration_number: "SAR-001".to_string(),
            contact_number: "0112233445".to_string(),
            address: "Colombo".to_string(),
            created_at: "2025-11-10T20:20:56.825578".to_string(),
            verified: true,
        },
        Business {
            business_id: 2,
            name: "MD Gunasena".to_string(),
            registration_number: "MDG-002".to_string(),
            contact_number: "0114567890".to_string(),
            address: "Colombo".to_string(),
            created_at: "2025-11-10T20:20:56.921703".to_string(),
            verified: true,
        },
    ]
}

pub fn dashboard() -> Dashboard {
    let stat = |title: &str, value: u32, color: &str| StatCard {
        title: title.to_string(),
        value,
        color: color.to_string(),
    };
    let activity = |publisher: &str, stalls: &str, time: &str, status: &str| Activity {
        publisher: publisher.to_string(),
        stalls: stalls.to_string(),
        time: time.to_string(),
        status: status.to_string(),
    };

    Dashboard {
        stats: vec![
            stat("Total Stalls", 4, "text-primary"),
            stat("Reserved", 2, "text-green-600"),
            stat("Available", 2, "text-highlight"),
            stat("Pending Email", 1, "text-destructive"),
        ],
        recent_activity: vec![
            activity("Sarasavi Bookshop", "A12, A13", "2 hours ago", "confirmed"),
            activity("Vijitha Yapa", "B05", "5 hours ago", "pending"),
            activity("Godage Publishers", "C20, C21, C22", "1 day ago", "confirmed"),
        ],
    }
}

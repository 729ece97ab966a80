//! ShareIt Domain Concerns

pub mod bookings;
pub mod items;
pub mod requests;
pub mod users;

//! Attendance-control core: daily location check-ins, home/not-home
//! classification, administrator reports and the scheduled job set. The chat
//! transport plugs in through the [`sender::Sender`] capability.

pub mod admins;
pub mod checkin;
pub mod clock;
pub mod config;
pub mod context;
pub mod geo;
pub mod jobs;
pub mod models;
pub mod reports;
pub mod scheduler;
pub mod sender;
pub mod store;

pub mod checkin;
pub mod describe;
pub mod registration;

pub use checkin::CheckInService;
pub use registration::{NewAttendee, RegistrationService};

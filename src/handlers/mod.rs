pub mod checkin;
pub mod events;
pub mod registration;

pub use checkin::{check_in_attendee, CheckInRequest};
pub use events::{
    create_event, describe_event, get_event, get_events, CreateEventRequest, DescribeRequest,
    DescribeResponse, EventDetailsResponse,
};
pub use registration::register_attendee;

/// Business logic services
pub mod auth;
pub mod meetings;

pub use auth::AuthService;
pub use meetings::MeetingService;

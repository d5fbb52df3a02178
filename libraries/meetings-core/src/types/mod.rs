mod filter;
mod ids;
mod meeting;
mod user;

pub use filter::{parse_date_bound, DateRange, ListParams, MeetingFilter, Visibility};
pub use ids::{MeetingId, UserId};
pub use meeting::{
    referenced_users, DeleteManyResult, Meeting, MeetingStatus, NewMeeting, StoredMeeting,
    UpdateMeeting,
};
pub use user::{CreateUser, User, UserRef, UserRole};

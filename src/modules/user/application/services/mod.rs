mod authenticate_service;
mod delete_message_service;
mod delete_user_service;
mod fetch_user_service;
mod follow_status_service;
mod follow_user_service;
mod post_message_service;
mod signup_service;
mod unfollow_user_service;

pub use authenticate_service::AuthenticateService;
pub use delete_message_service::DeleteMessageService;
pub use delete_user_service::DeleteUserService;
pub use fetch_user_service::FetchUserService;
pub use follow_status_service::FollowStatusService;
pub use follow_user_service::FollowUserService;
pub use post_message_service::PostMessageService;
pub use signup_service::SignupService;
pub use unfollow_user_service::UnfollowUserService;

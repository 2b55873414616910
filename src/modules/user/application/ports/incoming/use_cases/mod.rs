mod authenticate;
mod delete_message;
mod delete_user;
mod fetch_user;
mod follow_status;
mod follow_user;
mod post_message;
mod signup;
mod unfollow_user;

pub use authenticate::{AuthenticateCommand, AuthenticateError, AuthenticateUseCase};
pub use delete_message::{DeleteMessageError, DeleteMessageUseCase};
pub use delete_user::{DeleteUserError, DeleteUserUseCase};
pub use fetch_user::{FetchUserError, FetchUserUseCase};
pub use follow_status::{FollowStatus, FollowStatusError, FollowStatusUseCase};
pub use follow_user::{FollowUserError, FollowUserUseCase};
pub use post_message::{
    PostMessageCommand, PostMessageCommandError, PostMessageError, PostMessageUseCase,
};
pub use signup::{SignupCommand, SignupError, SignupFields, SignupUseCase, ValidationError};
pub use unfollow_user::{UnfollowUserError, UnfollowUserUseCase};

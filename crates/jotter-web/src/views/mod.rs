//! Routed pages

mod login;
mod notes;
mod signup;

pub use login::Login;
pub use notes::Notes;
pub use signup::Signup;

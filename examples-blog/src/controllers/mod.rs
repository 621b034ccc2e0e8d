pub mod blog;
pub mod login;

pub use blog::BlogController;
pub use login::LoginController;

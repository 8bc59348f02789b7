pub mod articles;
pub mod login;
pub mod reference;

pub mod guest;
pub mod passport;
pub mod security;

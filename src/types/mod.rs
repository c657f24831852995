pub mod error;
pub mod group;
pub mod invite;
pub mod response;
pub mod token;
pub mod user;

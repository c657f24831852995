pub mod create;
pub mod invite;

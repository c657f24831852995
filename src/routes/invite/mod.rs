pub mod accept;
pub mod revoke;

pub mod code;
pub mod lifecycle;
pub mod membership;

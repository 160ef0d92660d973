pub mod errors;
pub mod session;
pub mod transfer;

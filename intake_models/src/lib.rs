pub mod client;
pub mod email_address;
pub mod intake;
pub mod lead;
pub mod rate_limit;
pub mod sanitize;
pub mod step;
pub mod validate;

pub mod admin;
pub mod create;
pub mod dispatch;
pub mod resolve;
pub mod schema;

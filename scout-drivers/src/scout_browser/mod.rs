pub mod driver;
pub mod page;
pub mod session;
pub mod stealth;

pub mod driver;
pub mod launch;
pub mod page;
pub mod probe;
pub mod session;

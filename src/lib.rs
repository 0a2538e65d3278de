pub mod appsettings;
pub mod birthday;
pub mod delivery;
pub mod notification;
pub mod occurrence;
pub mod runner;
pub mod scheduling;
pub mod service;
pub mod storage;
pub mod urgency;
pub mod user;

#[cfg(test)]
mod test_utils;

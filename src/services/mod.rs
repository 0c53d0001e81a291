//! Service wiring
//!
//! Builds the collaborators from `Config` and hands them to the dispatcher
//! as trait objects, so each routine receives its configuration explicitly.

pub mod simple_container;

pub use simple_container::SimpleServices;

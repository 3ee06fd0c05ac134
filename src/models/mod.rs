pub mod admin;
pub mod application;
pub mod contact;
pub mod job;
pub mod project;
pub mod service;

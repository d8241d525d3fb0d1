//! HTTP request handlers

pub mod basic;
pub mod process;
pub mod upload;

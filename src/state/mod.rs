/// State management module
///
/// This module handles all application state, including:
/// - Display models for images and sources (data.rs)
/// - The query view state and its transitions (query.rs)
/// - Transient notifications and the toast queue (notify.rs)

pub mod data;
pub mod notify;
pub mod query;

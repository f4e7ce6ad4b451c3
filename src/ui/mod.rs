//! UI module - contains UI rendering components
//!
//! Form controls and status banners shared by the app views.

pub mod components;

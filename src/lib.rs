//! Derma Scan - Skin-condition self-check workflow
//!
//! This crate captures a photo of a skin area, collects symptom details,
//! runs an assessment, routes the user to self-care or a doctor referral
//! and keeps a device-local history of finished scans.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

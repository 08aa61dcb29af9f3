//! API endpoint handlers, one module per resource.
//!
//! Handlers stay thin: they open a connection, call into the domain
//! modules, and map failures onto the shared error shape.

pub mod calculators;
pub mod dashboard;
pub mod exams;
pub mod flashcards;
pub mod health;
pub mod learning;
pub mod medications;
pub mod protocols;
pub mod questions;
pub mod reference;
pub mod seed;
pub mod study_notes;

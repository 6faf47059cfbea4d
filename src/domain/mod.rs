//! Domain layer containing click tracking entities and contracts.
//!
//! # Architecture
//!
//! - [`calendar`] - UTC day and hour bucketing
//! - [`entities`] - Daily and cumulative click counters
//! - [`repositories`] - Storage and destination registry trait definitions
//! - [`click_event`] - Click event model
//! - [`click_recorder`] - Detached, panic-safe click recording
//!
//! # Click Processing Flow
//!
//! 1. Redirect handler resolves an active destination
//! 2. A [`click_event::ClickEvent`] is built from request headers
//! 3. [`click_recorder::ClickRecorder::dispatch`] spawns the write and returns
//! 4. The configured [`repositories::ClickStore`] increments the day/hour bucket

pub mod calendar;
pub mod click_event;
pub mod click_recorder;
pub mod entities;
pub mod repositories;

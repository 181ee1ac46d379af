//! Board-agnostic core logic for the Bouncebox demo
//!
//! This crate contains everything that does not depend on a specific
//! board or display:
//!
//! - Box physics (elastic reflection off the playfield edges)
//! - The half-height shared frame and its hand-off flag
//! - The frame producer and transfer task
//! - Hardware abstraction traits (block-addressed display, clock)
//! - Configuration type definitions
//!
//! # Pipeline
//!
//! ```text
//! core 0                               core 1
//! ┌──────────────────┐  flag + pixels  ┌──────────────────┐
//! │  FrameProducer   │ ──────────────▶ │   TransferTask   │ ──▶ BlockWriter
//! │ update, draw half│ ◀────────────── │ send, zero, idle │
//! └──────────────────┘      idle       └──────────────────┘
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod color;
pub mod config;
pub mod frame;
pub mod physics;
pub mod pipeline;
pub mod traits;

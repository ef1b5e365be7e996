#![deny(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::redundant_clone))]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![deny(clippy::redundant_field_names)]
#![deny(clippy::redundant_pattern)]
#![deny(clippy::redundant_static_lifetimes)]
#![deny(clippy::needless_borrow)]
#![deny(clippy::manual_let_else)]
#![deny(clippy::unused_self)]
#![deny(clippy::unnecessary_wraps)]
#![deny(dropping_copy_types)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
#![deny(clippy::print_stdout)]
#![deny(clippy::dbg_macro)]
#![deny(clippy::must_use_candidate)]
#![deny(clippy::trivially_copy_pass_by_ref)]
#![deny(clippy::clone_on_copy)]
#![deny(clippy::len_without_is_empty)]
#![deny(clippy::wrong_self_convention)]
#![deny(clippy::match_like_matches_macro)]
#![deny(clippy::bool_comparison)]
#![deny(clippy::needless_bool)]
#![no_std]

//! Backpressured reactive-stream operators.
//!
//! The crate implements a receiver-driven signal protocol (subscribe → request → signal → cancel)
//! and the operators that compose on top of it:
//!
//! - [`core::SerializedSubscriber`] funnels concurrently emitted signals through a single lane.
//! - [`core::OperatorCore`] is the decorator state shared by every transforming operator.
//! - [`core::SkipUntil`] suppresses a main sequence until a secondary sequence fires.
//! - [`core::FanIn`] merges or concatenates many sequences, failing fast or collecting failures.
//!
//! Everything under [`core`] is `no_std` + `alloc`. Runtime integrations live under `std`
//! and are gated behind the `std` feature.

extern crate alloc;

/// Runtime-agnostic protocol types and operators.
pub mod core;
/// Standard library integrations.
#[cfg(feature = "std")]
pub mod std;

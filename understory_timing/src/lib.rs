// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer primitives for UI runtimes.
//!
//! Nothing in this crate reads a clock. Every operation takes the current
//! time as a `u64` timestamp in milliseconds supplied by the host (an event
//! loop, a browser `requestAnimationFrame` callback, a test harness), so the
//! same primitives work under `no_std`, in WASM, and in deterministic tests.
//!
//! The main building block is [`Debounce`], a single scheduled action where
//! scheduling a new action always replaces the pending one:
//!
//! ```rust
//! use understory_timing::Debounce;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//! enum Fade {
//!     Conceal,
//!     Reveal,
//! }
//!
//! let mut timer = Debounce::new();
//! timer.schedule(1_000, 400, Fade::Conceal);
//!
//! // A newer request wins; the conceal never fires.
//! timer.schedule(1_100, 50, Fade::Reveal);
//!
//! assert_eq!(timer.poll(1_120), None);
//! assert_eq!(timer.poll(1_150), Some(Fade::Reveal));
//! assert_eq!(timer.poll(2_000), None);
//! ```
//!
//! Hosts are expected to call `poll` (or a higher-level `tick`) from their
//! own timer callbacks, typically after arming a platform timer for
//! [`Debounce::deadline`].
//!
//! This crate is `no_std`.

#![no_std]

mod debounce;

pub use debounce::Debounce;

//! Pipeline stages for a materialise-and-run pass.
//!
//! Each submodule implements exactly one step, so each is independently
//! testable.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ encode ──▶ decode ──▶ materialize ──▶ run ──▶ cleanup
//! (path)    (base64)   (bytes)    (temp file)     (child)  (unlink)
//! ```
//!
//! 1. [`input`]      : check the path names a regular file and read it
//! 2. [`encode`]     : base64 round trip of the payload
//! 3. [`materialize`]: create-exclusive temp file, write, chmod
//! 4. [`run`]        : spawn with no arguments and wait
//!
//! Cleanup is owned by [`materialize::Materialized`]; it happens on drop if
//! nothing else removes the artifact first.

pub mod encode;
pub mod input;
pub mod materialize;
pub mod run;

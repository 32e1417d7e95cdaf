//! Property tests for the container tools
//!
//! Unit tests live next to the code they cover; these modules check
//! properties that must hold for arbitrary containers and headers.

pub mod riff_tests;

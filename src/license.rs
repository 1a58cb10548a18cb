//! License text shown in the license viewer.

/// Welcome notes followed by the Apache License 2.0.
pub const LICENSE_TEXT: &str = include_str!("../assets/license.txt");

/// Heading of the license viewer window.
pub const LICENSE_VIEWER_TITLE: &str = "Terms of error";

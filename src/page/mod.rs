//! Page annotation pipeline.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ContentLocator`] | Ordered-fallback content container choice |
//! | [`PageSession`] | Wait → locate → extract → highlight orchestration |

// ============================================================================
// Submodules
// ============================================================================

/// Content container location.
mod locator;

/// Annotation orchestration.
mod session;

// ============================================================================
// Re-exports
// ============================================================================

pub use locator::{ContentLocator, CONTENT_SELECTORS};
pub use session::{PageSession, SessionConfig};

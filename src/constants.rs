//! Interaction-wide constants.
//!
//! Centralizes tolerances and defaults so the state machine, the plugins and
//! the settings loader agree on the same values.

// ============================================================================
// Pointer Tracking
// ============================================================================

/// Client-space distance a pressed pointer must travel before an interaction starts
pub const POINTER_MOVE_TOLERANCE: f64 = 1.0;

/// Lower bound for the time step used when deriving velocity, in seconds
pub const MIN_DT_SECS: f64 = 0.001;

/// Number of pointers a gesture needs
pub const GESTURE_POINTERS: usize = 2;

// ============================================================================
// Swipe Detection
// ============================================================================

/// Release speed (units per second) below which an end event has no swipe
pub const SWIPE_MIN_SPEED: f64 = 600.0;

/// Longest gap between the last move and the release that still counts as a swipe
pub const SWIPE_MAX_GAP_MS: f64 = 150.0;

/// Angular overlap between neighbouring swipe directions, in degrees
pub const SWIPE_ANGLE_OVERLAP: f64 = 22.5;

// ============================================================================
// Resize Hit Testing
// ============================================================================

/// Distance from a rect edge that still counts as grabbing it (mouse/pen)
pub const RESIZE_MARGIN_MOUSE: f64 = 10.0;

/// Distance from a rect edge that still counts as grabbing it (touch)
pub const RESIZE_MARGIN_TOUCH: f64 = 20.0;

// ============================================================================
// Logging
// ============================================================================

/// Filter used by `logging::init_tracing` when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "pointer_interactions=info";

/// Directory inside the platform config directory that holds the settings
pub const SETTINGS_DIR_NAME: &str = "pointer_interactions";

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.json";

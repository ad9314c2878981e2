//! Exit codes used by the `tie` binary (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Translation document is malformed or violates document rules
pub const DATAERR: i32 = 65;

/// Translation file missing or unreadable
pub const NOINPUT: i32 = 66;

/// Rendering failed or output could not be produced
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;

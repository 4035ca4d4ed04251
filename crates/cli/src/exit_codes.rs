//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of the
//! shell contract — scripts rely on them.
//!
//! # Exit Codes
//!
//! | Code | Description                                             |
//! |------|---------------------------------------------------------|
//! | 0    | Success                                                 |
//! | 1    | General error (unspecified)                             |
//! | 2    | CLI usage error (bad args, unknown format)              |
//! | 3    | I/O error (missing file, write failure)                 |
//! | 4    | Codec error (file could not be decoded or encoded)      |
//! | 5    | Instruction not actionable (only under `--strict`)      |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, unknown file format.
pub const EXIT_USAGE: u8 = 2;

/// I/O error - file missing or unreadable, output not writable.
pub const EXIT_IO_ERROR: u8 = 3;

/// Codec error - spreadsheet bytes could not be decoded or encoded.
pub const EXIT_CODEC_ERROR: u8 = 4;

/// The instruction named no usable column. By default this is a no-op
/// note, not an error; `split --strict` maps it to this code.
pub const EXIT_NOT_ACTIONABLE: u8 = 5;

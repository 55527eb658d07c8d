//! Windows path recognition and short path expansion.
//!
//! # Key Concepts
//!
//! ## Short paths
//!
//! Windows can give every file an abbreviated 8.3 name such as `VERYLO~1`
//! next to its long name `VeryLongName`. APIs sometimes hand back the short
//! form, and `C:\Users\VERYLO~1\AppData\Local\Temp` then fails a plain
//! string comparison with `C:\Users\VeryLongName\AppData\Local\Temp` even
//! though both name the same directory.
//!
//! ## Classification
//!
//! [`classify`] decides, from the string alone, whether a path is a local
//! absolute drive path with short segments, and splits off the
//! `X:\Users\<name>` prefix.
//!
//! ## Expansion
//!
//! [`expand`] turns a short path into its long form using a
//! [`Host`](crate::Host), or reports [`ExpansionResult::Unsupported`].
//!
//! # Examples
//!
//! ```
//! use normtmp::path::classify::is_supported_short_path;
//! use normtmp::{ExpansionResult, Platform, ShortPathExpander, SystemHost};
//!
//! assert!(is_supported_short_path(Platform::Windows, r"C:\PROGRA~1"));
//!
//! let host = SystemHost::new();
//! let expander = ShortPathExpander::new(&host);
//! assert_eq!(expander.expand(r"\\server\PROGRA~1"), ExpansionResult::Unsupported);
//! ```

pub mod classify;
pub mod expand;

// Re-export key types
pub use expand::{ExpansionResult, ShortPathExpander};

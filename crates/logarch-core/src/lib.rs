//! Flat-directory log archiving library.
//!
//! `logarch-core` collects the regular files of a single directory
//! (non-recursively) into a timestamped, gzip-compressed tar archive,
//! publishes it atomically via a temporary file and rename, and appends a
//! one-line audit record to a shared history log.
//!
//! # Examples
//!
//! ```no_run
//! use logarch_core::ArchiveRequest;
//! use logarch_core::NullEvents;
//! use logarch_core::create_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = ArchiveRequest::new("/var/log/myapp");
//! let report = create_archive(&request, &mut NullEvents)?;
//! println!("Archived {} files", report.files_archived);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archiver;
pub mod error;
pub mod events;
pub mod filters;
pub mod history;
pub mod report;
pub mod request;

// Re-export main API types
pub use archiver::create_archive;
pub use error::ArchiveError;
pub use error::Result;
pub use events::ArchiveEvents;
pub use events::NullEvents;
pub use events::SkipReason;
pub use history::HistoryEntry;
pub use history::append_history;
pub use report::ArchiveReport;
pub use request::ArchiveRequest;

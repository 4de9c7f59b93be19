//! Parsers for audit log files.
//!
//! - [`csv_parser`]: decode audit CSV text into [`AuditRow`](crate::models::AuditRow)s
//! - [`checksum`]: fingerprint loaded file contents
//!
//! # Example
//!
//! ```no_run
//! use audit_insights::parsing::csv_parser::parse_audit_csv_file;
//! use std::path::Path;
//!
//! let parsed = parse_audit_csv_file(Path::new("audit.csv"))
//!     .expect("Failed to parse audit log");
//! println!("{} rows", parsed.rows.len());
//! ```

pub mod checksum;
pub mod csv_parser;


pub use checksum::calculate_checksum;
pub use csv_parser::{parse_audit_csv, parse_audit_csv_file, parse_audit_reader, ParsedAudit};

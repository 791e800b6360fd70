//! Partials - extract, open and inline template partials
//!
//! Moves a selected region of a template or stylesheet into its own
//! "partial" file and replaces it with the include statement for the file's
//! syntax. The reverse directions are supported too: opening the partial
//! included on the current line, and inlining it back.
//!
//! # Example
//!
//! ```ignore
//! use partials::{Action, Buffer, MemoryHost, Partials, command};
//!
//! let buffer = Buffer::new(Some("app/views/users/show.html.erb".into()), text).select_lines(3, 8)?;
//! let mut host = MemoryHost::new(buffer).with_name("details");
//! command::run(&Partials::default(), &mut host, Action::ExtractOrNavigate)?;
//! // host.buffer now holds `<%= render 'users/details' %>`
//! ```

pub mod buffer;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod extract;
pub mod fs;
pub mod host;
pub mod locate;
pub mod partials;
pub mod resolver;
pub mod syntax;
pub mod terminal;
pub mod text;

pub use buffer::Buffer;
pub use command::{Action, Outcome};
pub use config::Config;
pub use error::PartialError;
pub use extract::Extraction;
pub use fs::{FileSystem, LocalFs};
pub use host::{Host, MemoryHost};
pub use locate::{Inlining, Resolution};
pub use partials::{Partials, Settings};
pub use resolver::{PathResolver, RootConventions};
pub use syntax::{IncludeMatcher, SyntaxRegistry, SyntaxRule, include_matcher};
pub use terminal::TerminalHost;

//! Line-oriented command shell for the link tracker.
//!
//! A [`Shell`] reads commands of the form `ACTION key:value ...` from an
//! input stream, routes each one to the [`Handler`] registered for its
//! action, and writes the handler's response to the output stream as a
//! compact JSON object. Failures are written as a plain message line and
//! never stop the loop; only a failing input stream does.
//!
//! ```rust,no_run
//! use linktracker_service::{BcryptHasher, LinkTracker};
//! use linktracker_shell::{LinkHandlers, Shell};
//! use linktracker_storage::InMemoryRepository;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = LinkTracker::new(InMemoryRepository::new(), BcryptHasher::new());
//!
//! let mut shell = Shell::new(tokio::io::stdin(), tokio::io::stdout());
//! LinkHandlers::new(service).register(&mut shell);
//!
//! shell.run().await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handler;
pub mod link;
pub mod request;
pub mod shell;

pub use error::{ErrorKind, Result, ShellError};
pub use handler::{handler_fn, Handler, HandlerFn};
pub use link::LinkHandlers;
pub use request::{Context, Request, Response};
pub use shell::{parse_line, Command, Shell};

//! Hash-fragment routing for eldoc.
//!
//! This crate provides:
//! - [`RouteResolver`]: Parses `#/<locale>/<page>` fragments into a [`Route`]
//! - [`ClientStorage`]: Durable key/value storage the resolver persists the
//!   locale into ([`MemoryStorage`], [`FileStorage`])
//! - [`Location`]: Source of the current fragment and of navigation events
//!   ([`MemoryLocation`])
//!
//! Resolution never fails. Absent or malformed fragments resolve to the
//! fallback page with no locale.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use eldoc_router::{ClientStorage, MemoryStorage, RouteResolver};
//!
//! let storage = Arc::new(MemoryStorage::new());
//! let resolver = RouteResolver::new(Arc::<MemoryStorage>::clone(&storage));
//!
//! let route = resolver.resolve("#/en-US/button");
//! assert_eq!(route.locale.as_deref(), Some("en-US"));
//! assert_eq!(route.page, "button");
//! assert_eq!(storage.get("ELEMENT_LANGUAGE").as_deref(), Some("en-US"));
//! ```

mod error;
mod location;
mod route;
mod storage;

pub use error::StorageError;
pub use location::{Location, MemoryLocation, NavigationEvent, NavigationEvents, Subscription};
pub use route::{DEFAULT_FALLBACK_PAGE, DEFAULT_STORAGE_KEY, Route, RouteResolver};
pub use storage::{ClientStorage, FileStorage, MemoryStorage};

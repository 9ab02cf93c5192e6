//! CrowdView Host Collaborator Abstraction
//!
//! The CrowdView graph builder never invents agent identity on its own: the
//! host application owns the mapping from an agent id to its display label,
//! its group key, and the hash stream that drives all pseudo-random
//! selection. This crate defines that boundary as the [`AgentDirectory`]
//! trait and ships [`SeededDirectory`], a deterministic implementation for
//! standalone and test use.
//!
//! # Core Principle
//!
//! All entropy is derived from the inputs, never from global state. Two
//! calls with the same key always produce the same value, so any graph a
//! builder emits is reproducible from its seed alone.
//!
//! # Example
//!
//! ```
//! use crowdview_env::{AgentDirectory, SeededDirectory};
//!
//! let dir = SeededDirectory::new();
//! assert_eq!(dir.hash01(7), dir.hash01(7));
//! assert!(dir.hash01(7) >= 0.0 && dir.hash01(7) < 1.0);
//! ```

mod directory;

pub use directory::{AgentDirectory, SeededDirectory};

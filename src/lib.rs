//! # tagmap
//!
//! Type tags as first-class, comparable runtime values, with a tag-indexed
//! container for registries and dispatch tables.
//!
//! `tagmap` lets generic code treat types themselves as values: a [`Tag`] is
//! an opaque token produced by naming a type, equal to another tag exactly
//! when both name the identical type. Two applications are built on top of
//! that primitive:
//!
//! - [`Wrapped`], a wrapping protocol pairing a payload with its tag, so a
//!   value can pass through contexts that know nothing about it and be
//!   recovered later at its exact type or through a declared capability.
//! - [`TagMap`], a mapping keyed by tags, useful wherever a dispatch table or
//!   registry wants "per type" rather than "per key string" semantics.
//!
//! ## Key Features
//!
//! - **Type-safe**: recovery is checked against the wrap-time tag at runtime
//! - **Pure**: tag creation allocates nothing and needs no registration step
//! - **Alias-correct**: `type Rune = i32` produces the tag of `i32`; distinct
//!   named types never share a tag, no matter their layout
//! - **No invalid tags**: a `Tag` cannot be default-constructed, so every tag
//!   in circulation identifies a real type
//! - **No macros**: a pure runtime solution without complex macro magic
//!
//! ## Usage Examples
//!
//! ### Tags as registry keys
//!
//! ```rust
//! use tagmap::{Entry, TagMap};
//!
//! let map = TagMap::with_entries([
//!     Entry::new::<i32>("red"),
//!     Entry::new::<f64>("blue"),
//! ]);
//!
//! assert_eq!(map.load::<i32>(), Some(&"red"));
//! assert_eq!(map.load::<String>(), None);
//! ```
//!
//! ### Wrapping and recovering values
//!
//! ```rust
//! use tagmap::Wrapped;
//!
//! let w = Wrapped::new(3.14f64);
//!
//! // Exact-type recovery; f32 is not f64, and a failed attempt hands the
//! // wrapper back untouched.
//! let w = w.unwrap::<f32>().unwrap_err();
//! assert_eq!(w.unwrap::<f64>().ok(), Some(3.14));
//! ```
//!
//! ### A dispatch table driven by wrapped values
//!
//! ```rust
//! use tagmap::{Entry, TagMap, Wrapped};
//!
//! struct Fish(String);
//! struct Octopus;
//!
//! type SlapFn = fn(&Wrapped) -> String;
//!
//! let table: TagMap<SlapFn> = TagMap::with_entries([
//!     Entry::new::<Fish>((|w: &Wrapped| {
//!         format!("{}slap", w.unwrap_ref::<Fish>().map_or("", |f| f.0.as_str()))
//!     }) as SlapFn),
//!     Entry::new::<Octopus>((|_: &Wrapped| "octoslap".repeat(8)) as SlapFn),
//! ]);
//!
//! let sym = Wrapped::new(Fish("trout".to_string()));
//! let slap = table.load_by_tag(sym.tag()).unwrap();
//! assert_eq!(slap(&sym), "troutslap");
//! ```
//!
//! ### Converting between registered types
//!
//! ```rust
//! use tagmap::{ConvertError, Converter};
//!
//! fn int_to_string(n: i32) -> Result<String, ConvertError> {
//!     Ok(format!("(int) {}", n))
//! }
//!
//! let cv = Converter::new().with(int_to_string);
//! assert_eq!(cv.convert::<String, _>(1).unwrap(), "(int) 1");
//! ```
//!
//! ## Failure behavior
//!
//! Absence is ordinary: lookups and recoveries return `Option`/`Result` and
//! never log or panic. The `must_` variants ([`Wrapped::must_unwrap`],
//! [`Wrapped::must_unwrap_as`]) are the explicit opt-in for callers holding
//! an external guarantee; they panic with the expected and actual type names
//! when that guarantee is violated.

mod convert;
mod map;
mod tag;
mod wrapped;

pub use convert::{ConvertError, ConvertFn, Converter};
pub use map::{Entry, TagMap};
pub use tag::Tag;
pub use wrapped::{AnyPayload, Wrapped};

// Re-export std::any for convenience
pub use std::any::{Any, TypeId};

//! A conversion registry built on [`TagMap`] and [`Wrapped`].
//!
//! [`Converter`] indexes conversion functions by the tag of their exact
//! signature, so a conversion from `S` to `D` is found by naming the two
//! types and nothing else. Conversion functions return `Result` because a
//! conversion can fail per value, not just per type pair.

use crate::map::{Entry, TagMap};
use crate::tag::Tag;
use crate::wrapped::Wrapped;
use std::any::Any;
use thiserror::Error;

/// The shape of a registrable conversion function.
///
/// Plain function pointers, not closures: every registration for the same
/// `(S, D)` pair then shares a single signature type, and with it a single
/// registry key.
pub type ConvertFn<S, D> = fn(S) -> Result<D, ConvertError>;

/// Errors produced by [`Converter`] operations and conversion functions.
#[derive(Debug, Clone, Error)]
pub enum ConvertError {
    /// No conversion is registered for the requested type pair.
    #[error("conversion not found: {from} -> {to}")]
    NotFound {
        from: &'static str,
        to: &'static str,
    },
    /// A registered conversion rejected this particular value.
    #[error("{0}")]
    Failed(String),
}

impl ConvertError {
    /// A value-level failure with the given message.
    pub fn failed(message: impl Into<String>) -> Self {
        ConvertError::Failed(message.into())
    }
}

/// A registry of conversion functions, keyed by signature tag.
///
/// # Examples
///
/// ```
/// use tagmap::{ConvertError, Converter};
///
/// fn int_to_string(n: i32) -> Result<String, ConvertError> {
///     Ok(format!("(int) {}", n))
/// }
///
/// let cv = Converter::new().with(int_to_string);
///
/// assert_eq!(cv.convert::<String, _>(1).unwrap(), "(int) 1");
///
/// // Converting a type to itself is always defined.
/// assert_eq!(cv.convert::<String, _>("one".to_string()).unwrap(), "one");
/// ```
#[derive(Debug, Default)]
pub struct Converter {
    defs: TagMap<Wrapped>,
}

impl Converter {
    /// Creates an empty converter.
    pub fn new() -> Self {
        Converter {
            defs: TagMap::new(),
        }
    }

    /// Builder form of [`Converter::register`], for construction chaining.
    pub fn with<S: Any, D: Any>(mut self, f: ConvertFn<S, D>) -> Self {
        self.register(f);
        self
    }

    /// Registers a conversion from `S` to `D`, replacing any previous one.
    pub fn register<S: Any, D: Any>(&mut self, f: ConvertFn<S, D>) {
        self.defs.store([Entry::with_tag(
            Tag::of::<ConvertFn<S, D>>(),
            Wrapped::new(f),
        )]);
    }

    /// Removes the conversion from `S` to `D`, if registered.
    pub fn unregister<S: Any, D: Any>(&mut self) {
        self.defs.delete([Tag::of::<ConvertFn<S, D>>()]);
    }

    /// Returns the registered conversion from `S` to `D`, if found.
    ///
    /// The returned function can be applied repeatedly, far from the
    /// registry that produced it.
    pub fn lookup<S: Any, D: Any>(&self) -> Option<ConvertFn<S, D>> {
        self.defs
            .load_by_tag(Tag::of::<ConvertFn<S, D>>())
            .and_then(|w| w.unwrap_ref::<ConvertFn<S, D>>())
            .copied()
    }

    /// Converts `src` to type `D`.
    ///
    /// When `S` and `D` are the same type, the value is returned as-is
    /// without consulting the registry. Otherwise the registered conversion
    /// runs; its own failures propagate unchanged.
    ///
    /// # Errors
    ///
    /// [`ConvertError::NotFound`] when `S != D` and no conversion is
    /// registered for the pair; any error the conversion function returns.
    pub fn convert<D: Any, S: Any>(&self, src: S) -> Result<D, ConvertError> {
        let not_found = || ConvertError::NotFound {
            from: Tag::of::<S>().type_name(),
            to: Tag::of::<D>().type_name(),
        };

        if Tag::of::<S>() == Tag::of::<D>() {
            let boxed: Box<dyn Any> = Box::new(src);
            return boxed.downcast::<D>().map(|dst| *dst).map_err(|_| not_found());
        }

        match self.lookup::<S, D>() {
            Some(f) => f(src),
            None => Err(not_found()),
        }
    }

    /// The number of registered conversions.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Returns true if no conversions are registered.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

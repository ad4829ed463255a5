use crate::tag::Tag;
use std::any::{type_name, Any};
use std::fmt;

/// An erased payload, as carried by top-tagged wrappers.
pub type AnyPayload = Box<dyn Any + Send + Sync>;

struct CapabilitySlot {
    tag: Tag,
    // Box<Box<dyn C>>, downcast back via Box<C>
    object: Box<dyn Any + Send + Sync>,
}

/// A value paired with the tag of its wrap-time type.
///
/// `Wrapped` lets a value of a statically known type travel through contexts
/// that know nothing about it (a registry slot, a narrow interface) and be
/// recovered later, either at its exact type or through a capability trait
/// declared when it was wrapped.
///
/// # Examples
///
/// ```
/// use tagmap::Wrapped;
///
/// let w = Wrapped::new(3.14f64);
/// assert!(w.is::<f64>());
///
/// // Recovery is exact: f32 is not f64.
/// let w = match w.unwrap::<f32>() {
///     Ok(_) => unreachable!(),
///     Err(w) => w,
/// };
/// assert_eq!(w.unwrap::<f64>().ok(), Some(3.14));
/// ```
pub struct Wrapped {
    tag: Tag,
    payload: Option<AnyPayload>,
    capability: Option<CapabilitySlot>,
}

impl Wrapped {
    /// Wraps `value`, recording the tag of its static type.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Wrapped {
            tag: Tag::of::<T>(),
            payload: Some(Box::new(value)),
            capability: None,
        }
    }

    /// Wraps `value` and additionally records that it satisfies capability
    /// `C`, keeping a trait object for later recovery via [`unwrap_as`].
    ///
    /// Exact-type recovery through [`unwrap`] is unaffected; the capability
    /// is a second, independent door into the payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagmap::Wrapped;
    ///
    /// trait Greeter: Send + Sync {
    ///     fn greet(&self) -> String;
    /// }
    ///
    /// #[derive(Clone)]
    /// struct English;
    ///
    /// impl Greeter for English {
    ///     fn greet(&self) -> String { "Hello!".to_string() }
    /// }
    ///
    /// impl From<English> for Box<dyn Greeter> {
    ///     fn from(g: English) -> Self { Box::new(g) }
    /// }
    ///
    /// let w = Wrapped::with_capability::<dyn Greeter, _>(English);
    /// assert_eq!(w.must_unwrap_as::<dyn Greeter>().greet(), "Hello!");
    /// ```
    ///
    /// [`unwrap`]: Wrapped::unwrap
    /// [`unwrap_as`]: Wrapped::unwrap_as
    pub fn with_capability<C, T>(value: T) -> Self
    where
        C: ?Sized + Any + Send + Sync,
        T: Any + Send + Sync + Clone + Into<Box<C>>,
    {
        Wrapped {
            tag: Tag::of::<T>(),
            payload: Some(Box::new(value.clone())),
            capability: Some(CapabilitySlot {
                tag: Tag::of::<C>(),
                object: Box::new(value.into()),
            }),
        }
    }

    /// Wraps an already erased payload. The result carries the top tag.
    pub fn erased(payload: AnyPayload) -> Self {
        Wrapped {
            tag: Tag::any(),
            payload: Some(payload),
            capability: None,
        }
    }

    /// A wrapper with no payload at all, carrying the top tag.
    ///
    /// Recovery via [`Wrapped::unwrap_any`] succeeds and yields `None`; what
    /// the caller does with the absence is the caller's business.
    pub fn empty() -> Self {
        Wrapped {
            tag: Tag::any(),
            payload: None,
            capability: None,
        }
    }

    /// The tag recorded at wrap time.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Returns true if the wrap-time tag is the tag of `T`.
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.tag.is::<T>()
    }

    /// Returns true if capability `C` was declared at wrap time.
    pub fn satisfies<C: ?Sized + 'static>(&self) -> bool {
        self.capability
            .as_ref()
            .is_some_and(|slot| slot.tag.is::<C>())
    }

    /// Recovers the payload at its exact wrap-time type.
    ///
    /// Succeeds only when `T` is precisely the type given to [`Wrapped::new`]
    /// or [`Wrapped::with_capability`] (tag equality, never subtyping or
    /// representation compatibility). On mismatch the wrapper is returned
    /// unchanged for reuse.
    pub fn unwrap<T: Any>(self) -> Result<T, Self> {
        if !self.tag.is::<T>() {
            return Err(self);
        }
        let Wrapped {
            tag,
            payload,
            capability,
        } = self;
        match payload {
            Some(boxed) => match boxed.downcast::<T>() {
                Ok(value) => Ok(*value),
                Err(boxed) => Err(Wrapped {
                    tag,
                    payload: Some(boxed),
                    capability,
                }),
            },
            None => Err(Wrapped {
                tag,
                payload: None,
                capability,
            }),
        }
    }

    /// Borrowing form of [`Wrapped::unwrap`].
    pub fn unwrap_ref<T: Any>(&self) -> Option<&T> {
        if !self.tag.is::<T>() {
            return None;
        }
        self.payload.as_ref()?.downcast_ref::<T>()
    }

    /// Recovers the payload through capability `C`, independent of the tag.
    ///
    /// Succeeds exactly when `C` was declared at wrap time via
    /// [`Wrapped::with_capability`]. This is never a conversion: a newtype
    /// with the same underlying representation as `C` does not satisfy it.
    pub fn unwrap_as<C: ?Sized + Any>(&self) -> Option<&C> {
        let slot = self.capability.as_ref()?;
        if !slot.tag.is::<C>() {
            return None;
        }
        slot.object.downcast_ref::<Box<C>>().map(|boxed| &**boxed)
    }

    /// Recovers the erased payload of a top-tagged wrapper.
    ///
    /// Succeeds only for wrappers built with [`Wrapped::erased`] or
    /// [`Wrapped::empty`]; a wrapper holding a concretely tagged value is
    /// returned unchanged, exactly as with [`Wrapped::unwrap`].
    pub fn unwrap_any(self) -> Result<Option<AnyPayload>, Self> {
        if self.tag.is_any() {
            Ok(self.payload)
        } else {
            Err(self)
        }
    }

    /// Fail-fast form of [`Wrapped::unwrap`].
    ///
    /// # Panics
    ///
    /// Panics, naming the expected and actual types, when `T` is not the
    /// wrap-time type. For callers holding an external guarantee of a match.
    pub fn must_unwrap<T: Any>(self) -> T {
        match self.unwrap::<T>() {
            Ok(value) => value,
            Err(this) => panic!(
                "must_unwrap: expected {}, found {}",
                type_name::<T>(),
                this.tag.type_name()
            ),
        }
    }

    /// Fail-fast form of [`Wrapped::unwrap_as`].
    ///
    /// # Panics
    ///
    /// Panics, naming the expected capability and the actual type, when `C`
    /// was not declared at wrap time.
    pub fn must_unwrap_as<C: ?Sized + Any>(&self) -> &C {
        match self.unwrap_as::<C>() {
            Some(value) => value,
            None => {
                let found = self
                    .capability
                    .as_ref()
                    .map(|slot| slot.tag.type_name())
                    .unwrap_or_else(|| self.tag.type_name());
                panic!(
                    "must_unwrap_as: expected {}, found {}",
                    type_name::<C>(),
                    found
                )
            }
        }
    }
}

impl fmt::Debug for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapped")
            .field("tag", &self.tag)
            .field("payload", &self.payload.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Animal: Send + Sync {
        fn make_sound(&self) -> String;
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Dog {
        name: String,
    }

    impl Animal for Dog {
        fn make_sound(&self) -> String {
            format!("{} says: Woof!", self.name)
        }
    }

    impl From<Dog> for Box<dyn Animal> {
        fn from(dog: Dog) -> Self {
            Box::new(dog)
        }
    }

    #[test]
    fn test_round_trip() {
        let w = Wrapped::new(3.14f64);
        assert_eq!(w.unwrap::<f64>().ok(), Some(3.14));
    }

    #[test]
    fn test_mismatch_returns_wrapper() {
        let w = Wrapped::new(3.14f64);
        let w = w.unwrap::<f32>().unwrap_err();
        // The payload survives a failed recovery.
        assert_eq!(w.unwrap::<f64>().ok(), Some(3.14));
    }

    #[test]
    fn test_unwrap_ref() {
        let w = Wrapped::new("twine".to_string());
        assert_eq!(w.unwrap_ref::<String>().map(String::as_str), Some("twine"));
        assert!(w.unwrap_ref::<&str>().is_none());
    }

    #[test]
    fn test_no_representation_conversion() {
        #[derive(Clone, Copy)]
        struct Flag(bool);

        let w = Wrapped::new(Flag(true));
        assert!(w.unwrap_ref::<bool>().is_none());
        assert!(w.unwrap_ref::<Flag>().is_some());
    }

    #[test]
    fn test_tag_matches_wrap_time_type() {
        let w = Wrapped::new(0u8);
        assert_eq!(w.tag(), Tag::of::<u8>());
        assert!(w.is::<u8>());
        assert!(!w.is::<i8>());
    }

    #[test]
    fn test_capability_recovery() {
        let w = Wrapped::with_capability::<dyn Animal, _>(Dog {
            name: "Rover".to_string(),
        });

        // Both doors open: exact type and declared capability.
        assert!(w.satisfies::<dyn Animal>());
        let animal = w.unwrap_as::<dyn Animal>().unwrap();
        assert_eq!(animal.make_sound(), "Rover says: Woof!");
        assert_eq!(
            w.unwrap::<Dog>().ok(),
            Some(Dog {
                name: "Rover".to_string()
            })
        );
    }

    #[test]
    fn test_capability_not_declared() {
        let w = Wrapped::new(Dog {
            name: "Rover".to_string(),
        });
        assert!(!w.satisfies::<dyn Animal>());
        assert!(w.unwrap_as::<dyn Animal>().is_none());
    }

    #[test]
    fn test_empty_carries_top_tag() {
        let w = Wrapped::empty();
        assert_eq!(w.tag(), Tag::any());
        assert!(matches!(w.unwrap_any(), Ok(None)));
    }

    #[test]
    fn test_empty_rejects_specific_types() {
        let w = Wrapped::empty();
        assert!(w.unwrap_ref::<()>().is_none());
        assert!(w.unwrap::<f64>().is_err());
    }

    #[test]
    fn test_erased_payload() {
        let w = Wrapped::erased(Box::new(5i32));
        assert_eq!(w.tag(), Tag::any());
        // The erased box is recoverable whole, but not at i32: the wrapper
        // was tagged at the top type, not at the payload's concrete type.
        assert!(w.unwrap_ref::<i32>().is_none());
        let payload = w.unwrap_any().unwrap().unwrap();
        assert_eq!(payload.downcast_ref::<i32>(), Some(&5));
    }

    #[test]
    fn test_unwrap_any_rejects_concrete_tags() {
        let w = Wrapped::new(5i32);
        let w = match w.unwrap_any() {
            Ok(_) => panic!("concrete tag must not unwrap at the top tag"),
            Err(w) => w,
        };
        assert_eq!(w.unwrap::<i32>().ok(), Some(5));
    }

    #[test]
    #[should_panic(expected = "must_unwrap")]
    fn test_must_unwrap_panics() {
        Wrapped::new(5i32).must_unwrap::<u32>();
    }

    #[test]
    #[should_panic(expected = "must_unwrap_as")]
    fn test_must_unwrap_as_panics() {
        Wrapped::empty().must_unwrap_as::<dyn Animal>();
    }

    #[test]
    fn test_must_unwrap_success() {
        assert_eq!(Wrapped::new(5i32).must_unwrap::<i32>(), 5);
    }
}

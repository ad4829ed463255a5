use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// An opaque, comparable token identifying a type.
///
/// Two tags are equal exactly when they name the identical type. Aliases
/// resolve to the same underlying type and therefore the same tag, while
/// nominally distinct types compare unequal even when their layout matches:
///
/// ```
/// use tagmap::Tag;
///
/// type Rune = i32;
/// assert_eq!(Tag::of::<Rune>(), Tag::of::<i32>());
///
/// struct Flag(bool);
/// assert_ne!(Tag::of::<Flag>(), Tag::of::<bool>());
/// ```
///
/// A `Tag` can only be produced by [`Tag::of`], [`Tag::of_val`], or
/// [`Tag::any`]; there is no default or zero tag, so every tag in circulation
/// identifies a real type.
#[derive(Clone, Copy)]
pub struct Tag {
    id: TypeId,
    name: &'static str,
}

impl Tag {
    /// Returns the canonical tag for type `T`.
    ///
    /// Pure function of `T`: repeated calls anywhere in the program return
    /// equal tags. Requires no allocation or registration.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Tag {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Returns the tag for the static type of `sample`.
    ///
    /// Sugar for [`Tag::of`] with `T` inferred from the argument.
    ///
    /// ```
    /// use tagmap::Tag;
    ///
    /// assert_eq!(Tag::of_val(&0u8), Tag::of::<u8>());
    /// assert_ne!(Tag::of_val(&"twine"), Tag::of_val(&String::from("twine")));
    /// ```
    pub fn of_val<T: 'static>(_sample: &T) -> Self {
        Self::of::<T>()
    }

    /// Returns the top tag, the sentinel for "any type".
    ///
    /// The top tag is the tag of `dyn Any`. No sized payload type shares it,
    /// which makes it usable as a wildcard key in registries.
    pub fn any() -> Self {
        Self::of::<dyn Any>()
    }

    /// Returns true if this tag identifies type `T`.
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Returns true if this is the top tag.
    pub fn is_any(&self) -> bool {
        self.id == TypeId::of::<dyn Any>()
    }

    /// The name of the tagged type, for diagnostics only.
    ///
    /// Names are not guaranteed unique or stable across compiler versions;
    /// identity always goes through tag equality.
    pub fn type_name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({})", self.name)
    }
}

use std::fmt;

/// A reference to a type as written on a field or argument, e.g. `[User!]!`.
///
/// The structure always terminates in exactly one [`TypeRef::Named`] leaf, so every unwrapping
/// helper below reaches it in as many steps as the reference is nested.
/// [Reference](https://spec.graphql.org/October2021/#sec-Type-References)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeRef<'a> {
    Named(&'a str),
    List(&'a TypeRef<'a>),
    NonNull(&'a TypeRef<'a>),
}

impl<'a> TypeRef<'a> {
    /// Returns the name of the leaf type, unwrapping every list and non-null wrapper.
    #[inline]
    pub fn named_type(&self) -> &'a str {
        match self {
            TypeRef::Named(name) => *name,
            TypeRef::List(of_type) => of_type.named_type(),
            TypeRef::NonNull(of_type) => of_type.named_type(),
        }
    }

    /// Returns whether the outermost wrapper is non-null.
    #[inline]
    pub fn is_non_null(&self) -> bool {
        matches!(self, TypeRef::NonNull(_))
    }

    /// Strips a single outer non-null wrapper, if there is one.
    #[inline]
    pub fn nullable(&self) -> &TypeRef<'a> {
        match self {
            TypeRef::NonNull(of_type) => *of_type,
            _ => self,
        }
    }

    /// Unwraps exactly one list level, looking through an outer non-null wrapper.
    ///
    /// `[A]!` and `[A]` both yield `A`, `[[A]]` yields `[A]`, while `A` and `A!` yield `None`.
    #[inline]
    pub fn list_item(&self) -> Option<&TypeRef<'a>> {
        match self.nullable() {
            TypeRef::List(of_type) => Some(*of_type),
            _ => None,
        }
    }

    /// Returns whether a list wrapper occurs at any level of this reference.
    pub fn is_list(&self) -> bool {
        match self {
            TypeRef::Named(_) => false,
            TypeRef::List(_) => true,
            TypeRef::NonNull(of_type) => of_type.is_list(),
        }
    }

    /// Counts the list wrappers of this reference.
    pub fn list_depth(&self) -> usize {
        match self {
            TypeRef::Named(_) => 0,
            TypeRef::List(of_type) => 1 + of_type.list_depth(),
            TypeRef::NonNull(of_type) => of_type.list_depth(),
        }
    }
}

/// Printed in SDL notation. This also circuit breaks `Debug` output, which would otherwise
/// nest a tuple per wrapper.
impl<'a> fmt::Display for TypeRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => write!(f, "{}", name),
            TypeRef::List(of_type) => write!(f, "[{}]", of_type),
            TypeRef::NonNull(of_type) => write!(f, "{}!", of_type),
        }
    }
}

impl<'a> fmt::Debug for TypeRef<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeRef({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::TypeRef;

    #[test]
    fn unwrapping() {
        let user = TypeRef::Named("User");
        let non_null_user = TypeRef::NonNull(&user);
        let list = TypeRef::List(&non_null_user);
        let non_null_list = TypeRef::NonNull(&list);

        assert_eq!(non_null_list.named_type(), "User");
        assert_eq!(non_null_list.to_string(), "[User!]!");
        assert!(non_null_list.is_non_null());
        assert!(non_null_list.is_list());
        assert_eq!(non_null_list.list_depth(), 1);
        assert_eq!(non_null_list.nullable(), &list);
        assert_eq!(non_null_list.list_item(), Some(&non_null_user));
        assert_eq!(non_null_user.list_item(), None);
        assert!(!non_null_user.is_list());
    }

    #[test]
    fn nested_lists() {
        let user = TypeRef::Named("User");
        let inner = TypeRef::List(&user);
        let non_null_inner = TypeRef::NonNull(&inner);
        let outer = TypeRef::List(&non_null_inner);

        assert_eq!(outer.to_string(), "[[User]!]");
        assert_eq!(outer.list_depth(), 2);
        assert_eq!(outer.list_item().and_then(|item| item.list_item()), Some(&user));
    }
}

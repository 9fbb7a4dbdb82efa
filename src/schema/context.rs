use bumpalo::Bump;

/// A context for a schema document which holds an arena allocator.
///
/// For the duration of loading and linting a schema it's performant and convenient to allocate
/// its model in one chunk. This context represents the lifetime of a [Schema](super::Schema) and
/// every definition it holds; once linting is done the whole model is dropped at once.
///
/// A context isn't `Sync`, so when several documents are linted concurrently each worker creates
/// its own context.
pub struct SchemaContext {
    /// An arena allocator that holds the memory allocated for the context's lifetime
    pub arena: Bump,
}

impl SchemaContext {
    /// Create a new schema context with a preallocated arena.
    pub fn new() -> Self {
        let arena = Bump::new();
        SchemaContext { arena }
    }

    /// Put the value of `item` onto the arena and return a reference to it.
    #[inline]
    pub fn alloc<T>(&self, item: T) -> &T {
        self.arena.alloc(item)
    }

    /// Allocate an `&str` slice onto the arena and return a reference to it.
    ///
    /// This is useful when the original slice has an undefined lifetime.
    #[inline]
    pub fn alloc_str(&self, str: &str) -> &str {
        self.arena.alloc_str(str)
    }
}

impl Default for SchemaContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for creating empty values whose collections are allocated in an arena.
pub trait DefaultIn<'a> {
    fn default_in(arena: &'a Bump) -> Self;
}

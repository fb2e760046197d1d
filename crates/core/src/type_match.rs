//! First-match runtime type dispatch.
//!
//! A [`TypeMatch`] session is bound to one value and walks a chain of typed
//! branches in declaration order. A branch predicate is a projection
//! `FnOnce(&V) -> Option<T>`: `Some` means the value is-a `T` and carries the
//! downcast payload. The first branch whose predicate matches runs its
//! transform and freezes the session; every later declaration is a no-op that
//! passes the frozen result through, so at most one transform runs.
//!
//! ```ignore
//! let n: Option<i64> = TypeMatch::on(&value)
//!     .branch(Value::as_long).then_map(Some)
//!     .branch(Value::as_text).then_map(|t| t.parse().ok())
//!     .or_none();
//! ```

enum State<R> {
    /// No branch has matched yet.
    Searching,
    /// A branch committed; the result is fixed.
    Terminal(R),
}

/// An evaluation session over `value`, producing an `R`.
pub struct TypeMatch<'v, V: ?Sized, R> {
    value: &'v V,
    state: State<R>,
}

impl<'v, V: ?Sized, R> TypeMatch<'v, V, R> {
    /// Start a session bound to `value`.
    pub fn on(value: &'v V) -> Self {
        Self {
            value,
            state: State::Searching,
        }
    }

    /// Start a session whose outcome is already decided. Every branch is skipped.
    pub fn settled(value: &'v V, result: R) -> Self {
        Self {
            value,
            state: State::Terminal(result),
        }
    }

    /// Declare the next candidate branch.
    ///
    /// The predicate is only evaluated while the session is still searching.
    pub fn branch<T, P>(self, predicate: P) -> Branch<'v, V, R, T>
    where
        P: FnOnce(&'v V) -> Option<T>,
    {
        let candidate = match self.state {
            State::Searching => predicate(self.value),
            State::Terminal(_) => None,
        };
        Branch {
            session: self,
            candidate,
        }
    }

    /// Whether a branch has already committed the result.
    pub fn is_terminal(&self) -> bool {
        matches!(self.state, State::Terminal(_))
    }

    /// End the session: the committed result, or `default` applied to the
    /// original value when no branch matched.
    pub fn or_else<F>(self, default: F) -> R
    where
        F: FnOnce(&'v V) -> R,
    {
        match self.state {
            State::Terminal(result) => result,
            State::Searching => default(self.value),
        }
    }
}

impl<'v, V: ?Sized, R> TypeMatch<'v, V, Option<R>> {
    /// End the session with "no value" when nothing matched.
    pub fn or_none(self) -> Option<R> {
        self.or_else(|_| None)
    }
}

/// A declared branch waiting for its consequent.
pub struct Branch<'v, V: ?Sized, R, T> {
    session: TypeMatch<'v, V, R>,
    candidate: Option<T>,
}

impl<'v, V: ?Sized, R, T> Branch<'v, V, R, T> {
    /// Commit the branch with a value-producing transform.
    ///
    /// If the predicate matched, `transform` runs on the downcast payload and
    /// its result becomes terminal, even when that result is itself "no value".
    pub fn then_map<F>(self, transform: F) -> TypeMatch<'v, V, R>
    where
        F: FnOnce(T) -> R,
    {
        let Branch {
            mut session,
            candidate,
        } = self;
        if let Some(matched) = candidate {
            session.state = State::Terminal(transform(matched));
        }
        session
    }
}

impl<'v, V: ?Sized, T> Branch<'v, V, (), T> {
    /// Commit the branch with a side-effecting consequent.
    pub fn then<F>(self, effect: F) -> TypeMatch<'v, V, ()>
    where
        F: FnOnce(T),
    {
        self.then_map(effect)
    }
}

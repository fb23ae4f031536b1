use super::{Builder, BuilderError};

type Commit<P, T> = Box<dyn FnOnce(P, T) -> P>;

/// A child builder opened from a parent builder.
///
/// The child is edited through [`Nested::edit`] and folded back into the
/// parent by [`Nested::and`], which builds the child and hands the value to
/// the slot it was opened for.
pub struct Nested<P, B: Builder> {
    parent: P,
    builder: B,
    commit: Commit<P, B::Output>,
}

impl<P, B: Builder> Nested<P, B> {
    pub(crate) fn new(
        parent: P,
        builder: B,
        commit: impl FnOnce(P, B::Output) -> P + 'static,
    ) -> Self {
        Self {
            parent,
            builder,
            commit: Box::new(commit),
        }
    }

    /// Apply changes to the child builder.
    pub fn edit(mut self, f: impl FnOnce(B) -> B) -> Self {
        self.builder = f(self.builder);
        self
    }

    /// Build the child and return to the parent.
    pub fn and(self) -> Result<P, BuilderError> {
        let value = self.builder.build()?;
        Ok((self.commit)(self.parent, value))
    }
}

//! Operation sets shared by the builders.

/// Sequence operations over a `Vec<$ty>` field.
///
/// `$access` is `get` for plain values and `build` for values that have
/// their own builder.
macro_rules! sequence_ops {
    ($access:ident, $field:ident, $item:ident, $ty:ty) => {
        paste::paste! {
            /// Replace every item.
            pub fn [<with_ $field>](mut self, items: impl IntoIterator<Item = $ty>) -> Self {
                self.$field = items.into_iter().collect();
                self
            }

            pub fn [<has_ $field>](&self) -> bool {
                !self.$field.is_empty()
            }

            pub fn [<add_to_ $field>](mut self, item: $ty) -> Self {
                self.$field.push(item);
                self
            }

            /// Insert at `index`, shifting later items. `index` may equal the length.
            pub fn [<add_to_ $field _at>](mut self, index: usize, item: $ty) -> Result<Self, BuilderError> {
                let len = self.$field.len();
                if index > len {
                    return Err(BuilderError::IndexOutOfRange {
                        field: stringify!($field),
                        index,
                        len,
                    });
                }
                self.$field.insert(index, item);
                Ok(self)
            }

            /// Replace the item at `index`, appending when it is past the end.
            pub fn [<set_to_ $field>](mut self, index: usize, item: $ty) -> Self {
                match self.$field.get_mut(index) {
                    Some(slot) => *slot = item,
                    None => self.$field.push(item),
                }
                self
            }

            pub fn [<add_all_to_ $field>](mut self, items: impl IntoIterator<Item = $ty>) -> Self {
                self.$field.extend(items);
                self
            }

            /// Remove the first item equal to `item`.
            pub fn [<remove_from_ $field>](mut self, item: &$ty) -> Self {
                if let Some(position) = self.$field.iter().position(|i| i == item) {
                    self.$field.remove(position);
                }
                self
            }

            pub fn [<remove_all_from_ $field>](mut self, items: &[$ty]) -> Self {
                for item in items {
                    self = self.[<remove_from_ $field>](item);
                }
                self
            }

            pub fn [<$access _ $field>](&self) -> Vec<$ty> {
                self.$field.clone()
            }

            pub fn [<$access _ $item>](&self, index: usize) -> Result<$ty, BuilderError> {
                self.$field.get(index).cloned().ok_or(BuilderError::IndexOutOfRange {
                    field: stringify!($field),
                    index,
                    len: self.$field.len(),
                })
            }

            pub fn [<$access _first_ $item>](&self) -> Result<$ty, BuilderError> {
                self.$field.first().cloned().ok_or(BuilderError::Empty {
                    field: stringify!($field),
                })
            }

            pub fn [<$access _last_ $item>](&self) -> Result<$ty, BuilderError> {
                self.$field.last().cloned().ok_or(BuilderError::Empty {
                    field: stringify!($field),
                })
            }

            pub fn [<$access _matching_ $item>](&self, predicate: impl Fn(&$ty) -> bool) -> Option<$ty> {
                self.$field.iter().find(|i| predicate(i)).cloned()
            }

            pub fn [<has_matching_ $item>](&self, predicate: impl Fn(&$ty) -> bool) -> bool {
                self.$field.iter().any(|i| predicate(i))
            }
        }
    };
}

/// Sequence operations plus nested builders for items that have one.
macro_rules! nested_sequence_ops {
    ($field:ident, $item:ident, $ty:ty, $builder:ty) => {
        sequence_ops!(build, $field, $item, $ty);

        paste::paste! {
            pub fn [<add_new_ $item>](self) -> Nested<Self, $builder> {
                Nested::new(self, <$builder>::default(), |parent: Self, item| {
                    parent.[<add_to_ $field>](item)
                })
            }

            pub fn [<add_new_ $item _like>](self, item: &$ty) -> Nested<Self, $builder> {
                Nested::new(self, <$builder>::from(item), |parent: Self, item| {
                    parent.[<add_to_ $field>](item)
                })
            }

            pub fn [<set_new_ $item _like>](self, index: usize, item: &$ty) -> Nested<Self, $builder> {
                Nested::new(self, <$builder>::from(item), move |parent: Self, item| {
                    parent.[<set_to_ $field>](index, item)
                })
            }

            pub fn [<edit_ $item>](self, index: usize) -> Result<Nested<Self, $builder>, BuilderError> {
                let item = self.[<build_ $item>](index)?;
                Ok(self.[<set_new_ $item _like>](index, &item))
            }

            pub fn [<edit_first_ $item>](self) -> Result<Nested<Self, $builder>, BuilderError> {
                let item = self.[<build_first_ $item>]()?;
                Ok(self.[<set_new_ $item _like>](0, &item))
            }

            pub fn [<edit_last_ $item>](self) -> Result<Nested<Self, $builder>, BuilderError> {
                let item = self.[<build_last_ $item>]()?;
                let index = self.$field.len() - 1;
                Ok(self.[<set_new_ $item _like>](index, &item))
            }

            pub fn [<edit_matching_ $item>](
                self,
                predicate: impl Fn(&$ty) -> bool,
            ) -> Result<Nested<Self, $builder>, BuilderError> {
                let index = self
                    .$field
                    .iter()
                    .position(|i| predicate(i))
                    .ok_or(BuilderError::NoMatch {
                        field: stringify!($field),
                    })?;
                let item = self.$field[index].clone();
                Ok(self.[<set_new_ $item _like>](index, &item))
            }
        }
    };
}

/// Operations over a single `Option<$ty>` field whose type has a builder.
macro_rules! nested_ops {
    ($field:ident, $ty:ty, $builder:ty) => {
        paste::paste! {
            pub fn [<with_ $field>](mut self, value: $ty) -> Self {
                self.$field = Some(value);
                self
            }

            pub fn [<has_ $field>](&self) -> bool {
                self.$field.is_some()
            }

            pub fn [<build_ $field>](&self) -> Option<$ty> {
                self.$field.clone()
            }

            pub fn [<with_new_ $field>](self) -> Nested<Self, $builder> {
                Nested::new(self, <$builder>::default(), |parent: Self, value| {
                    parent.[<with_ $field>](value)
                })
            }

            pub fn [<with_new_ $field _like>](self, item: &$ty) -> Nested<Self, $builder> {
                Nested::new(self, <$builder>::from(item), |parent: Self, value| {
                    parent.[<with_ $field>](value)
                })
            }

            /// Open a nested builder seeded from the current value.
            pub fn [<edit_ $field>](self) -> Result<Nested<Self, $builder>, BuilderError> {
                let current = self.$field.clone().ok_or(BuilderError::Missing {
                    builder: stringify!($builder),
                    field: stringify!($field),
                })?;
                Ok(self.[<with_new_ $field _like>](&current))
            }

            /// Like the plain edit, starting from an empty builder when unset.
            pub fn [<edit_or_new_ $field>](self) -> Nested<Self, $builder> {
                match self.$field.clone() {
                    Some(current) => self.[<with_new_ $field _like>](&current),
                    None => self.[<with_new_ $field>](),
                }
            }
        }
    };
}

/// One setter and one nested entry point per variant of a polymorphic
/// field, generated from a `tag => Variant(Type, Builder)` table.
///
/// Every setter overwrites the single `Option<TypeRef>` slot, so at most one
/// variant is held at a time.
macro_rules! variant_ops {
    ($field:ident, $stem:ident; $($tag:ident => $variant:ident($ty:ty, $builder:ty)),+ $(,)?) => {
        paste::paste! {
            pub fn [<with_ $field>](mut self, value: impl Into<TypeRef>) -> Self {
                self.$field = Some(value.into());
                self
            }

            pub fn [<has_ $field>](&self) -> bool {
                self.$field.is_some()
            }

            pub fn [<build_ $field>](&self) -> Option<TypeRef> {
                self.$field.clone()
            }

            $(
                pub fn [<with_ $tag _ $stem>](mut self, value: $ty) -> Self {
                    self.$field = Some(TypeRef::$variant(value));
                    self
                }

                pub fn [<with_new_ $tag _ $stem>](self) -> Nested<Self, $builder> {
                    Nested::new(self, <$builder>::default(), |parent: Self, value| {
                        parent.[<with_ $tag _ $stem>](value)
                    })
                }

                pub fn [<with_new_ $tag _ $stem _like>](self, item: &$ty) -> Nested<Self, $builder> {
                    Nested::new(self, <$builder>::from(item), |parent: Self, value| {
                        parent.[<with_ $tag _ $stem>](value)
                    })
                }
            )+
        }
    };
}

/// [`variant_ops!`] over the five type reference shapes.
macro_rules! type_ref_ops {
    ($field:ident, $stem:ident) => {
        variant_ops!($field, $stem;
            primitive_ref => Primitive(PrimitiveRef, PrimitiveRefBuilder),
            void_ref => Void(VoidRef, VoidRefBuilder),
            wildcard_ref => Wildcard(WildcardRef, WildcardRefBuilder),
            class_ref => Class(ClassRef, ClassRefBuilder),
            type_param_ref => TypeParam(TypeParamRef, TypeParamRefBuilder),
        );
    };
}

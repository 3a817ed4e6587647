//! Index new-types with a matching vector wrapper.
//!
//! Vertices are addressed by their position in the graph's vertex order. Mixing
//! those positions up with plain `usize`s (edge counts, path lengths, ...) is an
//! easy mistake, so positions get their own type and a `Vec` wrapper that can only
//! be indexed with it.

#[macro_export]
macro_rules! define_indexed_vec {
    (
        $(#[$idx_meta:meta])*
        $idx_vis:vis struct $Idx:ident ;

        $(#[$vec_meta:meta])*
        $vec_vis:vis struct $Vec:ident ;
    ) => {
        // index newtype

        $(#[$idx_meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $idx_vis struct $Idx(pub usize);

        impl ::std::convert::From<usize> for $Idx {
            fn from(value: usize) -> Self {
                $Idx(value)
            }
        }

        impl ::std::convert::From<$Idx> for usize {
            fn from(value: $Idx) -> Self {
                value.0
            }
        }

        impl ::std::fmt::Display for $Idx {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        // vector newtype

        $(#[$vec_meta])*
        #[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vec_vis struct $Vec<T>(::std::vec::Vec<T>);

        impl<T> ::std::ops::Index<$Idx> for $Vec<T> {
            type Output = T;
            #[inline] fn index(&self, i: $Idx) -> &Self::Output { &self.0[i.0] }
        }
        impl<T> ::std::ops::IndexMut<$Idx> for $Vec<T> {
            #[inline] fn index_mut(&mut self, i: $Idx) -> &mut Self::Output { &mut self.0[i.0] }
        }

        impl<T> $Vec<T> {
            #[inline] pub fn new() -> Self { Self(::std::vec::Vec::new()) }
            #[inline] pub fn with_capacity(c: usize) -> Self { Self(::std::vec::Vec::with_capacity(c)) }

            #[inline] pub fn len(&self) -> usize { self.0.len() }
            #[inline] pub fn is_empty(&self) -> bool { self.0.is_empty() }

            #[inline] pub fn push(&mut self, value: T) { self.0.push(value) }

            #[inline] pub fn get(&self, idx: $Idx) -> Option<&T> { self.0.get(idx.0) }
            #[inline] pub fn get_mut(&mut self, idx: $Idx) -> Option<&mut T> { self.0.get_mut(idx.0) }

            #[inline] pub fn iter<'a>(&'a self) -> ::std::iter::Map<::std::iter::Enumerate<::std::slice::Iter<'a, T>>, fn((usize, &T)) -> ($Idx, &T)> {
                self.0.iter().enumerate().map(|(u, t)| ($Idx(u), t))
            }

            /// Positions whose entry satisfies `pred`, in increasing order.
            pub fn positions<'a>(&'a self, mut pred: impl FnMut(&T) -> bool + 'a) -> impl Iterator<Item = $Idx> + 'a {
                self.0
                    .iter()
                    .enumerate()
                    .filter_map(move |(u, t)| pred(t).then_some($Idx(u)))
            }

            #[inline] pub fn raw(&self) -> &::std::vec::Vec<T> { &self.0 }
        }

        impl<T: Clone> $Vec<T> {
            #[inline] pub fn filled(value: T, len: usize) -> Self { Self(::std::vec![value; len]) }
        }

        impl<T> ::std::iter::FromIterator<T> for $Vec<T> {
            #[inline] fn from_iter<I: ::std::iter::IntoIterator<Item = T>>(it: I) -> Self {
                Self(::std::vec::Vec::from_iter(it))
            }
        }

        impl<T> ::std::convert::From<::std::vec::Vec<T>> for $Vec<T> {
            #[inline] fn from(v: ::std::vec::Vec<T>) -> Self { Self(v) }
        }

        impl<T> ::std::iter::IntoIterator for $Vec<T> {
            type Item = ($Idx, T);
            type IntoIter = ::std::iter::Map<::std::iter::Enumerate<::std::vec::IntoIter<T>>, fn((usize, T)) -> ($Idx, T)>;
            #[inline] fn into_iter(self) -> Self::IntoIter { self.0.into_iter().enumerate().map(|(u, t)| ($Idx(u), t)) }
        }

        impl<'a, T> ::std::iter::IntoIterator for &'a $Vec<T> {
            type Item = ($Idx, &'a T);
            type IntoIter = ::std::iter::Map<
                ::std::iter::Enumerate<::std::slice::Iter<'a, T>>,
                fn((usize, &T)) -> ($Idx, &T),
            >;
            fn into_iter(self) -> Self::IntoIter {
                self.0.iter().enumerate().map(|(u, t)| ($Idx(u), t))
            }
        }
    };
}

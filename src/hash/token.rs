//! Stable byte identity of an element.
//!
//! A filter never looks at an element itself, only at the bytes returned by
//! [`HashToken::token`]. Those bytes must be stable across processes and
//! platforms, otherwise a persisted filter stops recognizing what it stored.
//! That's why this is a separate trait rather than `std::hash::Hash`, whose
//! output is allowed to change between releases and platforms.
//!
//! Two elements producing the same token are the same element as far as the
//! filter is concerned.
//!
//! # Examples
//!
//! ```
//! use slicebloom::hash::HashToken;
//! use std::borrow::Cow;
//!
//! struct UserId {
//!     tenant: u32,
//!     id: u64,
//! }
//!
//! impl HashToken for UserId {
//!     fn token(&self) -> Cow<'_, [u8]> {
//!         let mut bytes = Vec::with_capacity(12);
//!         bytes.extend_from_slice(&self.tenant.to_le_bytes());
//!         bytes.extend_from_slice(&self.id.to_le_bytes());
//!         Cow::Owned(bytes)
//!     }
//! }
//!
//! let a = UserId { tenant: 1, id: 7 };
//! assert_eq!(a.token().len(), 12);
//! ```

use std::borrow::Cow;

/// Deterministic byte representation of an element.
pub trait HashToken {
    /// Bytes identifying this element.
    fn token(&self) -> Cow<'_, [u8]>;
}

impl<T: HashToken + ?Sized> HashToken for &T {
    #[inline]
    fn token(&self) -> Cow<'_, [u8]> {
        (**self).token()
    }
}

impl<T: HashToken + ?Sized> HashToken for Box<T> {
    #[inline]
    fn token(&self) -> Cow<'_, [u8]> {
        (**self).token()
    }
}

impl HashToken for str {
    #[inline]
    fn token(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl HashToken for String {
    #[inline]
    fn token(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl HashToken for [u8] {
    #[inline]
    fn token(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

impl HashToken for Vec<u8> {
    #[inline]
    fn token(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl<const N: usize> HashToken for [u8; N] {
    #[inline]
    fn token(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl HashToken for bool {
    #[inline]
    fn token(&self) -> Cow<'_, [u8]> {
        Cow::Owned(vec![u8::from(*self)])
    }
}

impl HashToken for char {
    #[inline]
    fn token(&self) -> Cow<'_, [u8]> {
        Cow::Owned(u32::from(*self).to_le_bytes().to_vec())
    }
}

// Integers use their little-endian bytes. `usize`/`isize` are widened to 64
// bits so the token doesn't depend on the target's pointer width.
macro_rules! impl_hash_token_int {
    ($($t:ty),*) => {
        $(
            impl HashToken for $t {
                #[inline]
                fn token(&self) -> Cow<'_, [u8]> {
                    Cow::Owned(self.to_le_bytes().to_vec())
                }
            }
        )*
    };
}

impl_hash_token_int!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

impl HashToken for usize {
    #[inline]
    fn token(&self) -> Cow<'_, [u8]> {
        Cow::Owned((*self as u64).to_le_bytes().to_vec())
    }
}

impl HashToken for isize {
    #[inline]
    fn token(&self) -> Cow<'_, [u8]> {
        Cow::Owned((*self as i64).to_le_bytes().to_vec())
    }
}

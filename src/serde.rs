// This file is part of dyn-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `serde` support for [`DynArray`](crate::DynArray).
//!
//! - **Serialize**: as a sequence of the `len` live elements.
//! - **Deserialize**: from any sequence, into an array using `A::default()`.
//!   The sequence's size hint (capped) is used to reserve up front; storage
//!   failures are reported through the deserializer's error type.

// Crate imports
use crate::{policy::AllocPolicy, vec::DynArray};

// Core imports
use core::{fmt, marker::PhantomData};

// External imports - serde
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};

impl<T: Serialize, A: AllocPolicy> Serialize for DynArray<T, A> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        use ser::SerializeSeq;
        let sl = self.as_slice();
        let mut seq = s.serialize_seq(Some(sl.len()))?;
        for item in sl {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

// Size hints come from the input; don't let them pick the allocation size.
const MAX_PREALLOC: usize = 4096;

struct VecVisitor<T, A>(PhantomData<(T, A)>);

impl<'de, T, A> de::Visitor<'de> for VecVisitor<T, A>
where
    T: Deserialize<'de>,
    A: AllocPolicy + Default,
{
    type Value = DynArray<T, A>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a sequence")
    }

    fn visit_seq<S: de::SeqAccess<'de>>(self, mut seq: S) -> Result<Self::Value, S::Error> {
        let mut out = DynArray::<T, A>::new_in(A::default());
        if let Some(hint) = seq.size_hint() {
            out.reserve(hint.min(MAX_PREALLOC)).map_err(de::Error::custom)?;
        }
        while let Some(elem) = seq.next_element::<T>()? {
            out.push(elem).map_err(de::Error::custom)?;
        }
        Ok(out)
    }
}

impl<'de, T, A> Deserialize<'de> for DynArray<T, A>
where
    T: Deserialize<'de>,
    A: AllocPolicy + Default,
{
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_seq(VecVisitor::<T, A>(PhantomData))
    }
}

use std::any::Any;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::convert::TryFrom;
use std::hash::{Hash, Hasher};

use static_assertions::{assert_impl_all, assert_not_impl_any, const_assert_eq};
use tuplet::prelude::*;
use tuplet::{ElementComparer, Error, Tuplet1, Tuplet16, Tuplet17, Tuplet2, Tuplet3, MAX_FLAT_ARITY};

type Ints16 = Tuplet16<i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32>;
type Thirty3 = Tuplet17<
    i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32,
    Tuplet17<
        i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32,
        Tuplet1<i32>,
    >,
>;

const_assert_eq!(MAX_FLAT_ARITY, 16);
const_assert_eq!(<Ints16 as Tuplet>::ARITY, 16);
const_assert_eq!(<Thirty3 as Tuplet>::ARITY, 33);
const_assert_eq!(<Thirty3 as Tuplet>::FLAT_ARITY, 17);

assert_impl_all!(Tuplet2<u8, String>: Clone, Eq, Ord, Hash, Default, Send, Sync);
assert_impl_all!(Tuplet2<u8, u16>: Copy);
assert_not_impl_any!(Tuplet2<u8, String>: Copy);
assert_not_impl_any!(Tuplet1<std::rc::Rc<u8>>: Send, Sync);

fn thirty_three() -> Thirty3 {
    tuplet!(
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25,
        26, 27, 28, 29, 30, 31, 32, 33,
    )
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn nested_display_is_flat() {
    let expected = format!(
        "({})",
        (1..=33).map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
    );
    assert_eq!(thirty_three().to_string(), expected);
}

#[test]
fn nested_debug_is_flat() {
    let t = tuplet!(1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, "seventeen");
    assert_eq!(
        format!("{:?}", t),
        "Tuplet17(1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, \"seventeen\")"
    );
}

#[test]
fn tuplet_in_ordinary_slot_keeps_its_parentheses() {
    let t = tuplet!(1, tuplet!(2, 3), 4);
    assert_eq!(t.to_string(), "(1, (2, 3), 4)");
    assert_eq!(format!("{:?}", t), "Tuplet3(1, Tuplet2(2, 3), 4)");
}

#[test]
fn display_forwards_format_flags() {
    assert_eq!(format!("{:.1}", tuplet!(1.26, 2.0)), "(1.3, 2.0)");
}

#[test]
fn nested_slots_read_back() {
    let t = thirty_three();
    assert_eq!(t.item1(), &1);
    assert_eq!(t.item16(), &16);
    assert_eq!(t.rest().item1(), &17);
    assert_eq!(t.rest().item16(), &32);
    assert_eq!(t.rest().rest().item1(), &33);

    let (first, .., sixteenth, rest) = t.into_parts();
    assert_eq!((first, sixteenth), (1, 16));
    assert_eq!(rest.rest(), &Tuplet1::new(33));
}

#[test]
fn shapes_chosen_by_macro() {
    assert_eq!(tuplet!('x'), Tuplet1::new('x'));
    assert_eq!(tuplet!('x', "y",), Tuplet2::new('x', "y"));
    let sixteen: Ints16 = tuplet!(1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16);
    assert_eq!(sixteen.item16(), &16);
    let seventeen: Tuplet17<i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, i32, Tuplet1<i32>> =
        tuplet!(1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17);
    assert_eq!(seventeen.rest().item1(), &17);
}

#[test]
fn equality_is_structural() {
    assert_eq!(tuplet!(1, "a", 'b'), tuplet!(1, "a", 'b'));
    assert_ne!(tuplet!(1, "a", 'b'), tuplet!(1, "a", 'c'));
    assert_eq!(thirty_three(), thirty_three());

    let mut other = thirty_three().into_parts();
    other.16 = tuplet!(
        17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 34,
    );
    let (a1, a2, a3, a4, a5, a6, a7, a8, a9, a10, a11, a12, a13, a14, a15, a16, rest) = other;
    let other = Tuplet17::new(
        a1, a2, a3, a4, a5, a6, a7, a8, a9, a10, a11, a12, a13, a14, a15, a16, rest,
    );
    assert_ne!(thirty_three(), other);
}

#[test]
fn ordering_is_lexicographic() {
    assert!(tuplet!(1, 9) < tuplet!(2, 0));
    assert!(tuplet!(1, 2) < tuplet!(1, 3));
    assert_eq!(tuplet!("b", 1).max(tuplet!("a", 2)), tuplet!("b", 1));
}

#[test]
fn hash_matches_flat_sequence() {
    assert_eq!(hash_of(&tuplet!(1, 2)), hash_of(&(1, 2)));

    let mut flat = DefaultHasher::new();
    for i in 1..=33 {
        i.hash(&mut flat);
    }
    assert_eq!(hash_of(&thirty_three()), flat.finish());
}

#[test]
fn hash_is_order_sensitive() {
    assert_ne!(hash_of(&tuplet!(1, 2)), hash_of(&tuplet!(2, 1)));
    assert_eq!(hash_of(&tuplet!(1, 2)), hash_of(&tuplet!(1, 2)));

    let set: HashSet<_> = vec![tuplet!(1, 2), tuplet!(2, 1), tuplet!(1, 2)]
        .into_iter()
        .collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn from_std_tuple_and_back() {
    let t = Tuplet3::from((1u8, "two", 3.0f32));
    assert_eq!(t, tuplet!(1u8, "two", 3.0f32));
    assert_eq!(t.into_tuple(), (1u8, "two", 3.0f32));
}

#[test]
fn build_from_vec() {
    assert_eq!(
        Tuplet2::<u8, u8>::try_from(vec![1, 2]),
        Ok(Tuplet2::new(1, 2))
    );
    assert_eq!(
        Tuplet2::<u8, u8>::try_from(vec![1, 2, 3]),
        Err(Error::Arity {
            expected: 2,
            found: 3
        })
    );

    let t = Thirty3::try_from((1..=33).collect::<Vec<_>>()).expect("33 elements");
    assert_eq!(t, thirty_three());
    assert_eq!(
        Thirty3::try_from((1..=32).collect::<Vec<_>>()),
        Err(Error::Arity {
            expected: 33,
            found: 32
        })
    );
}

#[test]
fn elements_are_flattened() {
    let elements = thirty_three()
        .elements()
        .into_iter()
        .map(|e| *e.downcast_ref::<i32>().expect("every element is an i32"))
        .collect::<Vec<_>>();
    assert_eq!(elements, (1..=33).collect::<Vec<_>>());
}

/// Compares integers by absolute value.
struct Magnitude;

impl ElementComparer for Magnitude {
    fn equals(&self, left: &dyn Any, right: &dyn Any) -> bool {
        match (left.downcast_ref::<i32>(), right.downcast_ref::<i32>()) {
            (Some(l), Some(r)) => l.abs() == r.abs(),
            _ => false,
        }
    }

    fn hash(&self, element: &dyn Any, mut state: &mut dyn Hasher) {
        if let Some(i) = element.downcast_ref::<i32>() {
            i.abs().hash(&mut state);
        }
    }
}

#[test]
fn supplied_comparer() {
    let a = tuplet!(1, -2, 3);
    let b = tuplet!(-1, 2, -3);
    assert_ne!(a, b);
    assert!(a.structural_eq(&b, &Magnitude));
    assert!(!a.structural_eq(&tuplet!(1, 2, 4), &Magnitude));

    let hash_with = |t: &Tuplet3<i32, i32, i32>| {
        let mut hasher = DefaultHasher::new();
        t.structural_hash(&Magnitude, &mut hasher);
        hasher.finish()
    };
    assert_eq!(hash_with(&a), hash_with(&b));
}

#[test]
fn supplied_comparer_sees_through_extension_slot() {
    let mut negated = (1..=33).map(|i: i32| -i).collect::<Vec<_>>();
    let t = Thirty3::try_from(negated.clone()).expect("33 elements");
    assert!(t.structural_eq(&thirty_three(), &Magnitude));

    negated[32] = 0;
    let t = Thirty3::try_from(negated).expect("33 elements");
    assert!(!t.structural_eq(&thirty_three(), &Magnitude));
}

/*!

A trait for types that know how to construct themselves with no arguments. Every data plugin
stored in a [`Context`](crate::context::Context) implements it, which is what lets the context
create a plugin lazily the first time it is asked for one.

The constructor is an associated constant rather than a method so that an existing
constructor can be reused without writing a wrapper:

```rust
# use district_spread::New;
#[derive(Default)]
struct DayCounter {
    day: usize,
}

impl New for DayCounter {
    const new: &'static dyn Fn() -> Self = &DayCounter::default;
}

let counter = <DayCounter as New>::new();
assert_eq!(counter.day, 0);
```

*/

use std::any::Any;

/// A `'static` type that can construct itself.
pub trait New: Any + 'static {
    /// A constant reference to a constructor
    #[allow(non_upper_case_globals)]
    const new: &'static dyn Fn() -> Self;
}

impl<T: 'static> New for Vec<T> {
    const new: &'static dyn Fn() -> Self = &Vec::<T>::new;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tally(u32);

    impl New for Tally {
        const new: &'static dyn Fn() -> Self = &|| Tally(7);
    }

    #[test]
    fn constructs_through_the_constant() {
        assert_eq!(<Tally as New>::new().0, 7);
        let names: Vec<&str> = <Vec<&str> as New>::new();
        assert!(names.is_empty());
    }
}

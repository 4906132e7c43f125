//! Miscellaneous utility functionality.
//!
//! Specifically, nothing in here is lexing-related, even though
//! it might be useful outside of this crate.
use macro_pub::macro_pub;

/// Builds a [`HashMap`](std::collections::HashMap) whose values all have the
/// type named before the first `;`, from `key => value` pairs.
///
/// Every value is coerced to that type on insertion, so distinct function
/// items can share one table as function pointers.
#[macro_pub]
macro_rules! map {
    ($value:ty; $($key:expr => $item:expr),* $(,)?) => {{
        let mut map = ::std::collections::HashMap::<_, $value>::new();
        $(map.insert($key, $item);)*
        map
    }};
}

#[cfg(test)]
mod test {
    use crate::util::map;

    fn double(n: u8) -> u8 {
        n.saturating_mul(2)
    }

    fn square(n: u8) -> u8 {
        n.saturating_mul(n)
    }

    #[test]
    fn values_are_coerced_to_the_declared_type() {
        let table = map! { fn(u8) -> u8;
            "double" => double,
            "square" => square,
        };
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("double").map(|f| f(3)), Some(6));
        assert_eq!(table.get("square").map(|f| f(3)), Some(9));
        assert!(table.get("cube").is_none(), "no such entry");
    }
}

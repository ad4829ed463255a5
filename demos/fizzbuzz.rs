//! Lifting functions over wrapped inputs: a lifted function answers only
//! when the wrapped value matches its parameter type, and stays silent
//! otherwise.

use std::any::Any;
use tagmap::Wrapped;

struct Fizz;
struct Buzz;

fn lift_fizzbuzz<T: Any + Send + Sync>(f: fn(&T) -> String) -> impl Fn(Option<&Wrapped>) -> String {
    move |sym| {
        sym.and_then(|w| w.unwrap_ref::<T>())
            .map(f)
            .unwrap_or_default()
    }
}

fn parse_fizzbuzz(i: i32) -> (Option<Wrapped>, Option<Wrapped>) {
    let fizz = (i % 3 == 0).then(|| Wrapped::new(Fizz));
    let buzz = (i % 5 == 0).then(|| Wrapped::new(Buzz));
    (fizz, buzz)
}

fn main() {
    let say_fizz = lift_fizzbuzz::<Fizz>(|_| "fizz".to_string());
    let say_buzz = lift_fizzbuzz::<Buzz>(|_| "buzz".to_string());

    for i in 1..31 {
        let (fizz, buzz) = parse_fizzbuzz(i);
        let res = format!("{}{}", say_fizz(fizz.as_ref()), say_buzz(buzz.as_ref()));
        if !res.is_empty() {
            println!("{} {}", i, res);
        }
    }
}

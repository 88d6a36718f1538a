/*!
A reactive single-value state cell with an error slot and synchronous change
notification.

# Design requirements:
- One value per cell, always present after construction; failures are data
  stored alongside the value, never thrown.
- Subscribers are called synchronously, in subscription order, with the
  current `{value, error}` pair.
- The same callback handle may be registered at most once at a time;
  re-registering it while live is an error, not a silent replace.
- Unsubscription is identity-keyed and idempotent: dropping the returned
  guard releases exactly that registration, regardless of registry churn.
- Silent variants update state without a notification pass.

# Basic usage

```rust
use statecell::{Observable, Snapshot};

let temperature = Observable::new(21.5);
let sub = temperature.subscribe(|pair: Snapshot<f64>| println!("now {}", pair.value)).unwrap();
temperature.set(22.0); // prints "now 22"
drop(sub);
temperature.set(23.5); // no longer printed
```

# Failure reporting

```rust
use statecell::Observable;

let reading = Observable::new(42u32);
reading.fail(std::io::Error::other("sensor offline"));
assert_eq!(reading.value(), 42); // stale value survives the failure
assert!(reading.error().is_some());
reading.set(43); // a new value clears the error
assert!(reading.error().is_none());
```
*/

mod binding;
mod cell;
mod error;
mod observable;
mod subscriber;

#[cfg(feature = "tokio")]
mod wait;

pub use binding::*;
pub use cell::*;
pub use error::*;
pub use observable::*;
pub use subscriber::*;

#[cfg(feature = "tokio")]
pub use wait::*;

use statecell::{Binding, Observable};

#[test]
fn binding_seeds_from_the_current_pair() {
    let o = Observable::new(1);
    o.fail_silent(std::io::Error::other("stale"));

    let binding = Binding::new(&o);
    assert_eq!(binding.value(), 1);
    assert_eq!(binding.error().map(|e| e.to_string()), Some("stale".to_string()));
}

#[test]
fn binding_tracks_notifications() {
    let o = Observable::new(1);
    let binding = Binding::new(&o);

    o.set(2);
    assert_eq!(binding.value(), 2);
    assert!(binding.error().is_none());

    o.fail(std::io::Error::other("x"));
    assert_eq!(binding.value(), 2);
    assert!(binding.error().is_some());
}

#[test]
fn binding_ignores_silent_updates() {
    let o = Observable::new(1);
    let binding = Binding::new(&o);

    o.set_silent(2);
    assert_eq!(binding.value(), 1);

    // The next notification carries the current pair
    o.notify();
    assert_eq!(binding.value(), 2);
}

#[test]
fn dropped_binding_releases_its_subscription() {
    let o = Observable::new(1);
    let binding = Binding::new(&o);
    assert_eq!(format!("{o:?}"), "Observable { subscribers: 1 }");

    drop(binding);
    assert_eq!(format!("{o:?}"), "Observable { subscribers: 0 }");
}

#[test]
fn absent_observable_holds_the_fallback() {
    let binding = Binding::or(None, 9);
    assert_eq!(binding.value(), 9);
    assert!(binding.error().is_none());
}

#[test]
fn present_observable_wins_over_the_fallback() {
    let o = Observable::new(1);
    let binding = Binding::or(Some(&o), 9);
    assert_eq!(binding.value(), 1);

    o.set(5);
    assert_eq!(binding.value(), 5);
}

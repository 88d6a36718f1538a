use std::sync::{Arc, Mutex};

#[allow(unused)]
pub fn watcher<T: Send + Sync + 'static>() -> (Box<dyn Fn(T) + Send + Sync>, Box<dyn Fn() -> Vec<T> + Send + Sync>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let record = {
        let seen = seen.clone();
        Box::new(move |value: T| {
            seen.lock().unwrap().push(value);
        })
    };

    let drain = Box::new(move || {
        let seen: Vec<T> = seen.lock().unwrap().drain(..).collect();
        seen
    });

    (record, drain)
}

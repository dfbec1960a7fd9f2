use std::fmt;

type Listener<T> = Box<dyn FnMut(&T)>;

/// Owned value backing one rendered field.
///
/// The render layer subscribes to learn about changes; every `set` notifies
/// all listeners with the new value.
pub struct ValueCell<T> {
    value: T,
    listeners: Vec<Listener<T>>,
}

impl<T> ValueCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            listeners: Vec::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
        self.notify();
    }

    /// Mutate in place, then notify.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
        self.notify();
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self) {
        for l in self.listeners.iter_mut() {
            l(&self.value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ValueCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueCell")
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

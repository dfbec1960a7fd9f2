use crate::form_core::registry::ComponentRegistry;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusTarget {
    Component(usize),
    Submit,
}

/// Focus ring over focusable components followed by the submit control.
#[derive(Clone, Debug, Default)]
pub struct FocusState {
    order: Vec<FocusTarget>,
    cursor: usize,
}

impl FocusState {
    pub fn new(registry: &ComponentRegistry) -> Self {
        let mut order: Vec<FocusTarget> = registry
            .iter()
            .enumerate()
            .filter(|(_, c)| c.focusable())
            .map(|(i, _)| FocusTarget::Component(i))
            .collect();
        order.push(FocusTarget::Submit);
        Self { order, cursor: 0 }
    }

    pub fn current(&self) -> FocusTarget {
        self.order
            .get(self.cursor)
            .copied()
            .unwrap_or(FocusTarget::Submit)
    }

    pub fn next(&mut self) {
        if !self.order.is_empty() {
            self.cursor = (self.cursor + 1) % self.order.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.order.is_empty() {
            self.cursor = (self.cursor + self.order.len() - 1) % self.order.len();
        }
    }
}

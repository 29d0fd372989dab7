//! Legend with one toggle per category.
//!
//! The legend owns the checked state, so it is the single source of truth for the
//! current [`Selection`]. Every real state flip notifies all registered listeners once.

use plotters::prelude::RGBColor;

use super::util::ColorAssignment;
use crate::error::{ChartError, Result};
use crate::models::{CategoryName, Selection};

/// One control: label, swatch colour and checked flag.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub category: CategoryName,
    pub color: RGBColor,
    pub checked: bool,
}

/// Emitted when a toggle actually changes state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChanged {
    pub category: CategoryName,
    pub checked: bool,
}

type Listener = Box<dyn FnMut()>;

pub struct Legend {
    items: Vec<LegendItem>,
    listeners: Vec<Listener>,
}

impl std::fmt::Debug for Legend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Legend")
            .field("items", &self.items)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Legend {
    /// One unchecked item per category, in category order.
    pub fn new(categories: &[CategoryName], colors: &ColorAssignment) -> Self {
        let items = categories
            .iter()
            .map(|c| LegendItem {
                category: c.clone(),
                color: colors.color(c),
                checked: false,
            })
            .collect();
        Self {
            items,
            listeners: Vec::new(),
        }
    }

    pub fn items(&self) -> &[LegendItem] {
        &self.items
    }

    /// Register a callback fired after every state flip.
    pub fn on_change<F: FnMut() + 'static>(&mut self, f: F) {
        self.listeners.push(Box::new(f));
    }

    /// Checked categories, read fresh from the controls, in category order.
    pub fn selection(&self) -> Selection {
        let checked: Vec<&str> = self
            .items
            .iter()
            .filter(|i| i.checked)
            .map(|i| i.category.as_str())
            .collect();
        let order: Vec<CategoryName> = self.items.iter().map(|i| i.category.clone()).collect();
        Selection::ordered(&order, &checked)
    }

    pub fn is_checked(&self, category: &str) -> Result<bool> {
        Ok(self.item(category)?.checked)
    }

    /// Flip one control.
    pub fn toggle(&mut self, category: &str) -> Result<SelectionChanged> {
        let now = !self.is_checked(category)?;
        self.set_checked(category, now)?
            .ok_or_else(|| ChartError::UnknownCategory(category.to_string()))
    }

    /// Set one control. Returns `None` when it already had that state.
    pub fn set_checked(
        &mut self,
        category: &str,
        checked: bool,
    ) -> Result<Option<SelectionChanged>> {
        let idx = self
            .items
            .iter()
            .position(|i| i.category == category)
            .ok_or_else(|| ChartError::UnknownCategory(category.to_string()))?;
        if self.items[idx].checked == checked {
            return Ok(None);
        }
        self.items[idx].checked = checked;
        self.notify();
        Ok(Some(SelectionChanged {
            category: category.to_string(),
            checked,
        }))
    }

    /// Check every control; each flip notifies.
    pub fn select_all(&mut self) -> Vec<SelectionChanged> {
        self.set_all(true)
    }

    /// Uncheck every control; each flip notifies.
    pub fn clear(&mut self) -> Vec<SelectionChanged> {
        self.set_all(false)
    }

    fn set_all(&mut self, checked: bool) -> Vec<SelectionChanged> {
        let mut events = Vec::new();
        for idx in 0..self.items.len() {
            if self.items[idx].checked != checked {
                self.items[idx].checked = checked;
                self.notify();
                events.push(SelectionChanged {
                    category: self.items[idx].category.clone(),
                    checked,
                });
            }
        }
        events
    }

    fn item(&self, category: &str) -> Result<&LegendItem> {
        self.items
            .iter()
            .find(|i| i.category == category)
            .ok_or_else(|| ChartError::UnknownCategory(category.to_string()))
    }

    fn notify(&mut self) {
        for l in self.listeners.iter_mut() {
            l();
        }
    }
}

//! The engine facade.
//!
//! Owns one sheet, one history, and one cursor. Every mutation runs the same
//! path: capture the old cell state, record it, apply, notify observers. A
//! host rendering the same grid from multiple views must funnel all mutating
//! calls through one engine instance; the engine assumes this and provides no
//! internal locking.

use crate::address::Address;
use crate::cell::{Cell, StyleFlag};
use crate::config::GridConfig;
use crate::cursor::{Cursor, Direction};
use crate::error::EngineError;
use crate::events::{CellChangedEvent, EngineEvent, EventCallback};
use crate::history::{CellChange, History};
use crate::sheet::Sheet;

/// Read-only projection of the active cell for a formula-bar display.
///
/// `raw_content` is the editable text: formula source for formula cells,
/// literal text otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormulaBar {
    pub label: String,
    pub raw_content: String,
}

pub struct Engine {
    sheet: Sheet,
    history: History,
    cursor: Cursor,
    formula_bar: FormulaBar,
    observers: Vec<EventCallback>,
}

impl Engine {
    pub fn new(config: GridConfig) -> Self {
        let mut engine = Self {
            sheet: Sheet::new(config.rows, config.cols),
            history: History::with_depth(config.undo_depth),
            cursor: Cursor::default(),
            formula_bar: FormulaBar::default(),
            observers: Vec::new(),
        };
        engine.refresh_formula_bar();
        engine
    }

    /// Construct with initial cells keyed by label. Seeding is not an edit:
    /// it produces no history entries and fires no events.
    pub fn with_seed<'a, I>(config: GridConfig, seed: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = (&'a str, Cell)>,
    {
        let mut engine = Self::new(config);
        for (label, cell) in seed {
            let addr: Address = label.parse()?;
            engine.check_bounds(addr)?;
            engine.sheet.set(addr, cell);
        }
        engine.refresh_formula_bar();
        Ok(engine)
    }

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    pub fn active(&self) -> Address {
        self.cursor.address()
    }

    pub fn formula_bar(&self) -> &FormulaBar {
        &self.formula_bar
    }

    pub fn read_cell(&self, addr: Address) -> Result<Cell, EngineError> {
        self.check_bounds(addr)?;
        Ok(self.sheet.get(addr))
    }

    /// Write raw input text to a cell. A `=` prefix stores the text as an
    /// opaque formula; otherwise it is stored as a number or literal text.
    /// Style and comment on the cell survive the edit.
    pub fn write_cell(&mut self, addr: Address, raw: &str) -> Result<(), EngineError> {
        self.check_bounds(addr)?;
        let mut cell = self.sheet.get(addr);
        cell.set(raw);
        self.apply(addr, Some(cell));
        Ok(())
    }

    /// Flip a style flag through the same record-then-apply path as value
    /// edits. Two consecutive toggles are two separate undo steps.
    pub fn toggle_style(&mut self, addr: Address, flag: StyleFlag) -> Result<(), EngineError> {
        self.check_bounds(addr)?;
        let mut cell = self.sheet.get(addr);
        cell.toggle(flag);
        self.apply(addr, Some(cell));
        Ok(())
    }

    pub fn clear_cell(&mut self, addr: Address) -> Result<(), EngineError> {
        self.check_bounds(addr)?;
        self.apply(addr, None);
        Ok(())
    }

    /// Restore the store to its state before the most recent mutation.
    /// Returns false (and changes nothing) when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(change) => {
                self.sheet.restore(change.address, change.old.clone());
                self.notify(change.address);
                self.refresh_formula_bar();
                true
            }
            None => false,
        }
    }

    /// Reapply the most recently undone mutation.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(change) => {
                self.sheet.restore(change.address, change.new.clone());
                self.notify(change.address);
                self.refresh_formula_bar();
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Move the active cell one step, clamped at the grid edges. Moving past
    /// an edge is a silent no-op; the returned address is always in bounds.
    pub fn navigate(&mut self, direction: Direction) -> Address {
        self.cursor.step(direction, self.sheet.rows, self.sheet.cols);
        self.refresh_formula_bar();
        self.cursor.address()
    }

    /// Tab mirrors Right: one column over, clamped at the last column. It
    /// does not wrap to the next row.
    pub fn navigate_tab(&mut self) -> Address {
        self.navigate(Direction::Right)
    }

    /// Direct focus set (e.g. from a pointer click). Validated against the
    /// bounds but not clamped.
    pub fn set_active(&mut self, addr: Address) -> Result<(), EngineError> {
        self.check_bounds(addr)?;
        self.cursor.set(addr);
        self.refresh_formula_bar();
        Ok(())
    }

    /// Register an observer invoked after every applied cell change.
    pub fn on_cell_change(&mut self, callback: EventCallback) {
        self.observers.push(callback);
    }

    fn check_bounds(&self, addr: Address) -> Result<(), EngineError> {
        if self.sheet.contains(addr) {
            Ok(())
        } else {
            Err(EngineError::InvalidAddress(addr.label()))
        }
    }

    /// Record-then-apply: one discrete edit is one undo step.
    fn apply(&mut self, addr: Address, new: Option<Cell>) {
        let old = self.sheet.stored(addr).cloned();
        self.history.record(CellChange {
            address: addr,
            old,
            new: new.clone(),
        });
        self.sheet.restore(addr, new);
        self.notify(addr);
        self.refresh_formula_bar();
    }

    fn notify(&mut self, addr: Address) {
        if self.observers.is_empty() {
            return;
        }
        let event = EngineEvent::CellChanged(CellChangedEvent {
            address: addr,
            content: self.sheet.get(addr).content,
        });
        for observer in &mut self.observers {
            observer(&event);
        }
    }

    fn refresh_formula_bar(&mut self) {
        let addr = self.cursor.address();
        self.formula_bar = FormulaBar {
            label: addr.label(),
            raw_content: self.sheet.raw_text(addr),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellContent;

    fn addr(label: &str) -> Address {
        label.parse().unwrap()
    }

    fn engine_10x10() -> Engine {
        Engine::new(GridConfig::new(10, 10))
    }

    #[test]
    fn test_write_then_read() {
        let mut engine = engine_10x10();
        engine.write_cell(addr("A1"), "hello").unwrap();
        let cell = engine.read_cell(addr("A1")).unwrap();
        assert_eq!(cell.content, CellContent::Text("hello".to_string()));
    }

    #[test]
    fn test_formula_stored_opaque() {
        let mut engine = engine_10x10();
        engine.write_cell(addr("B2"), "=SUM(A1:A5)").unwrap();
        let cell = engine.read_cell(addr("B2")).unwrap();
        assert_eq!(
            cell.content,
            CellContent::Formula {
                source: "=SUM(A1:A5)".to_string()
            }
        );
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut engine = engine_10x10();
        let bad = Address::new(10, 0);
        assert!(matches!(
            engine.read_cell(bad),
            Err(EngineError::InvalidAddress(_))
        ));
        assert!(engine.write_cell(bad, "x").is_err());
        assert!(engine.clear_cell(bad).is_err());
        assert!(engine.toggle_style(bad, StyleFlag::Bold).is_err());
        assert!(engine.set_active(bad).is_err());
    }

    #[test]
    fn test_undo_restores_exact_pre_write_state() {
        let mut engine = engine_10x10();
        engine.write_cell(addr("A1"), "before").unwrap();
        let snapshot = engine.sheet().clone();

        engine.write_cell(addr("A1"), "after").unwrap();
        assert!(engine.undo());
        assert_eq!(*engine.sheet(), snapshot);

        assert!(engine.redo());
        assert_eq!(
            engine.read_cell(addr("A1")).unwrap().content,
            CellContent::Text("after".to_string())
        );
    }

    #[test]
    fn test_undo_of_first_write_leaves_cell_unallocated() {
        let mut engine = engine_10x10();
        engine.write_cell(addr("C3"), "x").unwrap();
        assert!(engine.undo());
        assert!(engine.sheet().stored(addr("C3")).is_none());
    }

    #[test]
    fn test_undo_restores_cleared_cell() {
        let mut engine = engine_10x10();
        engine.write_cell(addr("A1"), "keep me").unwrap();
        engine.clear_cell(addr("A1")).unwrap();
        assert_eq!(engine.sheet().raw_text(addr("A1")), "");

        assert!(engine.undo());
        assert_eq!(engine.sheet().raw_text(addr("A1")), "keep me");
    }

    #[test]
    fn test_empty_history_is_noop() {
        let mut engine = engine_10x10();
        assert!(!engine.undo());
        assert!(!engine.redo());
    }

    #[test]
    fn test_new_write_invalidates_redo() {
        let mut engine = engine_10x10();
        engine.write_cell(addr("A1"), "one").unwrap();
        engine.write_cell(addr("A1"), "two").unwrap();
        assert!(engine.undo());

        engine.write_cell(addr("A1"), "three").unwrap();
        let snapshot = engine.sheet().clone();
        assert!(!engine.redo());
        assert_eq!(*engine.sheet(), snapshot);
    }

    #[test]
    fn test_history_bound() {
        let mut engine = engine_10x10();
        // Default depth is 50; 55 writes keep only the 50 most recent
        for n in 0..55 {
            engine.write_cell(addr("A1"), &n.to_string()).unwrap();
        }
        let mut undone = 0;
        while engine.undo() {
            undone += 1;
        }
        assert_eq!(undone, 50);
    }

    #[test]
    fn test_toggle_style_twice_is_two_undo_steps() {
        let mut engine = engine_10x10();
        engine.toggle_style(addr("A1"), StyleFlag::Bold).unwrap();
        engine.toggle_style(addr("A1"), StyleFlag::Bold).unwrap();
        assert!(!engine.read_cell(addr("A1")).unwrap().style.bold);

        assert!(engine.undo());
        assert!(engine.read_cell(addr("A1")).unwrap().style.bold);
        assert!(engine.undo());
        assert!(!engine.read_cell(addr("A1")).unwrap().style.bold);
    }

    #[test]
    fn test_style_toggle_preserves_content() {
        let mut engine = engine_10x10();
        engine.write_cell(addr("A1"), "42").unwrap();
        engine.toggle_style(addr("A1"), StyleFlag::Italic).unwrap();

        let cell = engine.read_cell(addr("A1")).unwrap();
        assert_eq!(cell.content, CellContent::Number(42.0));
        assert!(cell.style.italic);
    }

    #[test]
    fn test_navigation_clamps() {
        let mut engine = engine_10x10();
        assert_eq!(engine.navigate(Direction::Up), addr("A1"));
        assert_eq!(engine.navigate(Direction::Left), addr("A1"));

        engine.set_active(addr("J10")).unwrap();
        assert_eq!(engine.navigate(Direction::Down), addr("J10"));
        assert_eq!(engine.navigate(Direction::Right), addr("J10"));
    }

    #[test]
    fn test_tab_clamps_without_wrapping() {
        let mut engine = engine_10x10();
        engine.set_active(addr("I1")).unwrap();
        assert_eq!(engine.navigate_tab(), addr("J1"));
        // At the last column Tab stays put instead of wrapping to A2
        assert_eq!(engine.navigate_tab(), addr("J1"));
        assert_eq!(engine.active(), addr("J1"));
    }

    #[test]
    fn test_formula_bar_tracks_navigation() {
        let mut engine = engine_10x10();
        engine.write_cell(addr("B1"), "=A1*2").unwrap();

        engine.navigate(Direction::Right);
        assert_eq!(engine.formula_bar().label, "B1");
        assert_eq!(engine.formula_bar().raw_content, "=A1*2");

        engine.navigate(Direction::Right);
        assert_eq!(engine.formula_bar().label, "C1");
        assert_eq!(engine.formula_bar().raw_content, "");
    }

    #[test]
    fn test_formula_bar_tracks_set_active() {
        let mut engine = engine_10x10();
        engine.write_cell(addr("D4"), "totals").unwrap();
        engine.set_active(addr("D4")).unwrap();
        assert_eq!(engine.formula_bar().label, "D4");
        assert_eq!(engine.formula_bar().raw_content, "totals");
    }

    #[test]
    fn test_seed_places_cells_without_history() {
        let seed = vec![
            ("A1", Cell::from_input("Name")),
            ("B1", Cell::from_input("42")),
        ];
        let mut engine = Engine::with_seed(GridConfig::new(10, 10), seed).unwrap();

        assert_eq!(
            engine.read_cell(addr("B1")).unwrap().content,
            CellContent::Number(42.0)
        );
        // Seeding is construction, not editing
        assert!(!engine.undo());
    }

    #[test]
    fn test_seed_rejects_bad_labels() {
        let result = Engine::with_seed(GridConfig::new(10, 10), vec![("1A", Cell::new())]);
        assert!(matches!(result, Err(EngineError::InvalidAddress(_))));

        let result = Engine::with_seed(GridConfig::new(10, 10), vec![("A11", Cell::new())]);
        assert!(matches!(result, Err(EngineError::InvalidAddress(_))));
    }

    #[test]
    fn test_observers_see_each_mutation() {
        use crate::events::EventCollector;
        use std::cell::RefCell;
        use std::rc::Rc;

        let collector = Rc::new(RefCell::new(EventCollector::new()));
        let sink = Rc::clone(&collector);

        let mut engine = engine_10x10();
        engine.on_cell_change(Box::new(move |event| {
            sink.borrow_mut().push(event.clone());
        }));

        engine.write_cell(addr("A1"), "x").unwrap();
        engine.toggle_style(addr("A1"), StyleFlag::Bold).unwrap();
        engine.clear_cell(addr("A1")).unwrap();
        assert_eq!(collector.borrow().len(), 3);

        // Undo of the clear notifies with the restored content
        assert!(engine.undo());
        let events = collector.borrow();
        let last = events.cell_changed()[3];
        assert_eq!(last.address, addr("A1"));
        assert_eq!(last.content, CellContent::Text("x".to_string()));
    }
}

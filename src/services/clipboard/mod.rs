//! Cell clipboard: copy, paste, and clear-to-default.
//!
//! The controller owns only a single in-memory slot and reaches cell
//! content through the host's `CellValues` accessor. Mirroring to a system
//! clipboard is best-effort; failures fall back silently to the slot.

use crate::models::selection::CellRef;
use crate::services::selection::SelectionController;

/// Shape of the value a cell holds.
#[derive(Debug, Clone, PartialEq)]
pub enum CellField {
    /// Enumerated field; only the listed option labels are valid.
    Choice(Vec<String>),
    /// Free text.
    Text,
}

impl CellField {
    /// The value a cleared cell resets to: the first option for enumerated
    /// fields, the empty string for free text.
    pub fn default_value(&self) -> String {
        match self {
            CellField::Choice(options) => options.first().cloned().unwrap_or_default(),
            CellField::Text => String::new(),
        }
    }

    fn accepts(&self, text: &str) -> bool {
        match self {
            CellField::Choice(options) => options.iter().any(|o| o == text),
            CellField::Text => true,
        }
    }
}

/// Host-supplied access to cell content. The engine never knows what a
/// cell's text means, only how to read and write it.
pub trait CellValues {
    fn text(&self, row_id: &str, column_id: &str) -> Option<String>;
    fn field(&self, row_id: &str, column_id: &str) -> CellField;
    fn set_text(&mut self, row_id: &str, column_id: &str, text: &str);
}

/// Best-effort bridge to the platform clipboard.
pub trait SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), String>;
}

/// No-platform fallback; every write "succeeds" into the void.
#[derive(Debug, Default)]
pub struct NullClipboard;

impl SystemClipboard for NullClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), String> {
        Ok(())
    }
}

/// The single most-recent copy.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipboardSlot {
    pub row_id: String,
    pub column_id: String,
    pub text: String,
}

/// Copy/paste/clear over the current selection.
#[derive(Debug, Default)]
pub struct ClipboardController {
    slot: Option<ClipboardSlot>,
}

impl ClipboardController {
    pub fn new() -> Self {
        Self { slot: None }
    }

    pub fn slot(&self) -> Option<&ClipboardSlot> {
        self.slot.as_ref()
    }

    /// Copy the source cell's text into the slot.
    ///
    /// Source priority: active cell, else first member of the
    /// multi-selection, else the caller's fallback (typically the
    /// highlighted row's designated column). Returns false when no source
    /// resolves.
    pub fn copy(
        &mut self,
        selection: &SelectionController,
        fallback: Option<&CellRef>,
        values: &dyn CellValues,
        system: &mut dyn SystemClipboard,
    ) -> bool {
        let Some(source) = Self::source_cell(selection, fallback) else {
            return false;
        };
        let text = values.text(&source.row_id, &source.column_id).unwrap_or_default();
        if let Err(err) = system.set_text(&text) {
            log::debug!("System clipboard unavailable ({}); keeping in-memory slot", err);
        }
        self.slot = Some(ClipboardSlot {
            row_id: source.row_id.clone(),
            column_id: source.column_id.clone(),
            text,
        });
        true
    }

    /// Apply the slot's text to the target cells.
    ///
    /// Targets every selected cell when the multi-selection holds more than
    /// one, else the active/fallback cell. The exact cell the text was
    /// copied from is never written back. Enumerated fields only accept
    /// text matching one of their option labels.
    pub fn paste(
        &self,
        selection: &SelectionController,
        fallback: Option<&CellRef>,
        values: &mut dyn CellValues,
    ) -> usize {
        let Some(slot) = &self.slot else {
            return 0;
        };

        let mut applied = 0;
        for target in Self::target_cells(selection, fallback) {
            if target.same_cell(&slot.row_id, &slot.column_id) {
                continue;
            }
            let field = values.field(&target.row_id, &target.column_id);
            if field.accepts(&slot.text) {
                values.set_text(&target.row_id, &target.column_id, &slot.text);
                applied += 1;
            } else {
                log::debug!(
                    "Paste skipped for ({}, {}): {:?} does not accept {:?}",
                    target.row_id,
                    target.column_id,
                    field,
                    slot.text
                );
            }
        }
        applied
    }

    /// Reset the target cells to their field defaults (delete/backspace).
    /// Same targeting as `paste`.
    pub fn clear_value(
        &self,
        selection: &SelectionController,
        fallback: Option<&CellRef>,
        values: &mut dyn CellValues,
    ) -> usize {
        let mut cleared = 0;
        for target in Self::target_cells(selection, fallback) {
            let default = values.field(&target.row_id, &target.column_id).default_value();
            values.set_text(&target.row_id, &target.column_id, &default);
            cleared += 1;
        }
        cleared
    }

    fn source_cell<'a>(
        selection: &'a SelectionController,
        fallback: Option<&'a CellRef>,
    ) -> Option<&'a CellRef> {
        selection
            .active()
            .or_else(|| selection.selected().first())
            .or(fallback)
    }

    fn target_cells<'a>(
        selection: &'a SelectionController,
        fallback: Option<&'a CellRef>,
    ) -> Vec<&'a CellRef> {
        if selection.selected().len() > 1 {
            selection.selected().iter().collect()
        } else {
            selection
                .active()
                .or_else(|| selection.selected().first())
                .or(fallback)
                .into_iter()
                .collect()
        }
    }
}

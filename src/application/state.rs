//! Application state management for the bakery storefront.
//!
//! This module contains the session state and the explicit finite state
//! machine that drives the order dialog through its lifecycle.

use crate::domain::{Catalog, DomainError, DomainResult, OrderDraft, OrderNotifier, RelayError};
use std::time::{Duration, Instant};

/// How long the "thanks for your order" overlay stays up before it
/// auto-dismisses.
pub const CONFIRMATION_DURATION: Duration = Duration::from_millis(3000);

/// How long the startup splash stays up.
pub const SPLASH_DURATION: Duration = Duration::from_millis(1200);

/// Lifecycle of a single order submission.
///
/// Collapsing dialog visibility and submission progress into one enum makes
/// illegal combinations (submitting while closed, double submission)
/// unrepresentable: the submit action only exists in `Editing`, and the draft
/// is held by `Submitting` until a result is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderForm {
    /// No order dialog is open
    Closed,
    /// The dialog is open and the visitor is filling in the draft
    Editing { draft: OrderDraft },
    /// The relay call is in flight; no edits or re-submits are possible
    Submitting { draft: OrderDraft },
    /// The order went out; the confirmation overlay is visible until the
    /// deadline passes
    Succeeded { dismiss_at: Instant },
    /// The relay rejected the order; the draft is kept so the visitor can
    /// retry without re-entering anything
    Failed { draft: OrderDraft, error: RelayError },
}

/// Which field of the order dialog currently has focus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderField {
    Rating,
    Quantity,
    Email,
    Notes,
}

impl OrderField {
    pub fn next(self) -> Self {
        match self {
            OrderField::Rating => OrderField::Quantity,
            OrderField::Quantity => OrderField::Email,
            OrderField::Email => OrderField::Notes,
            OrderField::Notes => OrderField::Rating,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            OrderField::Rating => OrderField::Notes,
            OrderField::Quantity => OrderField::Rating,
            OrderField::Email => OrderField::Quantity,
            OrderField::Notes => OrderField::Email,
        }
    }
}

/// Main session state: the catalog, the current selection, the order form
/// state machine and the timer-driven overlays.
///
/// # Examples
///
/// ```
/// use zumi::application::App;
///
/// let app = App::default();
/// assert_eq!(app.selected, 0);
/// assert!(app.splash_visible());
/// ```
#[derive(Debug)]
pub struct App {
    /// The product listing; mutated only by appending a review on a
    /// successful order
    pub catalog: Catalog,
    /// Currently selected catalog index (zero-based)
    pub selected: usize,
    /// The order dialog state machine
    pub order_form: OrderForm,
    /// Field with focus while the dialog is open
    pub active_field: OrderField,
    /// Cursor position within the focused text field
    pub cursor_position: usize,
    /// Splash overlay deadline; `None` once dismissed
    splash_until: Option<Instant>,
    /// Temporary status message to display
    pub status_message: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Catalog::sample(), Instant::now())
    }
}

impl App {
    pub fn new(catalog: Catalog, now: Instant) -> Self {
        Self {
            catalog,
            selected: 0,
            order_form: OrderForm::Closed,
            active_field: OrderField::Rating,
            cursor_position: 0,
            splash_until: Some(now + SPLASH_DURATION),
            status_message: None,
        }
    }

    pub fn splash_visible(&self) -> bool {
        self.splash_until.is_some()
    }

    /// Sets the current selection.
    ///
    /// Fails with `IndexOutOfRange` when the index is outside catalog bounds,
    /// leaving the selection unchanged. Selecting the already-selected index
    /// is a no-op.
    pub fn select(&mut self, index: usize) -> DomainResult<()> {
        if index >= self.catalog.len() {
            return Err(DomainError::IndexOutOfRange(index));
        }
        self.selected = index;
        Ok(())
    }

    /// Moves the selection down one product, clamped at the end of the
    /// catalog.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.catalog.len() {
            self.selected += 1;
        }
    }

    /// Moves the selection up one product, clamped at the start of the
    /// catalog.
    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Opens the order dialog for the currently selected product.
    ///
    /// Initializes a fresh draft with default quantity 1 and rating 5. Does
    /// nothing unless the form is `Closed`.
    pub fn open_order(&mut self) {
        if !matches!(self.order_form, OrderForm::Closed) {
            return;
        }
        if let Some(product) = self.catalog.get(self.selected) {
            self.order_form = OrderForm::Editing {
                draft: OrderDraft::new(product.id.clone()),
            };
            self.active_field = OrderField::Rating;
            self.cursor_position = 0;
            self.status_message = None;
        }
    }

    /// Closes the dialog and discards the draft. Only valid while editing;
    /// an in-flight submission cannot be cancelled.
    pub fn cancel_order(&mut self) {
        if matches!(self.order_form, OrderForm::Editing { .. }) {
            self.order_form = OrderForm::Closed;
            self.status_message = None;
        }
    }

    /// Attempts the `Editing -> Submitting` transition.
    ///
    /// The only client-side validation gate: the email must be non-empty and
    /// the quantity at least 1. On violation the form stays in `Editing` with
    /// the draft intact and `MissingField` is returned for the caller to
    /// surface. Deliberately no email format check and no quantity upper
    /// bound.
    pub fn submit_order(&mut self) -> DomainResult<()> {
        let form = std::mem::replace(&mut self.order_form, OrderForm::Closed);
        match form {
            OrderForm::Editing { draft } => {
                if draft.email.is_empty() || draft.quantity == 0 {
                    self.order_form = OrderForm::Editing { draft };
                    return Err(DomainError::MissingField(
                        "Please provide an email and quantity.".to_string(),
                    ));
                }
                self.order_form = OrderForm::Submitting { draft };
                Ok(())
            }
            other => {
                self.order_form = other;
                Ok(())
            }
        }
    }

    /// Performs the pending relay call, if any, and applies its outcome.
    ///
    /// Called by the event loop after the `Submitting` frame has rendered.
    /// The errors this can return (`UnknownProduct`, `InvalidScore`) are
    /// invariant violations that cannot arise from normal UI flow and are
    /// propagated as fatal.
    pub fn dispatch_pending_send(
        &mut self,
        notifier: &dyn OrderNotifier,
        now: Instant,
    ) -> DomainResult<()> {
        let OrderForm::Submitting { draft } = &self.order_form else {
            return Ok(());
        };
        let draft = draft.clone();
        let product = self
            .catalog
            .find(&draft.product_id)
            .ok_or_else(|| DomainError::UnknownProduct(draft.product_id.clone()))?
            .clone();

        let result = notifier.send(&draft, &product);
        self.apply_send_result(result, now)
    }

    /// Applies the relay outcome to the state machine.
    ///
    /// On success, atomically as a unit: the draft rating is appended to the
    /// target product, the draft is dropped, the dialog closes and the
    /// confirmation overlay becomes visible with its auto-dismiss deadline.
    /// On failure the draft is preserved and the error surfaced.
    pub fn apply_send_result(
        &mut self,
        result: Result<(), RelayError>,
        now: Instant,
    ) -> DomainResult<()> {
        let form = std::mem::replace(&mut self.order_form, OrderForm::Closed);
        let OrderForm::Submitting { draft } = form else {
            self.order_form = form;
            return Ok(());
        };

        match result {
            Ok(()) => {
                self.catalog.append_review(&draft.product_id, draft.rating)?;
                self.order_form = OrderForm::Succeeded {
                    dismiss_at: now + CONFIRMATION_DURATION,
                };
                self.status_message = None;
                Ok(())
            }
            Err(error) => {
                self.order_form = OrderForm::Failed { draft, error };
                Ok(())
            }
        }
    }

    /// Acknowledges a failed send and returns to editing with the draft
    /// exactly as it was entered.
    pub fn acknowledge_failure(&mut self) {
        let form = std::mem::replace(&mut self.order_form, OrderForm::Closed);
        match form {
            OrderForm::Failed { draft, error } => {
                self.status_message = Some(error.to_string());
                self.order_form = OrderForm::Editing { draft };
            }
            other => self.order_form = other,
        }
    }

    /// Dismisses the confirmation overlay before its deadline.
    pub fn dismiss_confirmation(&mut self) {
        if matches!(self.order_form, OrderForm::Succeeded { .. }) {
            self.order_form = OrderForm::Closed;
        }
    }

    /// Advances timer-driven transitions: splash dismissal and confirmation
    /// auto-dismiss. Idempotent, so ticking after teardown-adjacent states or
    /// repeatedly with the same instant is harmless.
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.splash_until {
            if now >= deadline {
                self.splash_until = None;
            }
        }
        if let OrderForm::Succeeded { dismiss_at } = self.order_form {
            if now >= dismiss_at {
                self.order_form = OrderForm::Closed;
            }
        }
    }

    pub fn draft(&self) -> Option<&OrderDraft> {
        match &self.order_form {
            OrderForm::Editing { draft }
            | OrderForm::Submitting { draft }
            | OrderForm::Failed { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Mutable access to the draft, only while editing.
    fn draft_mut(&mut self) -> Option<&mut OrderDraft> {
        match &mut self.order_form {
            OrderForm::Editing { draft } => Some(draft),
            _ => None,
        }
    }

    /// Moves focus to the next dialog field, placing the cursor at the end
    /// of its content.
    pub fn focus_next_field(&mut self) {
        self.active_field = self.active_field.next();
        self.reset_cursor_for_field();
    }

    /// Moves focus to the previous dialog field.
    pub fn focus_previous_field(&mut self) {
        self.active_field = self.active_field.previous();
        self.reset_cursor_for_field();
    }

    fn reset_cursor_for_field(&mut self) {
        let field = self.active_field;
        self.cursor_position = match (field, self.draft()) {
            (OrderField::Email, Some(draft)) => draft.email.len(),
            (OrderField::Notes, Some(draft)) => draft.notes.len(),
            _ => 0,
        };
    }

    /// Routes a typed character to the focused field.
    ///
    /// Quantity accepts digits only; anything else is rejected at this
    /// boundary and never stored. Rating accepts the digits 1-5 directly.
    pub fn insert_char(&mut self, c: char) {
        let field = self.active_field;
        let cursor = self.cursor_position;
        let Some(draft) = self.draft_mut() else {
            return;
        };
        match field {
            OrderField::Rating => {
                if let Some(d) = c.to_digit(10) {
                    if (1..=5).contains(&d) {
                        draft.rating = d as u8;
                    }
                }
            }
            OrderField::Quantity => {
                if let Some(d) = c.to_digit(10) {
                    draft.quantity = draft.quantity.saturating_mul(10).saturating_add(d);
                }
            }
            OrderField::Email => {
                draft.email.insert(cursor, c);
                self.cursor_position += c.len_utf8();
            }
            OrderField::Notes => {
                draft.notes.insert(cursor, c);
                self.cursor_position += c.len_utf8();
            }
        }
    }

    /// Backspace in the focused field. For quantity this drops the last
    /// digit, which may leave it at 0 until the visitor types a new one.
    pub fn delete_backward(&mut self) {
        let field = self.active_field;
        let cursor = self.cursor_position;
        let Some(draft) = self.draft_mut() else {
            return;
        };
        match field {
            OrderField::Rating => {}
            OrderField::Quantity => {
                draft.quantity /= 10;
            }
            OrderField::Email => {
                if cursor > 0 {
                    let at = prev_boundary(&draft.email, cursor);
                    draft.email.remove(at);
                    self.cursor_position = at;
                }
            }
            OrderField::Notes => {
                if cursor > 0 {
                    let at = prev_boundary(&draft.notes, cursor);
                    draft.notes.remove(at);
                    self.cursor_position = at;
                }
            }
        }
    }

    /// Delete-forward in the focused text field.
    pub fn delete_forward(&mut self) {
        let field = self.active_field;
        let cursor = self.cursor_position;
        let Some(draft) = self.draft_mut() else {
            return;
        };
        match field {
            OrderField::Email => {
                if cursor < draft.email.len() {
                    draft.email.remove(cursor);
                }
            }
            OrderField::Notes => {
                if cursor < draft.notes.len() {
                    draft.notes.remove(cursor);
                }
            }
            _ => {}
        }
    }

    /// Raises the draft rating by one star, clamped at 5.
    pub fn rating_up(&mut self) {
        if let Some(draft) = self.draft_mut() {
            if draft.rating < 5 {
                draft.rating += 1;
            }
        }
    }

    /// Lowers the draft rating by one star, clamped at 1.
    pub fn rating_down(&mut self) {
        if let Some(draft) = self.draft_mut() {
            if draft.rating > 1 {
                draft.rating -= 1;
            }
        }
    }

    pub fn cursor_left(&mut self) {
        let cursor = self.cursor_position;
        self.cursor_position = match (self.active_field, self.draft()) {
            (OrderField::Email, Some(draft)) => prev_boundary(&draft.email, cursor),
            (OrderField::Notes, Some(draft)) => prev_boundary(&draft.notes, cursor),
            _ => 0,
        };
    }

    pub fn cursor_right(&mut self) {
        let cursor = self.cursor_position;
        self.cursor_position = match (self.active_field, self.draft()) {
            (OrderField::Email, Some(draft)) => next_boundary(&draft.email, cursor),
            (OrderField::Notes, Some(draft)) => next_boundary(&draft.notes, cursor),
            _ => 0,
        };
    }

    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor_position = match (self.active_field, self.draft()) {
            (OrderField::Email, Some(draft)) => draft.email.len(),
            (OrderField::Notes, Some(draft)) => draft.notes.len(),
            _ => 0,
        };
    }
}

/// Byte index of the char boundary immediately before `cursor`. The cursor
/// is always kept on a boundary, so slicing up to it is safe.
fn prev_boundary(text: &str, cursor: usize) -> usize {
    text[..cursor]
        .chars()
        .next_back()
        .map(|c| cursor - c.len_utf8())
        .unwrap_or(0)
}

/// Byte index of the char boundary immediately after `cursor`.
fn next_boundary(text: &str, cursor: usize) -> usize {
    text[cursor..]
        .chars()
        .next()
        .map(|c| cursor + c.len_utf8())
        .unwrap_or(cursor)
}

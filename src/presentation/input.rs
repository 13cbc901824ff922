use crate::application::{App, OrderField, OrderForm};
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.order_form {
            OrderForm::Closed => Self::handle_browse_mode(app, key),
            OrderForm::Editing { .. } => Self::handle_dialog_mode(app, key, modifiers),
            // No edits while the relay call is in flight
            OrderForm::Submitting { .. } => {}
            OrderForm::Succeeded { .. } => app.dismiss_confirmation(),
            OrderForm::Failed { .. } => app.acknowledge_failure(),
        }
    }

    fn handle_browse_mode(app: &mut App, key: KeyCode) {
        app.status_message = None;

        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                app.select_previous();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.select_next();
            }
            KeyCode::Enter | KeyCode::Char('o') => {
                app.open_order();
            }
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn handle_dialog_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        // Any edit clears a previously surfaced validation message
        if !matches!(key, KeyCode::Enter) {
            app.status_message = None;
        }

        match key {
            KeyCode::Enter => {
                if let Err(err) = app.submit_order() {
                    // MissingField is user-correctable; surface it and stay
                    // in the dialog
                    app.status_message = Some(err.to_string());
                }
            }
            KeyCode::Esc => {
                app.cancel_order();
            }
            KeyCode::Tab | KeyCode::Down => {
                app.focus_next_field();
            }
            KeyCode::BackTab | KeyCode::Up => {
                app.focus_previous_field();
            }
            KeyCode::Left => {
                if app.active_field == OrderField::Rating {
                    app.rating_down();
                } else {
                    app.cursor_left();
                }
            }
            KeyCode::Right => {
                if app.active_field == OrderField::Rating {
                    app.rating_up();
                } else {
                    app.cursor_right();
                }
            }
            KeyCode::Home => {
                app.cursor_home();
            }
            KeyCode::End => {
                app.cursor_end();
            }
            KeyCode::Backspace => {
                app.delete_backward();
            }
            KeyCode::Delete => {
                app.delete_forward();
            }
            KeyCode::Char(c) => {
                if !modifiers.contains(KeyModifiers::CONTROL) {
                    app.insert_char(c);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{App, OrderField, OrderForm};

    #[test]
    fn test_enter_opens_order_dialog() {
        let mut app = App::default();
        assert!(matches!(app.order_form, OrderForm::Closed));

        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        assert!(matches!(app.order_form, OrderForm::Editing { .. }));
        assert_eq!(app.draft().unwrap().product_id, "smores-hershey");
    }

    #[test]
    fn test_browse_navigation() {
        let mut app = App::default();

        InputHandler::handle_key_event(&mut app, KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(app.selected, 1);

        InputHandler::handle_key_event(&mut app, KeyCode::Char('j'), KeyModifiers::NONE);
        assert_eq!(app.selected, 2);

        // Clamped at the last product
        InputHandler::handle_key_event(&mut app, KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(app.selected, 2);

        InputHandler::handle_key_event(&mut app, KeyCode::Char('k'), KeyModifiers::NONE);
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_escape_cancels_dialog() {
        let mut app = App::default();
        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        InputHandler::handle_key_event(&mut app, KeyCode::Esc, KeyModifiers::NONE);

        assert!(matches!(app.order_form, OrderForm::Closed));
    }

    #[test]
    fn test_submit_without_email_surfaces_validation() {
        let mut app = App::default();
        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        // Enter again tries to submit with an empty email
        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        assert!(matches!(app.order_form, OrderForm::Editing { .. }));
        assert_eq!(
            app.status_message.as_deref(),
            Some("Please provide an email and quantity.")
        );
    }

    #[test]
    fn test_dialog_field_cycling_and_typing() {
        let mut app = App::default();
        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.active_field, OrderField::Rating);

        // Rating adjusts with arrows
        InputHandler::handle_key_event(&mut app, KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(app.draft().unwrap().rating, 4);

        // Tab to quantity; digits only
        InputHandler::handle_key_event(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        InputHandler::handle_key_event(&mut app, KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(app.draft().unwrap().quantity, 1);
        InputHandler::handle_key_event(&mut app, KeyCode::Char('2'), KeyModifiers::NONE);
        assert_eq!(app.draft().unwrap().quantity, 12);

        // Tab to email and type
        InputHandler::handle_key_event(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        for c in "hi@zumi.uk".chars() {
            InputHandler::handle_key_event(&mut app, KeyCode::Char(c), KeyModifiers::NONE);
        }
        assert_eq!(app.draft().unwrap().email, "hi@zumi.uk");

        // Submit now passes the validation gate
        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(matches!(app.order_form, OrderForm::Submitting { .. }));
    }

    #[test]
    fn test_keys_ignored_while_submitting() {
        let mut app = App::default();
        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        app.active_field = OrderField::Email;
        InputHandler::handle_key_event(&mut app, KeyCode::Char('a'), KeyModifiers::NONE);
        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(matches!(app.order_form, OrderForm::Submitting { .. }));

        // A second Enter cannot double-submit or edit anything
        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        InputHandler::handle_key_event(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(matches!(app.order_form, OrderForm::Submitting { .. }));
        assert_eq!(app.draft().unwrap().email, "a");
    }

    #[test]
    fn test_any_key_acknowledges_failure() {
        let mut app = App::default();
        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        app.active_field = OrderField::Email;
        InputHandler::handle_key_event(&mut app, KeyCode::Char('a'), KeyModifiers::NONE);
        app.submit_order().unwrap();
        app.apply_send_result(
            Err(crate::domain::RelayError::Transport("offline".to_string())),
            std::time::Instant::now(),
        )
        .unwrap();
        assert!(matches!(app.order_form, OrderForm::Failed { .. }));

        InputHandler::handle_key_event(&mut app, KeyCode::Char('x'), KeyModifiers::NONE);
        assert!(matches!(app.order_form, OrderForm::Editing { .. }));
        // The acknowledged keypress did not leak into the draft
        assert_eq!(app.draft().unwrap().email, "a");
    }

    #[test]
    fn test_any_key_dismisses_confirmation_early() {
        let mut app = App::default();
        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        app.active_field = OrderField::Email;
        InputHandler::handle_key_event(&mut app, KeyCode::Char('a'), KeyModifiers::NONE);
        app.submit_order().unwrap();
        app.apply_send_result(Ok(()), std::time::Instant::now()).unwrap();
        assert!(matches!(app.order_form, OrderForm::Succeeded { .. }));

        InputHandler::handle_key_event(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert!(matches!(app.order_form, OrderForm::Closed));
    }
}

use crate::application::{App, OrderField, OrderForm};
use crate::domain::services;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_product_card(f, app, chunks[1]);
    render_status_bar(f, app, chunks[2]);

    match &app.order_form {
        OrderForm::Editing { .. } | OrderForm::Submitting { .. } => {
            render_order_dialog(f, app);
        }
        OrderForm::Failed { error, .. } => {
            render_order_dialog(f, app);
            render_failure_popup(f, &error.to_string());
        }
        OrderForm::Succeeded { .. } => render_thanks_popup(f),
        OrderForm::Closed => {}
    }

    if app.splash_visible() {
        render_splash(f);
    }
}

/// Parses a `#RRGGBB` color token; falls back to white for anything else.
fn hex_color(token: &str) -> Color {
    let hex = token.strip_prefix('#').unwrap_or(token);
    if hex.len() != 6 {
        return Color::White;
    }
    match (
        u8::from_str_radix(&hex[0..2], 16),
        u8::from_str_radix(&hex[2..4], 16),
        u8::from_str_radix(&hex[4..6], 16),
    ) {
        (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
        _ => Color::White,
    }
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!(
        "ZUMI Bakery | Cookie {}/{}",
        app.selected + 1,
        app.catalog.len()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_product_card(f: &mut Frame, app: &App, area: Rect) {
    let Some(product) = app.catalog.get(app.selected) else {
        return;
    };
    let tint = hex_color(&product.color);

    let avg = product.average_rating();
    let count = product.reviews.len();
    let rounded = avg.round().clamp(0.0, 5.0) as u8;

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            product.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(product.description.clone()),
        Line::from(""),
        Line::from(format!("{:.1} ★  ({} reviews)", avg, count)),
        Line::from(Span::styled(
            services::star_bar(rounded),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(format!("{} cal", product.calories)),
        Line::from(format!("Allergens: {}", product.allergens.join(", "))),
        Line::from(""),
        Line::from(Span::styled(
            "[ ORDER NOW - press Enter ]",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];

    let card = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(tint))
                .title(format!(" {} ", product.id)),
        );
    f.render_widget(card, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = match &app.order_form {
        OrderForm::Closed => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "↑↓/jk: browse | Enter: order | q: quit | @zumi.bakery.uk".to_string()
            }
        }
        OrderForm::Editing { .. } => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "Tab: next field | ←→: adjust | Enter: send order | Esc: cancel".to_string()
            }
        }
        OrderForm::Submitting { .. } => "Sending order...".to_string(),
        OrderForm::Succeeded { .. } => "Order sent!".to_string(),
        OrderForm::Failed { .. } => "Order failed - press any key to edit and retry".to_string(),
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.order_form {
            OrderForm::Closed => Style::default(),
            OrderForm::Editing { .. } => Style::default().fg(Color::Green),
            OrderForm::Submitting { .. } => Style::default().fg(Color::Yellow),
            OrderForm::Succeeded { .. } => Style::default().fg(Color::Cyan),
            OrderForm::Failed { .. } => Style::default().fg(Color::Red),
        });
    f.render_widget(status, area);
}

fn render_order_dialog(f: &mut Frame, app: &App) {
    let Some(draft) = app.draft() else {
        return;
    };
    let Some(product) = app.catalog.find(&draft.product_id) else {
        return;
    };
    let submitting = matches!(app.order_form, OrderForm::Submitting { .. });

    let popup = centered_popup(f.area(), 46, 13);
    f.render_widget(Clear, popup);

    let field_style = |field: OrderField| {
        if !submitting && app.active_field == field {
            Style::default().bg(Color::Blue).fg(Color::White)
        } else {
            Style::default()
        }
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::raw("Rating:   "),
            Span::styled(services::star_bar(draft.rating), field_style(OrderField::Rating)),
        ]),
        Line::from(vec![
            Span::raw("Quantity: "),
            Span::styled(draft.quantity.to_string(), field_style(OrderField::Quantity)),
        ]),
        Line::from(vec![
            Span::raw("Email:    "),
            Span::styled(
                if draft.email.is_empty() && app.active_field != OrderField::Email {
                    "you@example.com".to_string()
                } else {
                    draft.email.clone()
                },
                field_style(OrderField::Email),
            ),
        ]),
        Line::from(vec![
            Span::raw("Notes:    "),
            Span::styled(draft.notes.clone(), field_style(OrderField::Notes)),
        ]),
        Line::from(""),
        Line::from(if submitting {
            Span::styled("Sending...", Style::default().fg(Color::Yellow))
        } else {
            Span::raw("[Esc] Cancel          [Enter] Send Order")
        }),
    ];

    let dialog = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Order {} ", product.name))
            .border_style(Style::default().fg(hex_color(&product.color))),
    );
    f.render_widget(dialog, popup);
}

fn render_failure_popup(f: &mut Frame, message: &str) {
    let popup = centered_popup(f.area(), 50, 7);
    f.render_widget(Clear, popup);

    let notice = Paragraph::new(vec![
        Line::from(""),
        Line::from("Could not send order. Please try again later."),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Red))),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Order failed ")
            .border_style(Style::default().fg(Color::Red)),
    );
    f.render_widget(notice, popup);
}

fn render_thanks_popup(f: &mut Frame) {
    let popup = centered_popup(f.area(), 36, 6);
    f.render_widget(Clear, popup);

    let thanks = Paragraph::new(vec![
        Line::from("✨"),
        Line::from(Span::styled(
            "Thanks for your order!",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("We'll contact you soon 💌"),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(thanks, popup);
}

fn render_splash(f: &mut Frame) {
    let popup = centered_popup(f.area(), 44, 6);
    f.render_widget(Clear, popup);

    let splash = Paragraph::new(vec![
        Line::from(Span::styled(
            "ZUMI Bakery — Fresh Cookies UK",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Handcrafted Cookies — Made with Love in England"),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL))
    .style(Style::default().fg(Color::Magenta));
    f.render_widget(splash, popup);
}

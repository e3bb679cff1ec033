//! Layout and drawing.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};
use ratatui_image::StatefulImage;

use super::app::App;
use super::form::FieldId;

const FORM_WIDTH: u16 = 38;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let outer = Block::default()
        .title(format!(" {} ", app.config().title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let area = outer.inner(frame.area());
    frame.render_widget(outer, frame.area());

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(3)])
        .split(area);

    let top_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(FORM_WIDTH)])
        .split(main_layout[0]);

    draw_preview(frame, app, top_layout[0]);
    draw_form(frame, app, top_layout[1]);
    draw_status(frame, app, main_layout[1]);

    if app.dialog().is_some() {
        draw_save_dialog(frame, app, area);
    }
}

fn draw_preview(frame: &mut Frame, app: &mut App, area: Rect) {
    let title = match app.figure() {
        Some(fig) => format!(
            " {}:{} / {} points ",
            app.settings().params.freq_x,
            app.settings().params.freq_y,
            fig.len()
        ),
        None => " No figure ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    if let Some(image_state) = app.image_state_mut() {
        let image_widget = StatefulImage::new(None);
        frame.render_stateful_widget(image_widget, inner_area, image_state);
    }
}

fn draw_form(frame: &mut Frame, app: &App, area: Rect) {
    let form = app.form();
    let colors = &app.config().colors;

    let focused = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let normal = Style::default().fg(Color::White);

    let mut lines = Vec::new();
    for id in FieldId::ALL {
        let has_focus = form.focused() == id;
        let style = if has_focus { focused } else { normal };

        if id.is_button() {
            lines.push(Line::default());
            let marker = if has_focus { "►" } else { " " };
            lines.push(Line::from(Span::styled(
                format!("{} [ {} ]", marker, id.label()),
                style,
            )));
            continue;
        }

        let value = match id {
            FieldId::Color => {
                let name = colors
                    .entries()
                    .get(form.color_index())
                    .map(|e| e.name.as_str())
                    .unwrap_or("-");
                format!("< {} >", name)
            }
            FieldId::Width => format!("< {} >", form.width()),
            _ => {
                let text = form.text_field(id).map(|f| f.text()).unwrap_or("");
                if has_focus {
                    format!("{}_", text)
                } else {
                    text.to_string()
                }
            }
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{:<13}", id.label()), style),
            Span::styled(value, style),
        ]));
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .title(" Figure parameters ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)),
    );

    frame.render_widget(panel, area);
}

fn draw_status(frame: &mut Frame, app: &App, area: Rect) {
    let help = "Tab/↑↓ move  ←→ select  Enter update  Ctrl-S save  Esc quit";

    let (text, style) = match app.status() {
        Some(status) if status.is_error() => {
            (status.text().to_string(), Style::default().fg(Color::Red))
        }
        Some(status) => (status.text().to_string(), Style::default().fg(Color::White)),
        None => (String::new(), Style::default()),
    };

    let status = Paragraph::new(Line::from(vec![
        Span::styled(text, style),
        Span::raw("  "),
        Span::styled(help, Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(status, area);
}

fn draw_save_dialog(frame: &mut Frame, app: &App, area: Rect) {
    let Some(dialog) = app.dialog() else {
        return;
    };

    let popup = centered(area, 64, 7);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(vec![
            Span::raw("File name: "),
            Span::styled(
                format!("{}_", dialog.file_name()),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(vec![
            Span::raw("Format:    "),
            Span::styled(dialog.filter().filter_label(), Style::default().fg(Color::Cyan)),
        ]),
        Line::default(),
        Line::from(Span::styled(
            "Enter save  Tab format  Ctrl-U clear  Esc cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let body = Paragraph::new(lines).block(
        Block::default()
            .title(" Save figure ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(body, popup);
}

/// A `width` x `height` rect centered in `area`, clipped to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

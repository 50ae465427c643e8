use lyric_bar::{BarState, SlotFrame, SlotProperty};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::App;

/// Rows spanned by the lyric bar. The main pose sits in the middle; the
/// upcoming pose below it; retiring phrases drift off the top.
const BAR_HEIGHT: u16 = 9;
const MAIN_ROW: i32 = 4;
/// World units of slot y offset per terminal row.
const UNITS_PER_ROW: f32 = 15.0;

pub fn render(frame: &mut Frame, app: &App) {
    let [header_area, _, bar_area, _, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(BAR_HEIGHT),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, app, header_area);
    render_bar(frame, app, bar_area);
    render_hints(frame, hint_area);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let status = if app.paused {
        "⏸ PAUSED"
    } else {
        "▶ PLAYING"
    };
    let text = format!(
        " {} | {} | t={:6.2}s | {:.1}x ",
        app.fixture_name, status, app.song_time, app.speed
    );
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn render_bar(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lyric_frame = app.track.frame();
    for (slot_index, slot) in lyric_frame.slots.iter().enumerate() {
        render_slot(frame, app, slot_index, slot, inner);
    }
}

fn render_slot(frame: &mut Frame, app: &App, index: usize, slot: &SlotFrame, area: Rect) {
    if slot.bar_state == BarState::Hidden || slot.text.is_empty() {
        return;
    }

    let y = app.host.value(index, SlotProperty::PositionY, slot.position_y);
    let alpha = app.host.value(index, SlotProperty::Alpha, slot.alpha);
    let font_size = app.host.value(index, SlotProperty::FontSize, slot.font_size);
    if alpha < 0.05 {
        return;
    }

    let row = MAIN_ROW - (y / UNITS_PER_ROW).round() as i32;
    if row < 0 || row >= i32::from(area.height) {
        return;
    }

    let base = if alpha < 0.5 {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let base = if font_size >= 32.0 {
        base.add_modifier(Modifier::BOLD)
    } else {
        base
    };

    let sung = &slot.text[..slot.highlight_end];
    let rest = &slot.text[slot.highlight_end..];
    let line = Line::from(vec![
        Span::styled(sung.to_string(), base.fg(Color::Cyan)),
        Span::styled(rest.to_string(), base),
    ])
    .centered();

    let row_area = Rect {
        x: area.x,
        y: area.y + row as u16,
        width: area.width,
        height: 1,
    };
    frame.render_widget(Paragraph::new(line), row_area);
}

fn render_hints(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new(" space pause | → skip 1s | r restart | q quit ")
            .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

//! Panel layout and drawing.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use crate::render::Field;

use super::state::{PanelState, SignalState};
use super::style::Styles;

const HOST_FIELDS: [Field; 8] = [
    Field::Hostname,
    Field::OsVersion,
    Field::BuildId,
    Field::Kernel,
    Field::LoadAvg,
    Field::Memory,
    Field::Uptime,
    Field::LocalTime,
];

const NETWORK_FIELDS: [Field; 5] = [
    Field::WanAddr,
    Field::LanAddr,
    Field::ModemAddr,
    Field::ActiveConnections,
    Field::ArpReachable,
];

const MODEM_FIELDS: [Field; 9] = [
    Field::ModemRevision,
    Field::ModemTemperature,
    Field::ModemVoltage,
    Field::ModemConnect,
    Field::ModemSim,
    Field::ModemIsp,
    Field::ModemCqi,
    Field::ModemAmbr,
    Field::ModemNetworkMode,
];

/// Main render function.
pub fn render(frame: &mut Frame, state: &PanelState) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(HOST_FIELDS.len() as u16 + 2),
        Constraint::Length(NETWORK_FIELDS.len() as u16 + 2),
        Constraint::Min(MODEM_FIELDS.len() as u16 + 8),
    ])
    .split(area);

    render_fields(frame, chunks[0], " Host ", &HOST_FIELDS, state);
    render_fields(frame, chunks[1], " Network ", &NETWORK_FIELDS, state);
    render_modem(frame, chunks[2], state);
}

fn field_line<'a>(state: &'a PanelState, field: Field) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<12}", field.label()), Styles::label()),
        Span::styled(state.text(field), Styles::value()),
    ])
}

fn render_fields(frame: &mut Frame, area: Rect, title: &str, fields: &[Field], state: &PanelState) {
    let lines: Vec<Line> = fields.iter().map(|f| field_line(state, *f)).collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title.to_string(), Styles::title()));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_modem(frame: &mut Frame, area: Rect, state: &PanelState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Modem ", Styles::title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(MODEM_FIELDS.len() as u16)];
    for _ in &state.signals {
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(0));
    let rows = Layout::vertical(constraints).split(inner);

    let lines: Vec<Line> = MODEM_FIELDS.iter().map(|f| field_line(state, *f)).collect();
    frame.render_widget(Paragraph::new(lines), rows[0]);

    for (i, signal) in state.signals.iter().enumerate() {
        let name_row = rows[1 + i * 2];
        let gauge_row = rows[2 + i * 2];

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("{:<12}{} {}", signal.name, signal.value, signal.unit),
                Styles::label(),
            ))),
            name_row,
        );
        frame.render_widget(
            Gauge::default()
                .gauge_style(Styles::gauge())
                .ratio(gauge_ratio(signal))
                .label(format!("{}", signal.value)),
            gauge_row,
        );
    }
}

/// Position of the value within the gauge bounds, clamped to `0.0..=1.0`.
/// A degenerate range (max <= min) renders as an empty gauge.
fn gauge_ratio(signal: &SignalState) -> f64 {
    let span = signal.max as f64 - signal.min as f64;
    if span <= 0.0 {
        return 0.0;
    }
    ((signal.value as f64 - signal.min as f64) / span).clamp(0.0, 1.0)
}

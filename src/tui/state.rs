//! Panel state fed through the rendering boundary.

use std::collections::HashMap;

use crate::model::SIGNAL_SLOTS;
use crate::render::{Field, SignalReading, StatusSink};

/// Latest value of one signal gauge.
#[derive(Debug, Clone, Default)]
pub struct SignalState {
    pub name: String,
    pub unit: String,
    pub value: i32,
    pub min: i32,
    pub max: i32,
}

/// Latest text values and gauge readings shown on the dashboard.
///
/// The dashboard carries a widget for every field, so `has_field` keeps its
/// default; a sink with fewer widgets would override it.
#[derive(Debug, Default)]
pub struct PanelState {
    texts: HashMap<Field, String>,
    pub signals: [SignalState; SIGNAL_SLOTS],
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text for a field; empty until first published.
    pub fn text(&self, field: Field) -> &str {
        self.texts.get(&field).map(String::as_str).unwrap_or("")
    }
}

impl StatusSink for PanelState {
    fn set_text(&mut self, field: Field, value: &str) {
        self.texts.insert(field, value.to_string());
    }

    fn set_signal(&mut self, slot: usize, reading: &SignalReading<'_>) {
        if slot >= SIGNAL_SLOTS {
            return;
        }
        self.signals[slot] = SignalState {
            name: reading.name.to_string(),
            unit: reading.unit.to_string(),
            value: reading.value,
            min: reading.min,
            max: reading.max,
        };
    }
}

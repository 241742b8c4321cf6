use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

/// Tellere for lesing fra regnearket. Eget register per instans, ingen global.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    sheet_reads: IntCounterVec,
    rows_skipped: IntCounter,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();
        let sheet_reads = IntCounterVec::new(
            Opts::new("trainlog_sheet_reads_total", "Antall lesinger fra regnearket per fane"),
            &["tab"],
        )?;
        let rows_skipped = IntCounter::new(
            "trainlog_rows_skipped_total",
            "Rader i økten som var for korte til å bli en øvelse",
        )?;

        registry.register(Box::new(sheet_reads.clone()))?;
        registry.register(Box::new(rows_skipped.clone()))?;

        Ok(Self { registry, sheet_reads, rows_skipped })
    }

    pub fn sheet_read(&self, tab: &str) {
        self.sheet_reads.with_label_values(&[tab]).inc();
    }

    pub fn rows_skipped(&self, n: usize) {
        self.rows_skipped.inc_by(n as u64);
    }

    pub fn sheet_reads_for(&self, tab: &str) -> u64 {
        self.sheet_reads.with_label_values(&[tab]).get()
    }

    pub fn rows_skipped_total(&self) -> u64 {
        self.rows_skipped.get()
    }

    /// Prometheus tekstformat.
    pub fn render_text(&self) -> String {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();
        if encoder.encode(&self.registry.gather(), &mut buf).is_err() {
            return String::new();
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics")
            .field("rows_skipped", &self.rows_skipped.get())
            .finish()
    }
}

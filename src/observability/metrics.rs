use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub quotes_total: IntCounterVec,
    pub quote_latency_seconds: HistogramVec,
    pub bookings_total: IntCounterVec,
    pub bookings_stored: IntGauge,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let quotes_total = IntCounterVec::new(
            Opts::new("quotes_total", "Total price quotes by outcome"),
            &["outcome"],
        )
        .expect("valid quotes_total metric");

        let quote_latency_seconds = HistogramVec::new(
            HistogramOpts::new(
                "quote_latency_seconds",
                "Latency of quote computation including distance lookup, in seconds",
            ),
            &["outcome"],
        )
        .expect("valid quote_latency_seconds metric");

        let bookings_total = IntCounterVec::new(
            Opts::new("bookings_total", "Booking confirmations by outcome"),
            &["outcome"],
        )
        .expect("valid bookings_total metric");

        let bookings_stored = IntGauge::new("bookings_stored", "Bookings currently stored")
            .expect("valid bookings_stored metric");

        registry
            .register(Box::new(quotes_total.clone()))
            .expect("register quotes_total");
        registry
            .register(Box::new(quote_latency_seconds.clone()))
            .expect("register quote_latency_seconds");
        registry
            .register(Box::new(bookings_total.clone()))
            .expect("register bookings_total");
        registry
            .register(Box::new(bookings_stored.clone()))
            .expect("register bookings_stored");

        Self {
            registry,
            quotes_total,
            quote_latency_seconds,
            bookings_total,
            bookings_stored,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

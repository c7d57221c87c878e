//! Metrics definitions for the album service.

use shared::metrics_defs::{MetricDef, MetricType};

pub const PHOTOS_FETCH_DURATION: MetricDef = MetricDef {
    name: "photos.fetch.duration",
    metric_type: MetricType::Histogram,
    description: "Time spent calling the photos service in seconds",
};

pub const PHOTOS_FETCH_FAILED: MetricDef = MetricDef {
    name: "photos.fetch.failed",
    metric_type: MetricType::Counter,
    description: "Number of photos service calls that failed, labelled by reason",
};

pub const ALBUM_REQUESTS: MetricDef = MetricDef {
    name: "albums.requests",
    metric_type: MetricType::Counter,
    description: "Number of album requests served, labelled by response status",
};

pub const ALL_METRICS: &[MetricDef] = &[PHOTOS_FETCH_DURATION, PHOTOS_FETCH_FAILED, ALBUM_REQUESTS];

//! Prometheus text exposition (format 0.0.4).
//!
//! Every instrument is its own family: `# HELP`, `# TYPE`, then its samples.
//! Histograms add the implicit `le="+Inf"` bucket, which equals `_count`.

use std::fmt::Write;

use crate::instrument::{format_bound, Counter, Gauge, Histogram, Summary};
use crate::naming::{InstrumentDesc, Labels};

pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// Float formatting accepted by Prometheus parsers.
pub fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".into()
    } else if v == f64::INFINITY {
        "+Inf".into()
    } else if v == f64::NEG_INFINITY {
        "-Inf".into()
    } else {
        format!("{v}")
    }
}

fn write_header(out: &mut String, d: &InstrumentDesc, ty: &str) {
    let _ = writeln!(out, "# HELP {} {}", d.name, escape_help(&d.help));
    let _ = writeln!(out, "# TYPE {} {}", d.name, ty);
}

fn write_sample(out: &mut String, name: &str, labels: &Labels, extra: Option<(&str, &str)>, value: f64) {
    let mut pairs: Vec<String> = labels
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect();
    if let Some((k, v)) = extra {
        pairs.push(format!("{}=\"{}\"", k, escape_label(v)));
    }

    if pairs.is_empty() {
        let _ = writeln!(out, "{} {}", name, format_value(value));
    } else {
        let _ = writeln!(out, "{}{{{}}} {}", name, pairs.join(","), format_value(value));
    }
}

pub(crate) fn render_counter(c: &Counter, out: &mut String) {
    let d = c.desc();
    write_header(out, d, "counter");
    write_sample(out, &d.name, &d.labels, None, c.value());
}

pub(crate) fn render_gauge(g: &Gauge, out: &mut String) {
    let d = g.desc();
    write_header(out, d, "gauge");
    write_sample(out, &d.name, &d.labels, None, g.value());
}

pub(crate) fn render_histogram(h: &Histogram, out: &mut String) {
    let d = h.desc();
    write_header(out, d, "histogram");
    let bucket = format!("{}_bucket", d.name);
    for (le, count) in h.buckets() {
        write_sample(out, &bucket, &d.labels, Some(("le", &format_bound(le))), count as f64);
    }
    write_sample(out, &bucket, &d.labels, Some(("le", "+Inf")), h.count() as f64);
    write_sample(out, &format!("{}_sum", d.name), &d.labels, None, h.sum());
    write_sample(out, &format!("{}_count", d.name), &d.labels, None, h.count() as f64);
}

pub(crate) fn render_summary(s: &Summary, out: &mut String) {
    let d = s.desc();
    write_header(out, d, "summary");
    for (q, estimate) in s.quantiles() {
        write_sample(out, &d.name, &d.labels, Some(("quantile", &format_bound(q))), estimate);
    }
    write_sample(out, &format!("{}_sum", d.name), &d.labels, None, s.sum());
    write_sample(out, &format!("{}_count", d.name), &d.labels, None, s.count() as f64);
}

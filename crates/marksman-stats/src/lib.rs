//! Statistical utilities for the Marksman posture engine.
//!
//! This crate provides descriptive statistics over `f64` datasets. It is used by
//! the stability analyzer to measure how much a joint angle wanders over a
//! recording, and by the session pipeline to summarize per-frame scores.
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//!
//! # Examples
//!
//! ```
//! use marksman_stats::descriptive::DescriptiveStats;
//!
//! let values = [170.0, 190.0, 170.0, 190.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 180.0);
//! assert_eq!(stats.std_dev, 10.0);
//! ```
//!
//! Non-finite values are dropped before any statistic is computed:
//!
//! ```
//! use marksman_stats::descriptive::DescriptiveStats;
//!
//! let stats = DescriptiveStats::new([1.0, f64::NAN, 3.0]).unwrap();
//! assert_eq!(stats.count, 2);
//! assert_eq!(stats.mean, 2.0);
//! ```

pub mod descriptive;

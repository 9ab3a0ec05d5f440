//! PDF report generation.
//!
//! This module lays out paginated tables and encodes them as PDF:
//! - Monthly summary
//! - Member history
//! - Per-type (event) list
//! - Member roster
//! - Full contribution list

pub mod canvas;
pub mod error;
pub mod format;
pub mod layout;
pub mod metrics;
pub mod naming;
pub mod pdf;
pub mod renderer;
pub mod service;


pub use canvas::{Canvas, DrawOp, Page, Rect, Shade};
pub use error::RenderError;
pub use layout::{PageGeometry, PageLayoutState, TablePage, paginate};
pub use metrics::Font;
pub use renderer::{
    RenderedReport, ReportBranding, ReportDocument, ReportRenderer, ReportSchema, SummaryBlock,
    SummaryLine,
};
pub use service::{ReportService, ReportShape};

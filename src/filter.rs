//! Region / RW / RT filtering.
//!
//! [`derive_options`] builds the value lists for the three filter controls from the complete
//! dataset, and [`apply_filters`] computes the filtered view for a [`FilterSelection`].

pub mod engine;
pub mod options;

pub use engine::{apply_filters, FilterSelection};
pub use options::{derive_options, OptionSets};

use crate::dataset::record::{RT, RW, WILAYAH};

/// One of the three filterable columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Region,
    Rw,
    Rt,
}

impl Dimension {
    /// Every dimension, in the order the controls are shown.
    pub const ALL: [Dimension; 3] = [Dimension::Region, Dimension::Rw, Dimension::Rt];

    /// Record field read by this dimension.
    pub fn field(self) -> &'static str {
        match self {
            Dimension::Region => WILAYAH,
            Dimension::Rw => RW,
            Dimension::Rt => RT,
        }
    }

    /// Caption of the control and of its "all" entry.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Region => "Wilayah",
            Dimension::Rw => "RW",
            Dimension::Rt => "RT",
        }
    }

    pub fn all_label(self) -> &'static str {
        match self {
            Dimension::Region => "Semua Wilayah",
            Dimension::Rw => "Semua RW",
            Dimension::Rt => "Semua RT",
        }
    }
}

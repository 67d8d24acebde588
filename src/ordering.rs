//! Release ordering of protocol versions and the fixed reference points
//! feature logic compares against.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::error::CompatError;
use crate::version::VersionHandle;

/// Netty-era release protocol ids in release order, 1.7.2 through 1.21.
///
/// Ids are assigned in ascending order within this range. Pre-netty releases
/// reuse small ids (1.6.4 is 78), so they are ordered by release channel
/// first in [`VersionOrdering::compare`] and never looked up here.
const RELEASE_ORDER: &[i32] = &[
    4,   // 1.7.2-1.7.5
    5,   // 1.7.6-1.7.10
    47,  // 1.8.x
    107, // 1.9
    108, // 1.9.1
    109, // 1.9.2
    110, // 1.9.3-1.9.4
    210, // 1.10.x
    315, // 1.11
    316, // 1.11.1-1.11.2
    335, // 1.12
    338, // 1.12.1
    340, // 1.12.2
    393, // 1.13
    401, // 1.13.1
    404, // 1.13.2
    477, // 1.14
    480, // 1.14.1
    485, // 1.14.2
    490, // 1.14.3
    498, // 1.14.4
    573, // 1.15
    575, // 1.15.1
    578, // 1.15.2
    735, // 1.16
    736, // 1.16.1
    751, // 1.16.2
    753, // 1.16.3
    754, // 1.16.4-1.16.5
    755, // 1.17
    756, // 1.17.1
    757, // 1.18-1.18.1
    758, // 1.18.2
    759, // 1.19
    760, // 1.19.1-1.19.2
    761, // 1.19.3
    762, // 1.19.4
    763, // 1.20-1.20.1
    764, // 1.20.2
    765, // 1.20.3-1.20.4
    766, // 1.20.5-1.20.6
    767, // 1.21
];

/// Result of comparing the left version against the right one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VersionOrder {
    Older,
    Equal,
    Newer,
}

impl VersionOrder {
    pub fn reverse(self) -> Self {
        match self {
            Self::Older => Self::Newer,
            Self::Equal => Self::Equal,
            Self::Newer => Self::Older,
        }
    }
}

impl From<Ordering> for VersionOrder {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Self::Older,
            Ordering::Equal => Self::Equal,
            Ordering::Greater => Self::Newer,
        }
    }
}

/// Named protocol versions used as feature thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReferencePoint {
    V1_7_6,
    V1_8,
    V1_9,
    V1_11_1,
    V1_12_2,
    V1_16,
    V1_20_3,
}

/// (reference, name, label, protocol id), indexed by variant discriminant.
const REFERENCE_TABLE: &[(ReferencePoint, &str, &str, i32)] = &[
    (ReferencePoint::V1_7_6, "1.7.6", "1.7.6-1.7.10", 5),
    (ReferencePoint::V1_8, "1.8", "1.8.x", 47),
    (ReferencePoint::V1_9, "1.9", "1.9", 107),
    (ReferencePoint::V1_11_1, "1.11.1", "1.11.1-1.11.2", 316),
    (ReferencePoint::V1_12_2, "1.12.2", "1.12.2", 340),
    (ReferencePoint::V1_16, "1.16", "1.16", 735),
    (ReferencePoint::V1_20_3, "1.20.3", "1.20.3-1.20.4", 765),
];

impl ReferencePoint {
    pub const ALL: [ReferencePoint; 7] = [
        ReferencePoint::V1_7_6,
        ReferencePoint::V1_8,
        ReferencePoint::V1_9,
        ReferencePoint::V1_11_1,
        ReferencePoint::V1_12_2,
        ReferencePoint::V1_16,
        ReferencePoint::V1_20_3,
    ];

    fn row(self) -> &'static (ReferencePoint, &'static str, &'static str, i32) {
        &REFERENCE_TABLE[self as usize]
    }

    /// Short name accepted by [`FromStr`], e.g. `"1.8"`.
    pub fn name(self) -> &'static str {
        self.row().1
    }

    /// Display label covering every release that shares the protocol id.
    pub fn label(self) -> &'static str {
        self.row().2
    }

    pub fn protocol_id(self) -> i32 {
        self.row().3
    }

    pub fn handle(self) -> VersionHandle {
        VersionHandle::new(self.label(), self.protocol_id())
    }
}

impl fmt::Display for ReferencePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReferencePoint {
    type Err = CompatError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        REFERENCE_TABLE
            .iter()
            .find(|(_, name, label, _)| *name == value || *label == value)
            .map(|row| row.0)
            .ok_or_else(|| CompatError::UnknownReferencePoint(value.to_string()))
    }
}

/// Comparison over protocol versions keyed by release order.
#[derive(Clone, Copy, Debug, Default)]
pub struct VersionOrdering;

impl VersionOrdering {
    /// Position of `id` in the release-order table.
    pub fn rank(id: i32) -> Option<usize> {
        RELEASE_ORDER.iter().position(|known| *known == id)
    }

    pub fn is_known(id: i32) -> bool {
        Self::rank(id).is_some()
    }

    /// Compares two protocol ids from the same era.
    ///
    /// When both ids are in the release-order table their table positions
    /// decide. Otherwise the raw ids are compared numerically; this fallback
    /// is the defined behaviour for ids the table does not list, and is only
    /// meaningful within one release channel era.
    pub fn compare_ids(a: i32, b: i32) -> VersionOrder {
        if a == b {
            return VersionOrder::Equal;
        }
        match (Self::rank(a), Self::rank(b)) {
            (Some(left), Some(right)) => left.cmp(&right).into(),
            _ => {
                trace!(left = a, right = b, "numeric fallback for unlisted protocol id");
                a.cmp(&b).into()
            }
        }
    }

    /// Orders by release channel era first, then by protocol id within the era.
    pub fn compare(a: &VersionHandle, b: &VersionHandle) -> VersionOrder {
        match a.channel().era().cmp(&b.channel().era()) {
            Ordering::Equal => Self::compare_ids(a.id(), b.id()),
            ordering => ordering.into(),
        }
    }

    pub fn equal_to(version: &VersionHandle, reference: ReferencePoint) -> bool {
        Self::compare(version, &reference.handle()) == VersionOrder::Equal
    }

    pub fn older_than_or_equal(version: &VersionHandle, reference: ReferencePoint) -> bool {
        Self::compare(version, &reference.handle()) != VersionOrder::Newer
    }

    pub fn newer_than_or_equal(version: &VersionHandle, reference: ReferencePoint) -> bool {
        Self::compare(version, &reference.handle()) != VersionOrder::Older
    }
}

#[cfg(test)]
#[path = "tests/ordering_tests.rs"]
mod tests;

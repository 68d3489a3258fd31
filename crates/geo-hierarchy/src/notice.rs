//! Operator-visible notices raised while embedding parents

use std::fmt;

/// A parent that could not be embedded in the child-rooted view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The sub-district's `district_id` did not resolve; no `district` key.
    MissingDistrict {
        sub_district_id: Option<i64>,
        district_id: Option<i64>,
    },
    /// The district's `province_id` did not resolve; no `province` key.
    MissingProvince {
        district_id: Option<i64>,
        province_id: Option<i64>,
    },
}

struct Id(Option<i64>);

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => write!(f, "{id}"),
            None => f.write_str("none"),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Notice::MissingDistrict {
                sub_district_id,
                district_id,
            } => write!(
                f,
                "missing district for sub_district_id={} (district_id={}), district not embedded",
                Id(sub_district_id),
                Id(district_id)
            ),
            Notice::MissingProvince {
                district_id,
                province_id,
            } => write!(
                f,
                "missing province for district_id={} (province_id={}), province not embedded",
                Id(district_id),
                Id(province_id)
            ),
        }
    }
}

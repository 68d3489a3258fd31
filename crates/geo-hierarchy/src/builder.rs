//! Nested views over the province, district and sub-district tables
//!
//! Both views are built from lookups made once up front, so construction is
//! linear in the size of the tables. Inputs are never mutated: every emitted
//! record is a copy with its fields in catalog order, followed by any extra
//! fields in source order, followed by the embedded key.

use std::collections::HashMap;

use geo_model::{Catalog, Record, TableKind, TableSpec, as_integer, group_by_field, index_by_id, order_keys};
use serde_json::Value;
use tracing::{debug, warn};

use crate::notice::Notice;
use crate::{Error, Result};

/// Output of [`HierarchyBuilder::build_child_rooted`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChildRooted {
    /// One record per input sub-district, in input order
    pub records: Vec<Record>,
    /// Parents that could not be embedded, in the order they were met
    pub notices: Vec<Notice>,
}

/// Builds the parent-rooted and child-rooted views.
///
/// Field orders, foreign-key fields, and embed keys all come from the
/// catalog: the parent-rooted view nests children under their table name
/// (`districts`, `sub_districts`), the child-rooted view nests parents under
/// their entity name (`district`, `province`).
#[derive(Debug, Clone, Copy)]
pub struct HierarchyBuilder<'a> {
    province: &'a TableSpec,
    district: &'a TableSpec,
    sub_district: &'a TableSpec,
    province_fk: &'a str,
    district_fk: &'a str,
}

impl<'a> HierarchyBuilder<'a> {
    /// # Errors
    ///
    /// Returns an error if the catalog lacks one of the three levels or a
    /// child level has no foreign key.
    pub fn new(catalog: &'a Catalog) -> Result<Self> {
        let province = catalog.require(TableKind::Province)?;
        let district = catalog.require(TableKind::District)?;
        let sub_district = catalog.require(TableKind::SubDistrict)?;

        Ok(Self {
            province,
            district,
            sub_district,
            province_fk: foreign_key_field(district)?,
            district_fk: foreign_key_field(sub_district)?,
        })
    }

    /// Provinces, each with its districts, each with its sub-districts.
    ///
    /// A province without districts gets an empty list. Children keep the
    /// order they have in their source table. Rows whose foreign key is not
    /// an integer belong to no parent.
    pub fn build_parent_rooted(
        &self,
        provinces: &[Record],
        districts: &[Record],
        sub_districts: &[Record],
    ) -> Vec<Record> {
        let districts_by_province = group_by_field(districts, self.province_fk);
        let subs_by_district = group_by_field(sub_districts, self.district_fk);

        let result: Vec<Record> = provinces
            .iter()
            .map(|province| {
                let district_list: Vec<Value> = children(province, &districts_by_province)
                    .iter()
                    .map(|district| {
                        let sub_list: Vec<Value> = children(district, &subs_by_district)
                            .iter()
                            .map(|sub| Value::Object(order_keys(sub, &self.sub_district.columns)))
                            .collect();
                        let mut out = order_keys(district, &self.district.columns);
                        out.insert(self.sub_district.table_name.clone(), Value::Array(sub_list));
                        Value::Object(out)
                    })
                    .collect();

                let mut out = order_keys(province, &self.province.columns);
                out.insert(self.district.table_name.clone(), Value::Array(district_list));
                out
            })
            .collect();

        debug!(provinces = result.len(), "Built parent-rooted view");
        result
    }

    /// Sub-districts, each with its district, which carries its province.
    ///
    /// An unresolved district leaves the `district` key out entirely; an
    /// unresolved province leaves the `province` key out of the embedded
    /// district. Each omission yields a [`Notice`].
    pub fn build_child_rooted(
        &self,
        sub_districts: &[Record],
        districts: &[Record],
        provinces: &[Record],
    ) -> ChildRooted {
        let district_index = index_by_id(districts);
        let province_index = index_by_id(provinces);
        let mut output = ChildRooted::default();

        for sub in sub_districts {
            let mut out = order_keys(sub, &self.sub_district.columns);
            let district_id = sub.get(self.district_fk).and_then(as_integer);

            match district_id.and_then(|id| district_index.get(&id)) {
                Some(district) => {
                    let mut embedded = order_keys(district, &self.district.columns);
                    let province_id = district.get(self.province_fk).and_then(as_integer);
                    match province_id.and_then(|id| province_index.get(&id)) {
                        Some(province) => {
                            embedded.insert(
                                self.province.entity_name.clone(),
                                Value::Object(order_keys(province, &self.province.columns)),
                            );
                        }
                        None => output.notices.push(notify(Notice::MissingProvince {
                            district_id,
                            province_id,
                        })),
                    }
                    out.insert(self.district.entity_name.clone(), Value::Object(embedded));
                }
                None => output.notices.push(notify(Notice::MissingDistrict {
                    sub_district_id: sub.get("id").and_then(as_integer),
                    district_id,
                })),
            }

            output.records.push(out);
        }

        debug!(
            sub_districts = output.records.len(),
            notices = output.notices.len(),
            "Built child-rooted view"
        );
        output
    }
}

fn foreign_key_field(spec: &TableSpec) -> Result<&str> {
    spec.foreign_key
        .as_ref()
        .map(|fk| fk.field.as_str())
        .ok_or_else(|| Error::MissingForeignKey(spec.table_name.clone()))
}

fn children<'g, 'r>(parent: &Record, groups: &'g HashMap<i64, Vec<&'r Record>>) -> &'g [&'r Record] {
    parent
        .get("id")
        .and_then(as_integer)
        .and_then(|id| groups.get(&id))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn notify(notice: Notice) -> Notice {
    warn!("{notice}");
    notice
}

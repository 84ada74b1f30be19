//! Built-in catalog of dataset identities.
//!
//! Each entry states which file stems a logical database can live under and
//! which formats it supports. The catalog is static and shared; controllers
//! never mutate it.

use crate::model::{DatasetSource, FileTypeSet};
use once_cell::sync::Lazy;

static CATALOG: Lazy<Vec<DatasetSource>> = Lazy::new(|| {
    vec![
        DatasetSource {
            name: "item_db",
            supported: FileTypeSet::txt_and_conf(),
            alternative_name: Some("item_db"),
            uses_sub_path: true,
        },
        DatasetSource {
            name: "item_db2",
            supported: FileTypeSet::txt_and_conf(),
            alternative_name: Some("item_db2"),
            uses_sub_path: false,
        },
        DatasetSource {
            name: "mob_db",
            supported: FileTypeSet::txt_only(),
            alternative_name: None,
            uses_sub_path: true,
        },
        DatasetSource {
            name: "mob_skill_db",
            supported: FileTypeSet::txt_only(),
            alternative_name: None,
            uses_sub_path: true,
        },
        DatasetSource {
            name: "skill_db",
            supported: FileTypeSet::txt_only(),
            alternative_name: None,
            uses_sub_path: true,
        },
        DatasetSource {
            name: "skill_cast_db",
            supported: FileTypeSet::txt_only(),
            alternative_name: None,
            uses_sub_path: true,
        },
        DatasetSource {
            name: "quest_db",
            supported: FileTypeSet::txt_only(),
            alternative_name: None,
            uses_sub_path: false,
        },
        DatasetSource {
            name: "homun_db",
            supported: FileTypeSet::txt_only(),
            alternative_name: None,
            uses_sub_path: false,
        },
        DatasetSource {
            name: "pet_db",
            supported: FileTypeSet::txt_only(),
            alternative_name: None,
            uses_sub_path: true,
        },
        DatasetSource {
            name: "item_trade",
            supported: FileTypeSet::txt_only(),
            alternative_name: None,
            uses_sub_path: true,
        },
        DatasetSource {
            name: "item_avail",
            supported: FileTypeSet::txt_only(),
            alternative_name: None,
            uses_sub_path: false,
        },
        DatasetSource {
            name: "const_db",
            supported: FileTypeSet::conf_only(),
            alternative_name: Some("constants"),
            uses_sub_path: false,
        },
    ]
});

pub fn all() -> &'static [DatasetSource] {
    &CATALOG
}

pub fn find(name: &str) -> Option<&'static DatasetSource> {
    CATALOG.iter().find(|s| s.name == name)
}

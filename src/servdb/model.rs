use crate::error::ServdbError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Concrete on-disk representation of a dataset.
///
/// The original tool also carried `Detect` and `Error` sentinel values; here
/// "not yet resolved" is `Option::<FileType>::None` on the request side and a
/// failed negotiation is `None` on the result side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    Txt,
    Conf,
}

impl FileType {
    /// Extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            FileType::Txt => "txt",
            FileType::Conf => "conf",
        }
    }

    /// Derive a file type from a path's extension, if it maps to one.
    pub fn from_path(path: &std::path::Path) -> Option<FileType> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("txt") {
            Some(FileType::Txt)
        } else if ext.eq_ignore_ascii_case("conf") {
            Some(FileType::Conf)
        } else {
            None
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for FileType {
    type Err = ServdbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "txt" => Ok(FileType::Txt),
            "conf" => Ok(FileType::Conf),
            other => Err(ServdbError::Api(format!("Unknown file type: {}", other))),
        }
    }
}

/// Set of file types a dataset can be stored as.
///
/// The original used a bitmask; membership tests on two booleans keep the
/// multi-type semantics without bit twiddling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTypeSet {
    txt: bool,
    conf: bool,
}

impl FileTypeSet {
    pub const fn txt_only() -> Self {
        Self {
            txt: true,
            conf: false,
        }
    }

    pub const fn conf_only() -> Self {
        Self {
            txt: false,
            conf: true,
        }
    }

    pub const fn txt_and_conf() -> Self {
        Self {
            txt: true,
            conf: true,
        }
    }

    pub fn contains(&self, file_type: FileType) -> bool {
        match file_type {
            FileType::Txt => self.txt,
            FileType::Conf => self.conf,
        }
    }

    /// Members in deterministic order (Txt before Conf).
    pub fn iter(&self) -> impl Iterator<Item = FileType> {
        let mut members = Vec::new();
        if self.txt {
            members.push(FileType::Txt);
        }
        if self.conf {
            members.push(FileType::Conf);
        }
        members.into_iter()
    }
}

/// Target server implementation family.
///
/// Hercules stores several databases as libconfig `.conf` files where
/// rAthena keeps comma-separated `.txt`, which drives type negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServerDialect {
    RAthena,
    Hercules,
}

impl Default for ServerDialect {
    fn default() -> Self {
        ServerDialect::RAthena
    }
}

impl fmt::Display for ServerDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerDialect::RAthena => f.write_str("rathena"),
            ServerDialect::Hercules => f.write_str("hercules"),
        }
    }
}

impl FromStr for ServerDialect {
    type Err = ServdbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rathena" => Ok(ServerDialect::RAthena),
            "hercules" => Ok(ServerDialect::Hercules),
            other => Err(ServdbError::Api(format!("Unknown dialect: {}", other))),
        }
    }
}

/// Identity of a logical database: which file stems it can live under and
/// which formats it supports. Defined once in the static catalog and shared
/// read-only by every controller that touches the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSource {
    /// Canonical filename stem, e.g. "item_db".
    pub name: &'static str,
    pub supported: FileTypeSet,
    /// Stem used instead of `name` when Hercules negotiation picks Conf.
    pub alternative_name: Option<&'static str>,
    /// Whether renewal/pre-renewal sub-folders apply to this dataset.
    pub uses_sub_path: bool,
}

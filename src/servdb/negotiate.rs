//! File-type negotiation for writes.
//!
//! A dataset can be representable in more than one on-disk format depending
//! on the target server. Negotiation is a pure function: an explicit request
//! always wins, otherwise Txt is picked tentatively and Conf overrides it
//! when the dialect prefers Conf (evaluation order matters and is kept
//! as-is: the last unconditional branch wins).

use crate::model::{DatasetSource, FileType, ServerDialect};

/// Outcome of a successful negotiation: the format to write and the filename
/// stem to write it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTarget {
    pub file_type: FileType,
    pub filename: String,
}

impl FileTarget {
    /// `stem.ext` filename for the target.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.filename, self.file_type.extension())
    }
}

/// Decide the concrete type and filename for writing `source`, or `None`
/// when no supported type fits ("cannot write").
pub fn negotiate(
    source: &DatasetSource,
    requested: Option<FileType>,
    dialect: ServerDialect,
) -> Option<FileTarget> {
    let mut file_type = requested;
    let mut filename = source.name;

    if file_type.is_none() {
        if source.supported.contains(FileType::Txt) {
            file_type = Some(FileType::Txt);
        }

        if source.supported.contains(FileType::Conf) && dialect == ServerDialect::Hercules {
            file_type = Some(FileType::Conf);
            if let Some(alt) = source.alternative_name {
                filename = alt;
            }
        }
    }

    let file_type = file_type?;

    if !source.supported.contains(file_type) {
        return None;
    }

    Some(FileTarget {
        file_type,
        filename: filename.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileTypeSet;

    fn source(supported: FileTypeSet, alternative: Option<&'static str>) -> DatasetSource {
        DatasetSource {
            name: "item_db",
            supported,
            alternative_name: alternative,
            uses_sub_path: false,
        }
    }

    #[test]
    fn test_explicit_request_wins() {
        let source = source(FileTypeSet::txt_and_conf(), Some("custom"));
        let target = negotiate(&source, Some(FileType::Txt), ServerDialect::Hercules).unwrap();
        // An explicit request keeps the canonical stem.
        assert_eq!(target.file_type, FileType::Txt);
        assert_eq!(target.filename, "item_db");
    }

    #[test]
    fn test_explicit_request_must_be_supported() {
        let source = source(FileTypeSet::txt_only(), None);
        assert_eq!(
            negotiate(&source, Some(FileType::Conf), ServerDialect::Hercules),
            None
        );
    }

    #[test]
    fn test_auto_picks_txt() {
        let source = source(FileTypeSet::txt_and_conf(), Some("custom"));
        let target = negotiate(&source, None, ServerDialect::RAthena).unwrap();
        assert_eq!(target.file_type, FileType::Txt);
        assert_eq!(target.filename, "item_db");
    }

    #[test]
    fn test_hercules_prefers_conf_with_alternative_name() {
        let source = source(FileTypeSet::txt_and_conf(), Some("custom"));
        let target = negotiate(&source, None, ServerDialect::Hercules).unwrap();
        assert_eq!(target.file_type, FileType::Conf);
        assert_eq!(target.filename, "custom");
        assert_eq!(target.file_name(), "custom.conf");
    }

    #[test]
    fn test_hercules_without_alternative_keeps_name() {
        let source = source(FileTypeSet::txt_and_conf(), None);
        let target = negotiate(&source, None, ServerDialect::Hercules).unwrap();
        assert_eq!(target.file_type, FileType::Conf);
        assert_eq!(target.filename, "item_db");
    }

    #[test]
    fn test_conf_only_source_on_rathena_fails() {
        // Txt is never tentatively picked, and the Conf branch needs the
        // Hercules dialect, so nothing concrete is produced.
        let source = source(FileTypeSet::conf_only(), None);
        assert_eq!(negotiate(&source, None, ServerDialect::RAthena), None);
    }

    #[test]
    fn test_negotiate_is_pure() {
        let source = source(FileTypeSet::txt_and_conf(), Some("custom"));
        let a = negotiate(&source, None, ServerDialect::Hercules);
        let b = negotiate(&source, None, ServerDialect::Hercules);
        assert_eq!(a, b);
    }
}

use crate::commands::{CmdMessage, CmdResult, SourceStatus};
use crate::error::Result;
use crate::resolver::PathResolver;
use crate::sources;

pub fn run<R: PathResolver>(resolver: &R) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    result.sources = sources::all()
        .iter()
        .map(|source| SourceStatus {
            name: source.name,
            supported: source.supported,
            path: resolver.detect_path(source),
        })
        .collect();

    let found = result.sources.iter().filter(|s| s.path.is_some()).count();
    if found == 0 {
        result.add_message(CmdMessage::warning(
            "No dataset files found under the configured search roots.",
        ));
    }

    Ok(result)
}

const SEPARATOR: &str = " - ";

/// Structured fields carried by a `"<kind> - <remittant> - <ref> - <bank>"`
/// description. The third segment is not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionParts {
    pub kind: String,
    pub remittant: String,
    pub bank: String,
}

/// Split a statement description into its parts.
///
/// Returns `None` when fewer than four segments are present; the fields are
/// never partially populated.
pub fn parse(description: &str) -> Option<DescriptionParts> {
    let segments: Vec<&str> = description.split(SEPARATOR).collect();
    if segments.len() < 4 {
        return None;
    }
    Some(DescriptionParts {
        kind: segments[0].to_string(),
        remittant: segments[1].to_string(),
        bank: segments[3].to_string(),
    })
}

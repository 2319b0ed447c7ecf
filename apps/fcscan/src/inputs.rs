//! Positional input classification. Pure string inspection, no filesystem access.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Positional arguments sorted by role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanInputs {
    /// Last argument naming an `.xml` file: the scan configuration.
    pub config_file: Option<String>,
    /// Grid logical file names, normalised to `LFN://...`.
    pub lfns: Vec<String>,
    /// Last argument naming a `.so`: the fitter library to ship with the job.
    pub library: Option<String>,
    /// Every argument that is neither an LFN nor an XML. A library is listed here too.
    pub files: Vec<String>,
}

pub fn classify_inputs<S: AsRef<str>>(args: &[S]) -> ScanInputs {
    let mut inputs = ScanInputs::default();

    for arg in args.iter().map(AsRef::as_ref) {
        if arg.contains("LFN:") {
            inputs.lfns.push(normalize_lfn(arg));
        } else if arg.contains(".xml") {
            inputs.config_file = Some(arg.to_string());
        } else {
            inputs.files.push(arg.to_string());
        }
    }
    // Separate pass: the library is matched across every argument, whatever its role above.
    inputs.library = args
        .iter()
        .map(AsRef::as_ref)
        .rev()
        .find(|arg| arg.contains(".so"))
        .map(str::to_string);

    debug!(
        config = ?inputs.config_file,
        lfns = inputs.lfns.len(),
        library = ?inputs.library,
        files = inputs.files.len(),
        "classified inputs"
    );
    inputs
}

/// One left-to-right pass turning `//` into `/`, then restores the `LFN://` scheme separator.
///
/// A run of three slashes keeps two; the grid catalogue accepts those.
pub fn normalize_lfn(arg: &str) -> String {
    arg.replace("//", "/").replace("LFN:/", "LFN://")
}

/// Final path component, splitting on either `/` or `\`.
pub fn reference_id_from_path(path: &str) -> String {
    path.rsplit(['/', '\\']).next().unwrap_or(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifies_each_role() {
        let inputs = classify_inputs(&[
            "scans/fc.xml",
            "LFN:/lhcb/data/a.root",
            "lib/libRapidRun.so",
            "local.root",
        ]);
        assert_eq!(inputs.config_file.as_deref(), Some("scans/fc.xml"));
        assert_eq!(inputs.lfns, vec!["LFN://lhcb/data/a.root"]);
        assert_eq!(inputs.library.as_deref(), Some("lib/libRapidRun.so"));
        assert_eq!(inputs.files, vec!["lib/libRapidRun.so", "local.root"]);
    }

    #[test]
    fn test_last_xml_wins() {
        let inputs = classify_inputs(&["a.xml", "b.xml"]);
        assert_eq!(inputs.config_file.as_deref(), Some("b.xml"));
        assert!(inputs.files.is_empty());
    }

    #[test]
    fn test_xml_matched_anywhere_in_name() {
        let inputs = classify_inputs(&["fc.xml.bak", "data.root"]);
        assert_eq!(inputs.config_file.as_deref(), Some("fc.xml.bak"));
        assert_eq!(inputs.files, vec!["data.root"]);
    }

    #[test]
    fn test_library_found_among_lfns() {
        let inputs = classify_inputs(&["fc.xml", "LFN:/lhcb/libFit.so", "libLocal.so"]);
        assert_eq!(inputs.library.as_deref(), Some("libLocal.so"));
        let inputs = classify_inputs(&["fc.xml", "LFN:/lhcb/libFit.so"]);
        assert_eq!(inputs.library.as_deref(), Some("LFN:/lhcb/libFit.so"));
        assert!(inputs.files.is_empty());
    }

    #[test]
    fn test_lfn_slashes_normalised_in_one_pass() {
        assert_eq!(normalize_lfn("LFN://lhcb//MC/x.root"), "LFN://lhcb/MC/x.root");
        assert_eq!(normalize_lfn("LFN://lhcb//MC///x.root"), "LFN://lhcb/MC//x.root");
        assert_eq!(normalize_lfn("LFN:/lhcb/x.root"), "LFN://lhcb/x.root");
    }

    #[test]
    fn test_reference_id_strips_directories() {
        assert_eq!(reference_id_from_path("/afs/user/scans/fc.xml"), "fc.xml");
        assert_eq!(reference_id_from_path(r"C:\scans\fc.xml"), "fc.xml");
        assert_eq!(reference_id_from_path("fc.xml"), "fc.xml");
    }

    #[test]
    fn test_empty_args() {
        assert_eq!(classify_inputs::<&str>(&[]), ScanInputs::default());
    }
}

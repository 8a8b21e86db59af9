//! [`Frontend`] implementation for JSON netlists.

use std::path::Path;

use log::info;
use strata_common::Interner;
use strata_hierarchy::{Frontend, FrontendError, LibraryFormat};
use strata_ir::Design;

use crate::error::NetlistError;
use crate::reader::read_netlist_file;

/// Loads `.json` library files. Verilog sources are reported as unsupported.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFrontend;

impl Frontend for JsonFrontend {
    fn load(
        &self,
        design: &mut Design,
        interner: &Interner,
        path: &Path,
        format: LibraryFormat,
    ) -> Result<(), FrontendError> {
        if format != LibraryFormat::Netlist {
            return Err(FrontendError::Unsupported(format));
        }
        info!("Loading {format} `{}`", path.display());
        match read_netlist_file(path, design, interner) {
            Ok(_) => Ok(()),
            Err(NetlistError::Io { path, source }) => Err(FrontendError::Io { path, source }),
            Err(other) => Err(FrontendError::Malformed {
                path: path.to_path_buf(),
                message: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verilog_unsupported() {
        let interner = Interner::new();
        let mut design = Design::new();
        let err = JsonFrontend
            .load(&mut design, &interner, Path::new("x.v"), LibraryFormat::Verilog)
            .unwrap_err();
        assert!(matches!(err, FrontendError::Unsupported(LibraryFormat::Verilog)));
    }

    #[test]
    fn bad_json_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let interner = Interner::new();
        let mut design = Design::new();
        let err = JsonFrontend
            .load(&mut design, &interner, &path, LibraryFormat::Netlist)
            .unwrap_err();
        assert!(matches!(err, FrontendError::Malformed { path: ref p, .. } if p == &path));
    }

    #[test]
    fn missing_file_is_io() {
        let interner = Interner::new();
        let mut design = Design::new();
        let err = JsonFrontend
            .load(
                &mut design,
                &interner,
                Path::new("/nonexistent/lib.json"),
                LibraryFormat::Netlist,
            )
            .unwrap_err();
        assert!(matches!(err, FrontendError::Io { .. }));
    }
}

use {
    crate::error::{DeploymentError, Result},
    alloy::primitives::Bytes,
    serde::Deserialize,
    std::{
        fs,
        path::{Path, PathBuf},
    },
};

/// The subset of a Hardhat compilation artifact we need.
#[derive(Deserialize)]
struct Artifact {
    bytecode: String,
}

/// Reads contract creation bytecode out of a directory of compilation
/// artifacts.
///
/// An artifact named `Foo` is looked up as `Foo.json` directly under the root,
/// then anywhere below it (Hardhat nests them as `contracts/Foo.sol/Foo.json`).
#[derive(Debug, Clone)]
pub struct Artifacts {
    root: PathBuf,
}

impl Artifacts {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn bytecode(&self, name: &str) -> Result<Bytes> {
        let file_name = format!("{name}.json");
        let path = find_file(&self.root, &file_name)?.ok_or_else(|| {
            DeploymentError::MissingArtifact {
                name: name.to_string(),
                path: self.root.clone(),
            }
        })?;

        let artifact: Artifact = serde_json::from_slice(&fs::read(&path)?)?;
        let code = artifact.bytecode.trim_start_matches("0x");

        if code.is_empty() {
            return Err(DeploymentError::EmptyBytecode(name.to_string()));
        }

        hex::decode(code)
            .map(Bytes::from)
            .map_err(|err| DeploymentError::InvalidBytecode {
                name: name.to_string(),
                reason: err.to_string(),
            })
    }
}

fn find_file(dir: &Path, file_name: &str) -> Result<Option<PathBuf>> {
    let direct = dir.join(file_name);
    if direct.is_file() {
        return Ok(Some(direct));
    }

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            if let Some(found) = find_file(&path, file_name)? {
                return Ok(Some(found));
            }
        }
    }

    Ok(None)
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use {super::*, assertor::*};

    pub fn write_artifact(dir: &Path, name: &str, bytecode: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(
            dir.join(format!("{name}.json")),
            serde_json::json!({
                "contractName": name,
                "abi": [],
                "bytecode": bytecode,
            })
            .to_string(),
        )
        .unwrap();
    }

    #[test]
    fn reads_nested_hardhat_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        write_artifact(
            &tmp.path().join("contracts/SampleERC20.sol"),
            "SampleERC20",
            "0x6080",
        );

        let code = Artifacts::new(tmp.path()).bytecode("SampleERC20").unwrap();

        assert_that!(code.to_vec()).is_equal_to(vec![0x60, 0x80]);
    }

    #[test]
    fn rejects_missing_and_empty_artifacts() {
        let tmp = tempfile::tempdir().unwrap();
        write_artifact(tmp.path(), "Interface", "0x");
        let artifacts = Artifacts::new(tmp.path());

        assert!(matches!(
            artifacts.bytecode("Interface"),
            Err(DeploymentError::EmptyBytecode(_))
        ));
        assert!(matches!(
            artifacts.bytecode("Holograph"),
            Err(DeploymentError::MissingArtifact { .. })
        ));
    }
}

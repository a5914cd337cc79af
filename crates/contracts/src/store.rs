use {
    crate::{Artifact, ArtifactError},
    std::path::{Path, PathBuf},
    walkdir::WalkDir,
};

/// Hardhat writes the full compiler input/output here. These files are not
/// contract artifacts.
const BUILD_INFO_DIR: &str = "build-info";

/// Read only view on a Hardhat artifacts directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Looks up the artifact of a contract.
    ///
    /// `name` is either a plain contract name (`Meta`), which must be unique
    /// across all sources, or a fully qualified name
    /// (`contracts/Meta.sol:Meta`).
    pub fn find(&self, name: &str) -> Result<Artifact, ArtifactError> {
        if let Some((source, contract)) = name.rsplit_once(':') {
            let path = self.root.join(source).join(format!("{contract}.json"));
            if !path.is_file() {
                return Err(ArtifactError::NotFound {
                    name: name.to_owned(),
                    root: self.root.clone(),
                });
            }
            return read(&path);
        }

        if !self.root.is_dir() {
            return Err(ArtifactError::NotFound {
                name: name.to_owned(),
                root: self.root.clone(),
            });
        }

        let file_name = format!("{name}.json");
        let mut candidates = Vec::new();
        for entry in WalkDir::new(&self.root)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != BUILD_INFO_DIR)
        {
            let entry = entry.map_err(walk_error)?;
            if entry.file_type().is_file() && entry.file_name() == file_name.as_str() {
                candidates.push(entry.into_path());
            }
        }
        candidates.sort();
        tracing::debug!(?candidates, name, "artifact candidates");

        match candidates.as_slice() {
            [] => Err(ArtifactError::NotFound {
                name: name.to_owned(),
                root: self.root.clone(),
            }),
            [path] => read(path),
            paths => Err(ArtifactError::Ambiguous {
                name: name.to_owned(),
                candidates: paths
                    .iter()
                    .map(|path| self.qualified_name(path))
                    .collect(),
            }),
        }
    }

    /// `<source>:<contract>` derived from where Hardhat put the artifact,
    /// `<root>/<source>/<contract>.json`.
    fn qualified_name(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let source = relative
            .parent()
            .map(|parent| {
                parent
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .unwrap_or_default();
        let contract = relative
            .file_stem()
            .map(|stem| stem.to_string_lossy())
            .unwrap_or_default();
        format!("{source}:{contract}")
    }
}

fn walk_error(err: walkdir::Error) -> ArtifactError {
    ArtifactError::Io {
        path: err.path().map(Path::to_owned).unwrap_or_default(),
        source: err.into(),
    }
}

fn read(path: &Path) -> Result<Artifact, ArtifactError> {
    let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_owned(),
        source,
    })?;
    let artifact = serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
        path: path.to_owned(),
        source,
    })?;
    tracing::debug!(?path, "loaded artifact");
    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json, std::fs, tempfile::TempDir};

    fn write_artifact(root: &Path, source: &str, name: &str) {
        let dir = root.join(source);
        fs::create_dir_all(&dir).unwrap();
        let artifact = json!({
            "_format": "hh-sol-artifact-1",
            "contractName": name,
            "sourceName": source,
            "abi": [],
            "bytecode": "0x600a600c600039600a6000f3602a60005260206000f3",
            "deployedBytecode": "0x602a60005260206000f3",
            "linkReferences": {},
            "deployedLinkReferences": {}
        });
        fs::write(dir.join(format!("{name}.json")), artifact.to_string()).unwrap();
        fs::write(
            dir.join(format!("{name}.dbg.json")),
            json!({ "_format": "hh-sol-dbg-1", "buildInfo": "../../build-info/1.json" })
                .to_string(),
        )
        .unwrap();
    }

    #[test]
    fn finds_contract_by_name() {
        let dir = TempDir::new().unwrap();
        write_artifact(dir.path(), "contracts/Meta.sol", "Meta");
        write_artifact(dir.path(), "contracts/Other.sol", "Other");

        let artifact = ArtifactStore::new(dir.path()).find("Meta").unwrap();
        assert_eq!(artifact.contract_name, "Meta");
        assert_eq!(artifact.source_name, "contracts/Meta.sol");
    }

    #[test]
    fn ignores_build_info() {
        let dir = TempDir::new().unwrap();
        write_artifact(dir.path(), "contracts/Meta.sol", "Meta");
        let build_info = dir.path().join(BUILD_INFO_DIR);
        fs::create_dir_all(&build_info).unwrap();
        fs::write(build_info.join("Meta.json"), "not an artifact").unwrap();

        let artifact = ArtifactStore::new(dir.path()).find("Meta").unwrap();
        assert_eq!(artifact.fully_qualified_name(), "contracts/Meta.sol:Meta");
    }

    #[test]
    fn missing_contract() {
        let dir = TempDir::new().unwrap();
        write_artifact(dir.path(), "contracts/Other.sol", "Other");

        let store = ArtifactStore::new(dir.path());
        assert!(matches!(
            store.find("Meta"),
            Err(ArtifactError::NotFound { .. })
        ));
        assert!(matches!(
            store.find("contracts/Meta.sol:Meta"),
            Err(ArtifactError::NotFound { .. })
        ));
        assert!(matches!(
            ArtifactStore::new(dir.path().join("missing")).find("Meta"),
            Err(ArtifactError::NotFound { .. })
        ));
    }

    #[test]
    fn ambiguous_name_requires_qualification() {
        let dir = TempDir::new().unwrap();
        write_artifact(dir.path(), "contracts/Meta.sol", "Meta");
        write_artifact(dir.path(), "contracts/legacy/Meta.sol", "Meta");

        let store = ArtifactStore::new(dir.path());
        match store.find("Meta") {
            Err(ArtifactError::Ambiguous { candidates, .. }) => assert_eq!(
                candidates,
                vec![
                    "contracts/Meta.sol:Meta".to_string(),
                    "contracts/legacy/Meta.sol:Meta".to_string(),
                ]
            ),
            other => panic!("unexpected result {other:?}"),
        }

        let artifact = store.find("contracts/legacy/Meta.sol:Meta").unwrap();
        assert_eq!(artifact.source_name, "contracts/legacy/Meta.sol");
    }

    #[test]
    fn ambiguity_is_reported_even_for_malformed_duplicates() {
        let dir = TempDir::new().unwrap();
        write_artifact(dir.path(), "contracts/Meta.sol", "Meta");
        let broken = dir.path().join("contracts/legacy/Meta.sol");
        fs::create_dir_all(&broken).unwrap();
        fs::write(broken.join("Meta.json"), "{").unwrap();

        match ArtifactStore::new(dir.path()).find("Meta") {
            Err(ArtifactError::Ambiguous { candidates, .. }) => assert_eq!(
                candidates,
                vec![
                    "contracts/Meta.sol:Meta".to_string(),
                    "contracts/legacy/Meta.sol:Meta".to_string(),
                ]
            ),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        write_artifact(dir.path(), "contracts/Meta.sol", "Meta");
        let locked = dir.path().join("contracts/Meta.sol");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        let readable_anyway = fs::read_dir(&locked).is_ok();

        let result = ArtifactStore::new(dir.path()).find("Meta");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // Permission bits don't apply to privileged users.
        if readable_anyway {
            return;
        }
        match result {
            Err(ArtifactError::Io { path, .. }) => assert_eq!(path, locked),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn malformed_artifact() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("contracts/Meta.sol");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("Meta.json"), "{").unwrap();

        assert!(matches!(
            ArtifactStore::new(dir.path()).find("Meta"),
            Err(ArtifactError::Parse { .. })
        ));
    }
}

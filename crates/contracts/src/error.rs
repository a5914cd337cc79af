use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("no artifact for contract {name:?} in {root:?}")]
    NotFound { name: String, root: PathBuf },
    #[error(
        "multiple artifacts for contract {name:?}, use a fully qualified name instead: {}",
        .candidates.join(", ")
    )]
    Ambiguous {
        name: String,
        candidates: Vec<String>,
    },
    #[error("failed to read artifact {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse artifact {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(
        "contract {name} needs linking against the following libraries, which is not supported: \
         {}",
        .libraries.join(", ")
    )]
    Unlinked {
        name: String,
        libraries: Vec<String>,
    },
    #[error("contract {name} has no creation code, it is abstract or an interface")]
    NotDeployable { name: String },
    #[error("contract {name} has malformed bytecode")]
    InvalidBytecode {
        name: String,
        #[source]
        source: const_hex::FromHexError,
    },
    #[error("contract {name} expects {expected} constructor arguments but got {got}")]
    ConstructorArguments {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("invalid constructor argument {index} for contract {name}")]
    ConstructorArgument {
        name: String,
        index: usize,
        #[source]
        source: alloy::dyn_abi::Error,
    },
    #[error("failed to encode constructor arguments for contract {name}")]
    ConstructorEncoding {
        name: String,
        #[source]
        source: alloy::dyn_abi::Error,
    },
}
